//! # Hearth Engine
//!
//! The batch order-run engine: one synchronous pass over a record snapshot
//! that selects pending orders, resolves each household's destination, and
//! appends size-capped order lines to the run's sheet.

pub mod engine;

pub use engine::{Engine, EngineConfig, RunReport};
