//! # Hearth Core
//!
//! Core record model and shared primitives for the Hearth fulfillment engine.
//!
//! This crate provides the fundamental building blocks:
//! - [`ParticipantRecord`] - One row of the longitudinal record snapshot
//! - [`RecordSnapshot`] - The indexed, immutable run input
//! - [`ExportColumn`] - The fixed export column allow-list
//! - [`HearthError`] - Engine error types

pub mod error;
pub mod export;
pub mod record;
pub mod snapshot;
pub mod types;

// Re-exports for convenience
pub use error::{HearthError, Result};
pub use export::{ExportColumn, DEFAULT_EXPORT_COLUMNS};
pub use record::{non_blank, Instrument, ParticipantRecord};
pub use snapshot::RecordSnapshot;
pub use types::{EventKey, HouseholdId, NotificationPref, PickupDay, Sku, StudySite};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{HearthError, Result};
    pub use crate::export::{ExportColumn, DEFAULT_EXPORT_COLUMNS};
    pub use crate::record::{Instrument, ParticipantRecord};
    pub use crate::snapshot::RecordSnapshot;
    pub use crate::types::{EventKey, HouseholdId, NotificationPref, PickupDay, Sku, StudySite};
}
