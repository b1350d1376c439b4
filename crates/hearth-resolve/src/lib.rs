//! # Hearth Resolve
//!
//! Household resolution algorithms: given one household's record set,
//! determine the head of household and the single authoritative address +
//! contact bundle its orders ship to.

pub mod address;
pub mod head;

pub use address::{resolve_household_address, ResolvedAddress};
pub use head::{select_head_of_household, DEFAULT_HEAD_OF_HOUSEHOLD};
