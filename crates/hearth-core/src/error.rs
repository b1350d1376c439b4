//! Error types for the Hearth fulfillment engine.

use thiserror::Error;

use crate::types::HouseholdId;

/// Main error type for Hearth operations.
#[derive(Error, Debug, Clone)]
pub enum HearthError {
    /// The record snapshot is structurally invalid.
    #[error("Invalid record snapshot at column {column}: {message}")]
    SchemaInvalid { column: String, message: String },

    /// A household carries two disagreeing head-of-household pointers.
    #[error("Household {household} has conflicting head-of-household pointers {first} and {second}")]
    ConflictingHeadOfHousehold {
        household: HouseholdId,
        first: u32,
        second: u32,
    },

    /// The head-of-household participant has no enrollment-event row.
    #[error("Household {household} has no enrollment record for participant {participant}")]
    MissingEnrollmentRecord {
        household: HouseholdId,
        participant: u32,
    },

    /// A household key was not found in the snapshot index.
    #[error("Household {household} not found in the record snapshot")]
    HouseholdNotFound { household: HouseholdId },

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Internal error (should not happen).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HearthError {
    /// Returns true if this error must abort the whole run.
    ///
    /// Fatal errors are data-shape failures: the engine does not guess in
    /// the presence of structurally invalid input. Non-fatal errors are
    /// per-household and are downgraded to skip-with-warning by callers.
    pub fn is_fatal(&self) -> bool {
        match self {
            HearthError::SchemaInvalid { .. } => true,
            HearthError::ConflictingHeadOfHousehold { .. } => true,
            HearthError::SerializationError(_) => true,
            HearthError::Internal(_) => true,
            HearthError::MissingEnrollmentRecord { .. } => false,
            HearthError::HouseholdNotFound { .. } => false,
        }
    }

    /// Returns the household this error concerns, if any.
    pub fn household(&self) -> Option<&HouseholdId> {
        match self {
            HearthError::ConflictingHeadOfHousehold { household, .. } => Some(household),
            HearthError::MissingEnrollmentRecord { household, .. } => Some(household),
            HearthError::HouseholdNotFound { household } => Some(household),
            _ => None,
        }
    }
}

/// Convenience Result type for Hearth operations.
pub type Result<T> = std::result::Result<T, HearthError>;

impl From<serde_json::Error> for HearthError {
    fn from(err: serde_json::Error) -> Self {
        HearthError::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        let conflict = HearthError::ConflictingHeadOfHousehold {
            household: HouseholdId::new("H001"),
            first: 0,
            second: 2,
        };
        assert!(conflict.is_fatal());

        let missing = HearthError::MissingEnrollmentRecord {
            household: HouseholdId::new("H001"),
            participant: 1,
        };
        assert!(!missing.is_fatal());
    }

    #[test]
    fn test_household_accessor() {
        let err = HearthError::HouseholdNotFound {
            household: HouseholdId::new("H042"),
        };
        assert_eq!(err.household().map(|h| h.as_str()), Some("H042"));
        assert_eq!(HearthError::Internal("boom".into()).household(), None);
    }
}
