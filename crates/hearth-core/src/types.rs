//! Common types used across the Hearth fulfillment engine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies a household: a group of participants sharing one shipping
/// destination and order history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HouseholdId(String);

impl HouseholdId {
    /// Create a new household id from a raw record key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The raw key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if the key is empty or whitespace-only.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for HouseholdId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HouseholdId {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// The event-instance key of a record within its household.
///
/// `participant` indexes the household member the event belongs to;
/// `instance` distinguishes repeats of a repeating instrument (0 for the
/// non-repeating enrollment event).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventKey {
    /// Participant index within the household.
    pub participant: u32,

    /// Repeat instance of the instrument (0 = first / non-repeating).
    pub instance: u32,
}

impl EventKey {
    /// The enrollment event for a participant (instance 0).
    pub fn enrollment(participant: u32) -> Self {
        Self {
            participant,
            instance: 0,
        }
    }

    /// The nth repeat instance of a participant's repeating instrument.
    pub fn repeat(participant: u32, instance: u32) -> Self {
        Self {
            participant,
            instance,
        }
    }
}

impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.participant, self.instance)
    }
}

/// Kit type shipped to a household. Each SKU carries its own per-shipment
/// quantity cap (see `ShipmentCaps` in hearth-orders).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sku {
    /// Replenishment kit for an already-enrolled household.
    Resupply,
    /// Welcome kit for a newly enrolled household.
    Welcome,
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sku::Resupply => f.write_str("resupply"),
            Sku::Welcome => f.write_str("welcome"),
        }
    }
}

/// The two study sub-locations an order can be assigned to.
///
/// The mapping from the raw project code is intentionally binary: code 2 is
/// the north site, every other value (including a missing code) the south.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudySite {
    North,
    South,
}

impl StudySite {
    /// Raw project code for the north site.
    pub const NORTH_CODE: i64 = 2;

    /// Normalize a raw project/location code to its canonical site.
    pub fn from_code(code: Option<i64>) -> Self {
        if code == Some(Self::NORTH_CODE) {
            StudySite::North
        } else {
            StudySite::South
        }
    }

    /// The canonical export label for this site.
    pub fn label(&self) -> &'static str {
        match self {
            StudySite::North => "HEARTH_NORTH",
            StudySite::South => "HEARTH_SOUTH",
        }
    }
}

impl fmt::Display for StudySite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether a pickup is scheduled for today or tomorrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickupDay {
    Today,
    Tomorrow,
}

/// How the household is notified about a scheduled pickup.
///
/// Currently fixed: every pending order is annotated with email
/// notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationPref {
    #[default]
    Email,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_normalization_is_binary() {
        assert_eq!(StudySite::from_code(Some(2)), StudySite::North);
        assert_eq!(StudySite::from_code(Some(1)), StudySite::South);
        assert_eq!(StudySite::from_code(Some(99)), StudySite::South);
        assert_eq!(StudySite::from_code(None), StudySite::South);
    }

    #[test]
    fn test_site_labels() {
        assert_eq!(StudySite::North.label(), "HEARTH_NORTH");
        assert_eq!(StudySite::South.label(), "HEARTH_SOUTH");
    }

    #[test]
    fn test_event_key_constructors() {
        assert_eq!(EventKey::enrollment(3), EventKey::repeat(3, 0));
        assert_eq!(EventKey::repeat(1, 4).to_string(), "1:4");
    }

    #[test]
    fn test_household_id_blank() {
        assert!(HouseholdId::new("  ").is_blank());
        assert!(!HouseholdId::new("H001").is_blank());
    }
}
