//! The indexed record snapshot a run operates on.
//!
//! Each run recomputes from a full, static snapshot of the current record
//! set. The snapshot is built once per run and indexes rows by household so
//! row-label lookups ("first event for this household") become composite-key
//! lookups instead of repeated scans.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{HearthError, Result};
use crate::record::ParticipantRecord;
use crate::types::{EventKey, HouseholdId};

/// An immutable, household-indexed view over the run's record set.
#[derive(Debug, Clone, Default)]
pub struct RecordSnapshot {
    /// All rows in their original, stable order.
    records: Vec<ParticipantRecord>,

    /// Household -> indices into `records`, in row order.
    index: HashMap<HouseholdId, Vec<usize>>,

    /// Households in first-seen row order.
    household_order: Vec<HouseholdId>,
}

impl RecordSnapshot {
    /// Build a snapshot from materialized rows, validating record shape.
    ///
    /// Shape failures are fatal: a blank household key, or a household
    /// whose rows carry two disagreeing head-of-household pointers.
    pub fn from_records(records: Vec<ParticipantRecord>) -> Result<Self> {
        let mut index: HashMap<HouseholdId, Vec<usize>> = HashMap::new();
        let mut household_order = Vec::new();

        for (position, record) in records.iter().enumerate() {
            if record.household.is_blank() {
                return Err(HearthError::SchemaInvalid {
                    column: "household".to_string(),
                    message: format!("blank household key at row {}", position),
                });
            }

            let indices = index.entry(record.household.clone()).or_default();
            if indices.is_empty() {
                household_order.push(record.household.clone());
            }
            indices.push(position);
        }

        let snapshot = Self {
            records,
            index,
            household_order,
        };
        snapshot.check_head_of_household_pointers()?;

        debug!(
            records = snapshot.records.len(),
            households = snapshot.household_order.len(),
            "built record snapshot"
        );
        Ok(snapshot)
    }

    /// Reject households carrying contradictory head-of-household pointers.
    fn check_head_of_household_pointers(&self) -> Result<()> {
        for household in &self.household_order {
            let mut seen: Option<u32> = None;
            for record in self.household_records(household)? {
                let Some(pointer) = record.head_of_household else {
                    continue;
                };
                match seen {
                    Some(first) if first != pointer => {
                        return Err(HearthError::ConflictingHeadOfHousehold {
                            household: household.clone(),
                            first,
                            second: pointer,
                        });
                    }
                    _ => seen = Some(pointer),
                }
            }
        }
        Ok(())
    }

    /// All rows in snapshot order.
    pub fn records(&self) -> &[ParticipantRecord] {
        &self.records
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Households in first-seen row order.
    pub fn households(&self) -> impl Iterator<Item = &HouseholdId> {
        self.household_order.iter()
    }

    /// A household's rows, in snapshot order.
    pub fn household_records(&self, household: &HouseholdId) -> Result<Vec<&ParticipantRecord>> {
        let indices = self
            .index
            .get(household)
            .ok_or_else(|| HearthError::HouseholdNotFound {
                household: household.clone(),
            })?;
        Ok(indices.iter().map(|&i| &self.records[i]).collect())
    }

    /// The household's canonical first-event record: the enrollment-event
    /// row of participant 0. Per-household values recorded exactly once
    /// (the project code) live on this row.
    pub fn first_event_record(&self, household: &HouseholdId) -> Option<&ParticipantRecord> {
        let indices = self.index.get(household)?;
        indices
            .iter()
            .map(|&i| &self.records[i])
            .find(|r| r.event == EventKey::enrollment(0) && r.is_enrollment_event())
    }

    /// The household's project/location code, propagated from its canonical
    /// first-event record.
    pub fn project_code(&self, household: &HouseholdId) -> Option<i64> {
        self.first_event_record(household)
            .and_then(|r| r.project_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(household: &str, participant: u32) -> ParticipantRecord {
        ParticipantRecord {
            household: HouseholdId::new(household),
            event: EventKey::enrollment(participant),
            ..Default::default()
        }
    }

    #[test]
    fn test_household_index_preserves_row_order() {
        let snapshot = RecordSnapshot::from_records(vec![
            record("H001", 0),
            record("H002", 0),
            record("H001", 1),
        ])
        .unwrap();

        let households: Vec<_> = snapshot.households().map(|h| h.as_str()).collect();
        assert_eq!(households, vec!["H001", "H002"]);

        let rows = snapshot
            .household_records(&HouseholdId::new("H001"))
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].event.participant, 0);
        assert_eq!(rows[1].event.participant, 1);
    }

    #[test]
    fn test_unknown_household_lookup() {
        let snapshot = RecordSnapshot::from_records(vec![record("H001", 0)]).unwrap();
        let err = snapshot
            .household_records(&HouseholdId::new("H999"))
            .unwrap_err();
        assert!(matches!(err, HearthError::HouseholdNotFound { .. }));
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_blank_household_key_is_fatal() {
        let err = RecordSnapshot::from_records(vec![record("  ", 0)]).unwrap_err();
        assert!(matches!(err, HearthError::SchemaInvalid { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_conflicting_head_of_household_is_fatal() {
        let mut first = record("H001", 0);
        first.head_of_household = Some(0);
        let mut second = record("H001", 1);
        second.head_of_household = Some(1);

        let err = RecordSnapshot::from_records(vec![first, second]).unwrap_err();
        assert!(matches!(
            err,
            HearthError::ConflictingHeadOfHousehold { first: 0, second: 1, .. }
        ));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_repeated_identical_pointers_are_allowed() {
        let mut first = record("H001", 0);
        first.head_of_household = Some(1);
        let mut second = record("H001", 1);
        second.head_of_household = Some(1);

        assert!(RecordSnapshot::from_records(vec![first, second]).is_ok());
    }

    #[test]
    fn test_project_code_comes_from_first_event() {
        let mut first = record("H001", 0);
        first.project_code = Some(2);
        let second = record("H001", 1);

        let snapshot = RecordSnapshot::from_records(vec![first, second]).unwrap();
        assert_eq!(snapshot.project_code(&HouseholdId::new("H001")), Some(2));
    }
}
