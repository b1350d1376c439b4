//! Head-of-household selection.

use hearth_core::{HearthError, HouseholdId, ParticipantRecord, Result};
use tracing::{debug, warn};

/// Participant index used when no record names a head of household.
///
/// Inherited policy: the first enrolled participant anchors the household
/// unless a record says otherwise. Falling back is recoverable and logged
/// at warning level; it is not an error.
pub const DEFAULT_HEAD_OF_HOUSEHOLD: u32 = 0;

/// Select the head-of-household participant index for one household.
///
/// Scans the household's records in their stable snapshot order and takes
/// the first non-empty head-of-household pointer. Two disagreeing pointers
/// are a data-shape failure; no pointer at all falls back to
/// [`DEFAULT_HEAD_OF_HOUSEHOLD`].
pub fn select_head_of_household(
    records: &[&ParticipantRecord],
    household: &HouseholdId,
) -> Result<u32> {
    let mut selected: Option<u32> = None;

    for record in records {
        let Some(pointer) = record.head_of_household else {
            continue;
        };
        match selected {
            None => selected = Some(pointer),
            Some(first) if first != pointer => {
                return Err(HearthError::ConflictingHeadOfHousehold {
                    household: household.clone(),
                    first,
                    second: pointer,
                });
            }
            Some(_) => {}
        }
    }

    match selected {
        Some(pointer) => {
            debug!(%household, head = pointer, "found head of household");
            Ok(pointer)
        }
        None => {
            warn!(
                %household,
                fallback = DEFAULT_HEAD_OF_HOUSEHOLD,
                "no head of household detected, falling back to default index"
            );
            Ok(DEFAULT_HEAD_OF_HOUSEHOLD)
        }
    }
}
