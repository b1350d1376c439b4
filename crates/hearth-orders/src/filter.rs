//! Pending-order selection.
//!
//! One pass over the snapshot selects the survey rows that still need an
//! order: symptom surveys with no tracking number, a pickup-time preference,
//! and a swab trigger, deduplicated to at most one pending pickup per
//! household per run.

use std::collections::HashMap;

use hearth_core::{
    HouseholdId, NotificationPref, PickupDay, RecordSnapshot, Result,
};
use hearth_resolve::{resolve_household_address, ResolvedAddress};
use tracing::{debug, warn};

/// A survey row that requires a new order, annotated with its resolved
/// destination and derived scheduling fields.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingOrder {
    /// Household the order belongs to.
    pub household: HouseholdId,

    /// Index of the surviving survey row in the snapshot.
    pub record_index: usize,

    /// Resolved destination bundle, site already normalized.
    pub address: ResolvedAddress,

    /// Today iff the primary pickup preference matches the today code.
    pub pickup_day: PickupDay,

    /// Fixed notification annotation.
    pub notification: NotificationPref,

    /// Resupply kits requested by the surviving survey.
    pub resupply_kits: u32,

    /// Welcome kits requested by the surviving survey.
    pub welcome_kits: u32,
}

/// Outcome of a filter pass.
#[derive(Debug, Clone, Default)]
pub struct FilterReport {
    /// Orders still needing fulfillment, in snapshot order of their rows.
    pub pending: Vec<PendingOrder>,

    /// Households dropped by a per-household resolution failure.
    pub households_skipped: usize,
}

/// Select the survey rows requiring a new order.
///
/// Per-household resolution failures are skipped with a warning; data-shape
/// failures abort the pass. Re-running on an unchanged snapshot yields the
/// same rows: candidate order comes from the snapshot, and the
/// keep-last-per-household dedup always prefers the most recently indexed
/// row.
pub fn filter_pending_orders(
    snapshot: &RecordSnapshot,
    today_pickup_code: i64,
) -> Result<FilterReport> {
    debug!(records = snapshot.len(), "filtering snapshot for pending orders");

    // Orders we must fulfill are symptom surveys without an existing
    // tracking number which have a designated pickup time and a swab
    // trigger. Rows without an order date are incomplete placeholders.
    let candidates = snapshot
        .records()
        .iter()
        .enumerate()
        .filter(|(_, r)| {
            r.is_symptom_survey()
                && r.is_unfulfilled()
                && r.has_pickup_preference()
                && r.swab_trigger.unwrap_or(false)
        })
        .filter(|(_, r)| r.order_date.is_some());

    // At most one pending pickup per household: keep the last-indexed row.
    let mut last_per_household: HashMap<&HouseholdId, usize> = HashMap::new();
    for (index, record) in candidates {
        last_per_household.insert(&record.household, index);
    }
    let mut kept: Vec<usize> = last_per_household.into_values().collect();
    kept.sort_unstable();

    let mut report = FilterReport::default();
    for index in kept {
        let record = &snapshot.records()[index];

        let address = match resolve_household_address(snapshot, &record.household) {
            Ok(address) => address,
            Err(err) if err.is_fatal() => return Err(err),
            Err(err) => {
                warn!(household = %record.household, %err, "skipping household");
                report.households_skipped += 1;
                continue;
            }
        };

        report.pending.push(PendingOrder {
            household: record.household.clone(),
            record_index: index,
            address,
            pickup_day: if record.pickup_1 == Some(today_pickup_code) {
                PickupDay::Today
            } else {
                PickupDay::Tomorrow
            },
            notification: NotificationPref::Email,
            resupply_kits: record.resupply_kits_requested.unwrap_or(0),
            welcome_kits: record.welcome_kits_requested.unwrap_or(0),
        });
    }

    debug!(
        pending = report.pending.len(),
        skipped = report.households_skipped,
        "filter pass complete"
    );
    Ok(report)
}
