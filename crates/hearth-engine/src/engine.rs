//! The batch order-run engine.

use chrono::NaiveDate;
use hearth_core::{RecordSnapshot, Result, Sku};
use hearth_orders::{append_order, filter_pending_orders, OrderSheet, ShipmentCaps};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// Configuration for an order run, fixed at engine construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Per-shipment quantity caps by SKU.
    pub caps: ShipmentCaps,

    /// Primary pickup-preference code meaning "pick up today".
    pub today_pickup_code: i64,

    /// Log filter directive for the surrounding process, e.g. "info" or
    /// "hearth_orders=debug". The engine itself only emits events; the
    /// runner installs the subscriber.
    pub log_filter: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            caps: ShipmentCaps::default(),
            today_pickup_code: 1,
            log_filter: "info".to_string(),
        }
    }
}

/// Outcome of one order run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Unique identifier of this run.
    pub run_id: Uuid,

    /// The sheet after the run: seeded lines plus everything appended.
    pub sheet: OrderSheet,

    /// Order lines appended by this run.
    pub orders_appended: usize,

    /// Households dropped by per-household resolution failures.
    pub households_skipped: usize,
}

/// The batch order-run engine.
///
/// Single-threaded and synchronous: the appender is always invoked
/// sequentially, so order-id collision checks against the sheet-so-far stay
/// consistent. The engine does no I/O; snapshots arrive materialized and the
/// sheet is collected in memory.
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    /// Create a new engine.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// The engine's configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run one pass over a snapshot.
    ///
    /// `sheet` seeds the run with pre-existing order lines so freshly
    /// generated order ids cannot collide with them. `today` is the run
    /// date stamped into every order id. Per-household failures are skipped
    /// with a warning; data-shape failures abort the run.
    pub fn run(
        &self,
        snapshot: &RecordSnapshot,
        mut sheet: OrderSheet,
        today: NaiveDate,
    ) -> Result<RunReport> {
        let run_id = Uuid::new_v4();
        info!(
            %run_id,
            records = snapshot.len(),
            seeded_lines = sheet.len(),
            "starting order run"
        );

        let filtered = filter_pending_orders(snapshot, self.config.today_pickup_code)?;
        let lines_before = sheet.len();

        for order in &filtered.pending {
            if order.resupply_kits > 0 {
                append_order(
                    &mut sheet,
                    today,
                    &order.household,
                    Sku::Resupply,
                    order.resupply_kits,
                    &order.address,
                    &self.config.caps,
                );
            }
            if order.welcome_kits > 0 {
                append_order(
                    &mut sheet,
                    today,
                    &order.household,
                    Sku::Welcome,
                    order.welcome_kits,
                    &order.address,
                    &self.config.caps,
                );
            }
        }

        let report = RunReport {
            run_id,
            orders_appended: sheet.len() - lines_before,
            households_skipped: filtered.households_skipped,
            sheet,
        };
        info!(
            %run_id,
            appended = report.orders_appended,
            skipped = report.households_skipped,
            "order run complete"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_core::{EventKey, HouseholdId, Instrument, ParticipantRecord};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn enrollment(household: &str) -> ParticipantRecord {
        ParticipantRecord {
            household: HouseholdId::new(household),
            event: EventKey::enrollment(0),
            street_address: Some("12 Alder St".into()),
            city: Some("Portsea".into()),
            state: Some("WA".into()),
            zipcode: Some("98103".into()),
            first_name: Some("Margaret".into()),
            last_name: Some("Lin".into()),
            head_of_household: Some(0),
            project_code: Some(2),
            ..Default::default()
        }
    }

    fn pending_survey(household: &str, instance: u32, resupply: u32) -> ParticipantRecord {
        ParticipantRecord {
            household: HouseholdId::new(household),
            event: EventKey::repeat(0, instance),
            instrument: Some(Instrument::SymptomSurvey),
            pickup_1: Some(1),
            swab_trigger: Some(true),
            order_date: Some(date(2024, 3, 4)),
            resupply_kits_requested: Some(resupply),
            ..Default::default()
        }
    }

    #[test]
    fn test_run_appends_split_lines_per_household() {
        let snapshot = RecordSnapshot::from_records(vec![
            enrollment("H001"),
            pending_survey("H001", 1, 45),
            enrollment("H002"),
            pending_survey("H002", 1, 3),
        ])
        .unwrap();

        let engine = Engine::new(EngineConfig::default());
        let report = engine
            .run(&snapshot, OrderSheet::new(), date(2024, 3, 5))
            .unwrap();

        // H001: 45 resupply kits split 5/20/20; H002: one line of 3.
        assert_eq!(report.orders_appended, 4);
        let quantities: Vec<u32> = report.sheet.lines().iter().map(|l| l.quantity).collect();
        assert_eq!(quantities, vec![5, 20, 20, 3]);
        assert_eq!(report.households_skipped, 0);
    }

    #[test]
    fn test_run_emits_welcome_kits_after_resupply() {
        let mut survey = pending_survey("H001", 1, 2);
        survey.welcome_kits_requested = Some(1);

        let snapshot =
            RecordSnapshot::from_records(vec![enrollment("H001"), survey]).unwrap();

        let engine = Engine::new(EngineConfig::default());
        let report = engine
            .run(&snapshot, OrderSheet::new(), date(2024, 3, 5))
            .unwrap();

        let skus: Vec<Sku> = report.sheet.lines().iter().map(|l| l.sku).collect();
        assert_eq!(skus, vec![Sku::Resupply, Sku::Welcome]);
    }

    #[test]
    fn test_run_skips_household_without_enrollment() {
        let snapshot = RecordSnapshot::from_records(vec![
            pending_survey("H001", 1, 2),
            enrollment("H002"),
            pending_survey("H002", 1, 2),
        ])
        .unwrap();

        let engine = Engine::new(EngineConfig::default());
        let report = engine
            .run(&snapshot, OrderSheet::new(), date(2024, 3, 5))
            .unwrap();

        assert_eq!(report.households_skipped, 1);
        assert_eq!(report.orders_appended, 1);
        assert_eq!(
            report.sheet.lines()[0].household,
            HouseholdId::new("H002")
        );
    }

    #[test]
    fn test_seeded_sheet_forces_suffixed_order_ids() {
        let snapshot = RecordSnapshot::from_records(vec![
            enrollment("H001"),
            pending_survey("H001", 1, 2),
        ])
        .unwrap();

        let engine = Engine::new(EngineConfig::default());
        let today = date(2024, 3, 5);

        let first = engine.run(&snapshot, OrderSheet::new(), today).unwrap();
        assert_eq!(first.sheet.lines()[0].order_id.as_str(), "240305H001");

        // Re-running over the previous sheet must not reuse the id.
        let second = engine.run(&snapshot, first.sheet, today).unwrap();
        assert_eq!(second.sheet.lines()[1].order_id.as_str(), "240305H001a");
    }

    #[test]
    fn test_conflicting_head_pointers_abort_the_run() {
        let mut a = enrollment("H001");
        a.head_of_household = Some(0);
        let mut b = enrollment("H001");
        b.event = EventKey::enrollment(1);
        b.head_of_household = Some(1);

        assert!(RecordSnapshot::from_records(vec![a, b]).is_err());
    }
}
