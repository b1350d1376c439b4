//! # Hearth Batch
//!
//! Batch runner for the Hearth fulfillment engine: load a materialized
//! record snapshot, run one order pass, and emit the export rows.
//!
//! Usage: `hearth-batch <snapshot.json> [existing-sheet.json]`
//!
//! The snapshot file is a JSON array of participant records; the optional
//! sheet file is a previously emitted order sheet used to seed order-number
//! generation. Export rows are written to stdout as JSON. `HEARTH_LOG`
//! overrides the configured log filter.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use chrono::Local;
use hearth_core::{ParticipantRecord, RecordSnapshot, DEFAULT_EXPORT_COLUMNS};
use hearth_engine::{Engine, EngineConfig};
use hearth_orders::OrderSheet;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let config = EngineConfig::default();

    // The log filter is engine configuration, overridable per invocation.
    let filter = std::env::var("HEARTH_LOG").unwrap_or_else(|_| config.log_filter.clone());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let snapshot_path = args
        .next()
        .context("usage: hearth-batch <snapshot.json> [existing-sheet.json]")?;

    let snapshot = load_snapshot(Path::new(&snapshot_path))?;
    let sheet = match args.next() {
        Some(path) => load_sheet(Path::new(&path))?,
        None => OrderSheet::new(),
    };

    let engine = Engine::new(config);
    let today = Local::now().date_naive();
    let report = engine
        .run(&snapshot, sheet, today)
        .context("order run failed")?;

    info!(
        run_id = %report.run_id,
        appended = report.orders_appended,
        skipped = report.households_skipped,
        "writing export rows"
    );

    let rows = report.sheet.export_rows(DEFAULT_EXPORT_COLUMNS);
    serde_json::to_writer_pretty(std::io::stdout().lock(), &rows)?;
    println!();

    Ok(())
}

/// Load and index the record snapshot.
fn load_snapshot(path: &Path) -> anyhow::Result<RecordSnapshot> {
    let file = File::open(path)
        .with_context(|| format!("failed to open snapshot file {}", path.display()))?;
    let records: Vec<ParticipantRecord> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse snapshot file {}", path.display()))?;

    info!(records = records.len(), path = %path.display(), "loaded record snapshot");
    RecordSnapshot::from_records(records).context("snapshot failed shape validation")
}

/// Load a previously emitted order sheet to seed the run.
fn load_sheet(path: &Path) -> anyhow::Result<OrderSheet> {
    let file = File::open(path)
        .with_context(|| format!("failed to open sheet file {}", path.display()))?;
    let sheet: OrderSheet = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse sheet file {}", path.display()))?;

    info!(lines = sheet.len(), path = %path.display(), "seeded order sheet");
    Ok(sheet)
}
