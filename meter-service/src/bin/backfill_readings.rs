use std::{env, fs::File, sync::Arc};

use anyhow::{bail, Context, Result};
use csv::StringRecord;
use meter_client::domain::Reading;
use meter_service::{
    config::AppConfig,
    observability,
    store::{PgReadingStore, ReadingStore},
    validate,
};
use sqlx::postgres::PgPoolOptions;

/// Bulk-import historical readings from a CSV file with `meter_id`,
/// `reading_date` and `total_units` columns. Rows that fail the same
/// validation as the HTTP boundary are skipped and logged, not fatal.
#[tokio::main]
async fn main() -> Result<()> {
    observability::init_tracing();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        bail!("usage: backfill_readings <csv_file_path>");
    }
    let file_path = &args[1];

    // Load configuration (can point TRACKER_CONFIG at a backfill-specific file).
    let cfg = AppConfig::load()?;

    let pool = PgPoolOptions::new()
        .max_connections(cfg.database.max_connections)
        .connect(&cfg.database.uri)
        .await?;
    let store = Arc::new(PgReadingStore::new(pool));

    let file = File::open(file_path).with_context(|| format!("failed to open {file_path}"))?;
    let mut rdr = csv::Reader::from_reader(file);
    let headers = rdr.headers().context("failed to read CSV headers")?.clone();

    let mut imported = 0u64;
    let mut skipped = 0u64;
    for (line, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("failed to read CSV record {line}"))?;
        match record_to_reading(&record, &headers) {
            Ok(reading) => {
                store.insert_reading(&reading).await?;
                imported += 1;
            }
            Err(e) => {
                skipped += 1;
                tracing::warn!(line, error = %e, "skipping CSV record");
            }
        }
    }

    tracing::info!(imported, skipped, "backfill finished");
    Ok(())
}

fn record_to_reading(record: &StringRecord, headers: &StringRecord) -> Result<Reading> {
    let get = |name: &str| -> Result<&str> {
        headers
            .iter()
            .position(|h| h == name)
            .and_then(|idx| record.get(idx))
            .with_context(|| format!("missing column '{name}' in CSV record"))
    };

    let meter_id: i64 = get("meter_id")?.trim().parse().context("invalid meter_id")?;
    let reading_date = get("reading_date")?;
    let total_units: f64 = get("total_units")?
        .trim()
        .parse()
        .context("invalid total_units")?;

    validate::new_reading(meter_id, reading_date, total_units).map_err(anyhow::Error::from)
}
