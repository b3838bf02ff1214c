use anyhow::Result;
use sqlx::PgPool;

use crate::domain::{Baseline, BaselineRecord, MeterId, Reading, ReadingRecord};

/// Append one reading. Readings are never updated or deleted.
pub async fn insert_reading(pool: &PgPool, reading: &Reading) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO meter_reading (meter_id, reading_date, units)
        VALUES ($1, $2, $3)
        "#,
    )
    .bind(reading.meter_id)
    .bind(reading.reading_date)
    .bind(reading.units)
    .execute(pool)
    .await?;

    Ok(())
}

/// Fetch all readings for a single meter, newest first. Ties on the date
/// order by insertion so responses are stable.
pub async fn readings_for_meter(pool: &PgPool, meter_id: MeterId) -> Result<Vec<ReadingRecord>> {
    let rows = sqlx::query_as::<_, ReadingRecord>(
        r#"
        SELECT
            id,
            meter_id,
            reading_date,
            units
        FROM meter_reading
        WHERE meter_id = $1
        ORDER BY reading_date DESC, id DESC
        "#,
    )
    .bind(meter_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Append one baseline row. Setting a new baseline keeps the history; the
/// latest row is what readers see.
pub async fn insert_baseline(pool: &PgPool, baseline: &Baseline) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO baseline_reading (meter_id, reading_date, units)
        VALUES ($1, $2, $3)
        "#,
    )
    .bind(baseline.meter_id)
    .bind(baseline.reading_date)
    .bind(baseline.units)
    .execute(pool)
    .await?;

    Ok(())
}

/// The most recent baseline for a meter, if one was ever set.
pub async fn latest_baseline(pool: &PgPool, meter_id: MeterId) -> Result<Option<BaselineRecord>> {
    let row = sqlx::query_as::<_, BaselineRecord>(
        r#"
        SELECT
            id,
            meter_id,
            reading_date,
            units
        FROM baseline_reading
        WHERE meter_id = $1
        ORDER BY reading_date DESC, id DESC
        LIMIT 1
        "#,
    )
    .bind(meter_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}
