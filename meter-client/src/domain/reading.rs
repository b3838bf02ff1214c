use time::Date;

use crate::domain::MeterId;

/// A new cumulative reading to persist for one meter. `units` is the
/// value shown on the physical meter on `reading_date`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reading {
    pub meter_id: MeterId,
    pub reading_date: Date,
    pub units: f64,
}

/// A persisted reading row. Rows are append-only; there is no update or
/// delete path.
#[derive(Debug, Clone, sqlx::FromRow)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReadingRecord {
    pub id: i64,
    pub meter_id: MeterId,
    pub reading_date: Date,
    pub units: f64,
}
