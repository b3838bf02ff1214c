use time::Date;

use crate::domain::MeterId;

/// An anchor reading marking the start of a usage-tracking period: the
/// last known meter value before tracking began.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Baseline {
    pub meter_id: MeterId,
    pub reading_date: Date,
    pub units: f64,
}

/// A persisted baseline row. Setting a new baseline appends a row rather
/// than replacing the old one; readers pick the most recent by date.
#[derive(Debug, Clone, sqlx::FromRow)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaselineRecord {
    pub id: i64,
    pub meter_id: MeterId,
    pub reading_date: Date,
    pub units: f64,
}
