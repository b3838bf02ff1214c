mod memory;
mod postgres;

pub use memory::MemoryReadingStore;
pub use postgres::PgReadingStore;

use meter_client::domain::{Baseline, BaselineRecord, MeterId, Reading, ReadingRecord};

/// Failure talking to the backing table. Handlers surface this as a
/// generic server error; the cause is only ever logged.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store query failed: {0}")]
    Query(#[source] anyhow::Error),
}

/// Persistence seam for readings and baselines.
///
/// Handlers receive this as a shared handle so the Postgres
/// implementation can be swapped for the in-memory one in tests.
#[async_trait::async_trait]
pub trait ReadingStore: Send + Sync {
    /// Append one reading. Readings are never updated or deleted.
    async fn insert_reading(&self, reading: &Reading) -> Result<(), StoreError>;

    /// All readings for one meter, newest first.
    async fn readings_for_meter(&self, meter_id: MeterId)
        -> Result<Vec<ReadingRecord>, StoreError>;

    /// Append one baseline row; history is kept and the latest row wins.
    async fn insert_baseline(&self, baseline: &Baseline) -> Result<(), StoreError>;

    /// The most recent baseline for one meter, if any.
    async fn latest_baseline(&self, meter_id: MeterId)
        -> Result<Option<BaselineRecord>, StoreError>;
}
