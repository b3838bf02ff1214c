use meter_client::db::reading_queries;
use meter_client::domain::{Baseline, BaselineRecord, MeterId, Reading, ReadingRecord};
use sqlx::PgPool;

use super::{ReadingStore, StoreError};

/// `ReadingStore` backed by the Postgres tables in `schema.sql`.
#[derive(Clone)]
pub struct PgReadingStore {
    pool: PgPool,
}

impl PgReadingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ReadingStore for PgReadingStore {
    async fn insert_reading(&self, reading: &Reading) -> Result<(), StoreError> {
        reading_queries::insert_reading(&self.pool, reading)
            .await
            .map_err(StoreError::Query)
    }

    async fn readings_for_meter(
        &self,
        meter_id: MeterId,
    ) -> Result<Vec<ReadingRecord>, StoreError> {
        reading_queries::readings_for_meter(&self.pool, meter_id)
            .await
            .map_err(StoreError::Query)
    }

    async fn insert_baseline(&self, baseline: &Baseline) -> Result<(), StoreError> {
        reading_queries::insert_baseline(&self.pool, baseline)
            .await
            .map_err(StoreError::Query)
    }

    async fn latest_baseline(
        &self,
        meter_id: MeterId,
    ) -> Result<Option<BaselineRecord>, StoreError> {
        reading_queries::latest_baseline(&self.pool, meter_id)
            .await
            .map_err(StoreError::Query)
    }
}
