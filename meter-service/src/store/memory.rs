use std::sync::Mutex;

use meter_client::domain::{Baseline, BaselineRecord, MeterId, Reading, ReadingRecord};

use super::{ReadingStore, StoreError};

/// In-process `ReadingStore` with the same ordering semantics as the
/// Postgres implementation. Used by tests and local experimentation.
#[derive(Default)]
pub struct MemoryReadingStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    readings: Vec<ReadingRecord>,
    baselines: Vec<BaselineRecord>,
    last_id: i64,
}

impl Inner {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

impl MemoryReadingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ReadingStore for MemoryReadingStore {
    async fn insert_reading(&self, reading: &Reading) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().expect("reading store mutex poisoned");
        let id = inner.next_id();
        inner.readings.push(ReadingRecord {
            id,
            meter_id: reading.meter_id,
            reading_date: reading.reading_date,
            units: reading.units,
        });
        Ok(())
    }

    async fn readings_for_meter(
        &self,
        meter_id: MeterId,
    ) -> Result<Vec<ReadingRecord>, StoreError> {
        let inner = self.inner.lock().expect("reading store mutex poisoned");
        let mut rows: Vec<ReadingRecord> = inner
            .readings
            .iter()
            .filter(|r| r.meter_id == meter_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.reading_date.cmp(&a.reading_date).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn insert_baseline(&self, baseline: &Baseline) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().expect("reading store mutex poisoned");
        let id = inner.next_id();
        inner.baselines.push(BaselineRecord {
            id,
            meter_id: baseline.meter_id,
            reading_date: baseline.reading_date,
            units: baseline.units,
        });
        Ok(())
    }

    async fn latest_baseline(
        &self,
        meter_id: MeterId,
    ) -> Result<Option<BaselineRecord>, StoreError> {
        let inner = self.inner.lock().expect("reading store mutex poisoned");
        let latest = inner
            .baselines
            .iter()
            .filter(|b| b.meter_id == meter_id)
            .max_by(|a, b| a.reading_date.cmp(&b.reading_date).then(a.id.cmp(&b.id)))
            .cloned();
        Ok(latest)
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    fn reading(meter_id: MeterId, reading_date: time::Date, units: f64) -> Reading {
        Reading {
            meter_id,
            reading_date,
            units,
        }
    }

    #[tokio::test]
    async fn listing_returns_only_that_meter_newest_first() {
        let store = MemoryReadingStore::new();
        store
            .insert_reading(&reading(MeterId::Home, date!(2024 - 01 - 05), 120.0))
            .await
            .unwrap();
        store
            .insert_reading(&reading(MeterId::Home, date!(2024 - 01 - 20), 140.0))
            .await
            .unwrap();
        store
            .insert_reading(&reading(MeterId::Ac, date!(2024 - 01 - 10), 300.0))
            .await
            .unwrap();
        store
            .insert_reading(&reading(MeterId::Home, date!(2024 - 01 - 12), 130.0))
            .await
            .unwrap();

        let rows = store.readings_for_meter(MeterId::Home).await.unwrap();
        let dates: Vec<time::Date> = rows.iter().map(|r| r.reading_date).collect();
        assert_eq!(
            dates,
            vec![date!(2024 - 01 - 20), date!(2024 - 01 - 12), date!(2024 - 01 - 05)]
        );
        assert!(rows.iter().all(|r| r.meter_id == MeterId::Home));
    }

    #[tokio::test]
    async fn duplicate_dates_order_by_insertion() {
        let store = MemoryReadingStore::new();
        store
            .insert_reading(&reading(MeterId::Home, date!(2024 - 01 - 10), 100.0))
            .await
            .unwrap();
        store
            .insert_reading(&reading(MeterId::Home, date!(2024 - 01 - 10), 105.0))
            .await
            .unwrap();

        let rows = store.readings_for_meter(MeterId::Home).await.unwrap();
        assert_eq!(rows[0].units, 105.0);
        assert_eq!(rows[1].units, 100.0);
    }

    #[tokio::test]
    async fn latest_baseline_prefers_newest_date_then_newest_row() {
        let store = MemoryReadingStore::new();
        assert!(store.latest_baseline(MeterId::Home).await.unwrap().is_none());

        let baseline = |d, u| Baseline {
            meter_id: MeterId::Home,
            reading_date: d,
            units: u,
        };
        store
            .insert_baseline(&baseline(date!(2024 - 01 - 01), 100.0))
            .await
            .unwrap();
        store
            .insert_baseline(&baseline(date!(2024 - 02 - 01), 180.0))
            .await
            .unwrap();

        let latest = store.latest_baseline(MeterId::Home).await.unwrap().unwrap();
        assert_eq!(latest.reading_date, date!(2024 - 02 - 01));
        assert_eq!(latest.units, 180.0);

        // Same-date rows resolve to the most recently inserted.
        store
            .insert_baseline(&baseline(date!(2024 - 02 - 01), 185.0))
            .await
            .unwrap();
        let latest = store.latest_baseline(MeterId::Home).await.unwrap().unwrap();
        assert_eq!(latest.units, 185.0);

        // The other meter is untouched.
        assert!(store.latest_baseline(MeterId::Ac).await.unwrap().is_none());
    }
}
