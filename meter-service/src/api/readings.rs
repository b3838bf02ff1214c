use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::Json;
use meter_client::domain::ReadingRecord;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::api::{ApiError, AppState, MeterQuery, SaveResponse};
use crate::validate;

/// `POST /readings` body. `total_units` is the historical wire spelling
/// of the cumulative value; internally it becomes `units`.
#[derive(Debug, Deserialize)]
pub struct AddReadingRequest {
    pub meter_id: i64,
    pub reading_date: String,
    pub total_units: f64,
}

/// One row of `GET /readings`, keeping the `total_units` spelling on the
/// wire.
#[derive(Debug, Serialize)]
pub struct ReadingRow {
    pub id: i64,
    pub meter_id: i16,
    pub reading_date: Date,
    pub total_units: f64,
}

impl From<ReadingRecord> for ReadingRow {
    fn from(r: ReadingRecord) -> Self {
        Self {
            id: r.id,
            meter_id: r.meter_id.as_i16(),
            reading_date: r.reading_date,
            total_units: r.units,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReadingsResponse {
    pub readings: Vec<ReadingRow>,
}

/// `GET /readings?meter_id={1|2}` — full history for one meter, newest
/// first.
pub async fn list_readings(
    State(state): State<AppState>,
    Query(query): Query<MeterQuery>,
) -> Result<Json<ReadingsResponse>, ApiError> {
    let meter_id = validate::parse_meter_id_param(query.meter_id.as_deref())?;
    let rows = state.store.readings_for_meter(meter_id).await?;
    metrics::counter!("readings_listed_total").increment(1);

    Ok(Json(ReadingsResponse {
        readings: rows.into_iter().map(ReadingRow::from).collect(),
    }))
}

/// `POST /readings` — append one reading.
pub async fn add_reading(
    State(state): State<AppState>,
    payload: Result<Json<AddReadingRequest>, JsonRejection>,
) -> Result<Json<SaveResponse>, ApiError> {
    let Json(body) =
        payload.map_err(|e| ApiError::Validation(format!("invalid request body: {e}")))?;

    let parsed = validate::new_reading(body.meter_id, &body.reading_date, body.total_units);
    let reading = match parsed {
        Ok(reading) => reading,
        Err(e) => {
            metrics::counter!("readings_rejected_total").increment(1);
            return Err(e);
        }
    };

    state.store.insert_reading(&reading).await?;
    metrics::counter!("readings_inserted_total").increment(1);
    tracing::info!(meter_id = %reading.meter_id, "reading saved");

    Ok(Json(SaveResponse {
        success: true,
        message: "Reading saved".to_string(),
    }))
}
