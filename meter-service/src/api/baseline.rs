use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::Json;
use meter_client::domain::BaselineRecord;
use serde::Deserialize;

use crate::api::{ApiError, AppState, MeterQuery, SaveResponse};
use crate::validate;

/// `POST /baseline` body. Unlike the readings endpoints this one always
/// spelled the value `units`.
#[derive(Debug, Deserialize)]
pub struct SetBaselineRequest {
    pub meter_id: i64,
    pub reading_date: String,
    pub units: f64,
}

/// `GET /baseline?meter_id={n}` — the most recent baseline row, or 404 if
/// the meter never had one.
pub async fn get_baseline(
    State(state): State<AppState>,
    Query(query): Query<MeterQuery>,
) -> Result<Json<BaselineRecord>, ApiError> {
    let meter_id = validate::parse_meter_id_param(query.meter_id.as_deref())?;

    match state.store.latest_baseline(meter_id).await? {
        Some(row) => Ok(Json(row)),
        None => Err(ApiError::NotFound(
            "No baseline found for this meter".to_string(),
        )),
    }
}

/// `POST /baseline` — append a new baseline row. Deliberately append-only:
/// earlier rows stay in place and the newest one wins.
pub async fn set_baseline(
    State(state): State<AppState>,
    payload: Result<Json<SetBaselineRequest>, JsonRejection>,
) -> Result<Json<SaveResponse>, ApiError> {
    let Json(body) =
        payload.map_err(|e| ApiError::Validation(format!("invalid request body: {e}")))?;

    let baseline = match validate::new_baseline(body.meter_id, &body.reading_date, body.units) {
        Ok(baseline) => baseline,
        Err(e) => {
            metrics::counter!("baseline_rejected_total").increment(1);
            return Err(e);
        }
    };

    state.store.insert_baseline(&baseline).await?;
    metrics::counter!("baseline_inserted_total").increment(1);
    tracing::info!(meter_id = %baseline.meter_id, "baseline saved");

    Ok(Json(SaveResponse {
        success: true,
        message: "Baseline saved".to_string(),
    }))
}
