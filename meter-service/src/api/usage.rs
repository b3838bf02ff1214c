use axum::extract::{Query, State};
use axum::Json;
use meter_client::usage::{self, UsageSummary};
use time::OffsetDateTime;

use crate::api::{ApiError, AppState, MeterQuery};
use crate::validate;

/// `GET /usage?meter_id={n}` — computed metrics for the meter's current
/// tracking period: readings plus the latest baseline fed through the
/// calculator with the current time.
pub async fn usage_summary(
    State(state): State<AppState>,
    Query(query): Query<MeterQuery>,
) -> Result<Json<UsageSummary>, ApiError> {
    let meter_id = validate::parse_meter_id_param(query.meter_id.as_deref())?;

    let readings = state.store.readings_for_meter(meter_id).await?;
    let baseline = state.store.latest_baseline(meter_id).await?;
    let summary = usage::summarize(&readings, baseline.as_ref(), OffsetDateTime::now_utc());

    metrics::counter!("usage_summaries_total").increment(1);
    Ok(Json(summary))
}
