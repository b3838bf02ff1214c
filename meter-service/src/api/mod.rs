pub mod baseline;
pub mod error;
pub mod readings;
pub mod usage;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use serde::{Deserialize, Serialize};

use crate::store::ReadingStore;

pub use error::ApiError;

/// Shared handler state: the injected store handle.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ReadingStore>,
}

/// `?meter_id=` query parameter, kept optional so its absence maps to a
/// 400 instead of an extractor rejection.
#[derive(Debug, Deserialize)]
pub struct MeterQuery {
    pub meter_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub success: bool,
    pub message: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/readings",
            get(readings::list_readings).post(readings::add_reading),
        )
        .route(
            "/baseline",
            get(baseline::get_baseline).post(baseline::set_baseline),
        )
        .route("/usage", get(usage::usage_summary))
        .with_state(state)
}
