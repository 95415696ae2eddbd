//! Correlation Routes
//!
//! - GET /api/v1/correlations - Symptom co-occurrence strengths

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::analytics::symptom_correlations;
use crate::api::dto::{AnalysisParams, CorrelationsResponse};
use crate::api::error::ApiResult;
use crate::api::routes::resolve_range;
use crate::api::state::AppState;

/// GET /api/v1/correlations
///
/// Symptom pairs that co-occur often enough to matter, strongest first.
pub async fn get_correlations(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AnalysisParams>,
) -> ApiResult<Json<CorrelationsResponse>> {
    let range = resolve_range(&params, state.analysis.default_range_days)?;

    let logs = state.journal.daily_logs(range)?;
    let correlations = symptom_correlations(&logs);

    Ok(Json(CorrelationsResponse {
        correlations,
        range,
        log_count: logs.len(),
    }))
}
