//! Trend Routes
//!
//! - GET /api/v1/trends - Earlier half vs. later half of the window

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::analytics::trends;
use crate::api::dto::{AnalysisParams, TrendsResponse};
use crate::api::error::ApiResult;
use crate::api::routes::resolve_range;
use crate::api::state::AppState;

/// GET /api/v1/trends
///
/// `trend` is null when the window holds fewer than a week of logs.
pub async fn get_trends(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AnalysisParams>,
) -> ApiResult<Json<TrendsResponse>> {
    let range = resolve_range(&params, state.analysis.default_range_days)?;

    let logs = state.journal.daily_logs(range)?;

    Ok(Json(TrendsResponse {
        trend: trends(&logs),
        range,
        log_count: logs.len(),
    }))
}
