//! Insight Routes
//!
//! - GET /api/v1/insights - Pattern insights over recent daily logs

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::analytics::{analyze_patterns, compute_cycle_stats};
use crate::api::dto::{AnalysisParams, InsightsResponse};
use crate::api::error::ApiResult;
use crate::api::routes::resolve_range;
use crate::api::state::AppState;

/// GET /api/v1/insights
///
/// Runs the pattern rules over the logs in the requested window. Cycle
/// statistics come from the full period history, not just the window.
pub async fn get_insights(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AnalysisParams>,
) -> ApiResult<Json<InsightsResponse>> {
    let range = resolve_range(&params, state.analysis.default_range_days)?;

    let logs = state.journal.daily_logs(range)?;
    let periods = state.journal.cycle_periods()?;
    let stats = compute_cycle_stats(&periods, state.analysis.cycle_window);
    let report = analyze_patterns(&logs, &stats);

    tracing::info!(
        start = %range.start,
        end = %range.end,
        logs = logs.len(),
        insights = report.insights.len(),
        "Generated insights"
    );

    Ok(Json(InsightsResponse {
        insights: report.insights,
        range,
        log_count: logs.len(),
    }))
}
