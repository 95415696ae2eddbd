//! Cycle Routes
//!
//! - GET /api/v1/cycles - Cycle statistics and outlook

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::analytics::compute_cycle_stats;
use crate::api::dto::{CycleParams, CyclesResponse};
use crate::api::error::ApiResult;
use crate::api::routes::resolve_today;
use crate::api::state::AppState;

/// GET /api/v1/cycles
pub async fn get_cycles(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CycleParams>,
) -> ApiResult<Json<CyclesResponse>> {
    let today = resolve_today(params.today);

    let periods = state.journal.cycle_periods()?;
    let stats = compute_cycle_stats(&periods, state.analysis.cycle_window);

    Ok(Json(CyclesResponse {
        today,
        current_cycle_day: stats.current_cycle_day(today),
        current_phase: stats.current_phase(today),
        predicted_next_start: stats.predicted_next_start(),
        shortest_cycle: stats.shortest_cycle(),
        longest_cycle: stats.longest_cycle(),
        stats,
    }))
}
