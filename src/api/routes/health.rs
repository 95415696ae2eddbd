//! Health Routes
//!
//! Health check endpoints for monitoring and orchestrators.
//!
//! - GET /health/live - Liveness check (process is alive)
//! - GET /health/ready - Readiness check (journal is readable)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
///
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Returns 200 once the journal source answers.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    if check_journal_health(&state) {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /health
///
/// Full health status with component details.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let journal_ok = check_journal_health(&state);

    Json(HealthResponse {
        status: if journal_ok { "healthy" } else { "unhealthy" }.to_string(),
        journal: if journal_ok { "ok" } else { "error" }.to_string(),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

fn check_journal_health(state: &AppState) -> bool {
    match state.journal.cycle_periods() {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Journal health check failed");
            false
        }
    }
}
