//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use crate::analytics::{CyclePhase, CycleStats, Insight, SymptomCorrelation, TrendSummary};
use crate::journal::DateRange;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================
// ANALYSIS DTOs
// ============================================

/// Query parameters shared by the log-based analysis endpoints
#[derive(Debug, Default, Deserialize)]
pub struct AnalysisParams {
    /// Number of days to analyze, ending at `today`
    #[serde(default)]
    pub days: Option<i64>,
    /// Reference date, defaults to the server's current UTC date
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

/// Pattern insights response
#[derive(Debug, Serialize)]
pub struct InsightsResponse {
    pub insights: Vec<Insight>,
    pub range: DateRange,
    pub log_count: usize,
}

/// Symptom correlations response
#[derive(Debug, Serialize)]
pub struct CorrelationsResponse {
    pub correlations: Vec<SymptomCorrelation>,
    pub range: DateRange,
    pub log_count: usize,
}

/// Trends response; `trend` is null below the data floor
#[derive(Debug, Serialize)]
pub struct TrendsResponse {
    pub trend: Option<TrendSummary>,
    pub range: DateRange,
    pub log_count: usize,
}

// ============================================
// CYCLE DTOs
// ============================================

/// Cycle query parameters
#[derive(Debug, Default, Deserialize)]
pub struct CycleParams {
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

/// Cycle statistics with the outlook for `today`
#[derive(Debug, Serialize)]
pub struct CyclesResponse {
    #[serde(flatten)]
    pub stats: CycleStats,
    pub today: NaiveDate,
    pub current_cycle_day: Option<i64>,
    pub current_phase: Option<CyclePhase>,
    pub predicted_next_start: Option<NaiveDate>,
    pub shortest_cycle: Option<i64>,
    pub longest_cycle: Option<i64>,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: "healthy" or "unhealthy"
    pub status: String,
    /// Journal status: "ok" or "error"
    pub journal: String,
    pub uptime_seconds: u64,
    pub version: String,
}
