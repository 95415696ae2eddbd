//! API Routes
//!
//! Route handlers organized by functionality.

pub mod correlations;
pub mod cycles;
pub mod health;
pub mod insights;
pub mod trends;

use chrono::{NaiveDate, Utc};

use crate::api::dto::AnalysisParams;
use crate::api::error::{ApiError, ApiResult};
use crate::journal::DateRange;

/// Smallest analysis window accepted by the log-based endpoints
pub const MIN_RANGE_DAYS: i64 = 7;

/// Largest analysis window accepted by the log-based endpoints
pub const MAX_RANGE_DAYS: i64 = 365;

/// Reference date for a request, falling back to the current UTC date
pub(crate) fn resolve_today(today: Option<NaiveDate>) -> NaiveDate {
    today.unwrap_or_else(|| Utc::now().date_naive())
}

/// Turn `days`/`today` query parameters into the date range to analyze
pub(crate) fn resolve_range(params: &AnalysisParams, default_days: i64) -> ApiResult<DateRange> {
    let days = params.days.unwrap_or(default_days);
    if !(MIN_RANGE_DAYS..=MAX_RANGE_DAYS).contains(&days) {
        return Err(ApiError::Validation(format!(
            "days must be between {} and {}",
            MIN_RANGE_DAYS, MAX_RANGE_DAYS
        )));
    }

    let today = resolve_today(params.today);
    DateRange::last_days(days, today).ok_or_else(|| {
        ApiError::Validation(format!("{} days before {} is out of range", days, today))
    })
}
