//! Cycle Statistics
//!
//! Derives cycle and period length statistics from a recency-ordered list of
//! period intervals, plus a small outlook (current cycle day, next expected
//! start) that takes "today" as an explicit argument.

use crate::analytics::phase::{cycle_day, CyclePhase};
use crate::analytics::types::{CyclePeriod, CycleStats};
use chrono::{Duration, NaiveDate};

/// Default number of most recent periods considered
pub const DEFAULT_CYCLE_WINDOW: usize = 12;

/// Compute cycle statistics from periods ordered most-recent-first
///
/// Only the first `window` periods are used. Cycle lengths are the day gaps
/// between consecutive start dates, in input order; gaps are not clamped, so
/// misordered input shows up as zero or negative lengths. An open period
/// contributes a gap but no period length.
///
/// With fewer than two periods the result is the empty `CycleStats`.
pub fn compute_cycle_stats(periods: &[CyclePeriod], window: usize) -> CycleStats {
    let recent = &periods[..periods.len().min(window)];

    if recent.len() < 2 {
        tracing::debug!(periods = periods.len(), "Not enough periods for cycle stats");
        return CycleStats::default();
    }

    let cycle_lengths: Vec<i64> = recent
        .windows(2)
        .map(|w| days_between(w[0].start_date, w[1].start_date))
        .collect();

    let period_lengths: Vec<i64> = recent.iter().filter_map(|p| p.length()).collect();

    let stats = CycleStats {
        average_cycle_length: rounded_mean(&cycle_lengths),
        average_period_length: rounded_mean(&period_lengths),
        cycle_lengths,
        cycles: recent.to_vec(),
    };

    tracing::debug!(
        cycles = stats.cycles.len(),
        average_cycle_length = ?stats.average_cycle_length,
        average_period_length = ?stats.average_period_length,
        "Computed cycle stats"
    );

    stats
}

/// Whole calendar days from `earlier` to `later`
fn days_between(later: NaiveDate, earlier: NaiveDate) -> i64 {
    (later - earlier).num_days()
}

fn rounded_mean(values: &[i64]) -> Option<i64> {
    if values.is_empty() {
        return None;
    }
    let mean = values.iter().sum::<i64>() as f64 / values.len() as f64;
    Some(mean.round() as i64)
}

impl CycleStats {
    /// Number of closed periods in the window
    pub fn closed_cycle_count(&self) -> usize {
        self.cycles.iter().filter(|c| c.is_closed()).count()
    }

    /// Start date of the most recent cycle, independent of list order
    pub fn latest_cycle_start(&self) -> Option<NaiveDate> {
        self.cycles.iter().map(|c| c.start_date).max()
    }

    /// 1-based day of the current cycle on `today`
    ///
    /// `None` without cycles or when `today` precedes the latest start.
    pub fn current_cycle_day(&self, today: NaiveDate) -> Option<i64> {
        let start = self.latest_cycle_start()?;
        let day = cycle_day(start, today);
        (day >= 1).then_some(day)
    }

    /// Phase of the current cycle on `today`
    pub fn current_phase(&self, today: NaiveDate) -> Option<CyclePhase> {
        self.current_cycle_day(today)
            .and_then(CyclePhase::from_cycle_day)
    }

    /// Latest start plus the average cycle length
    pub fn predicted_next_start(&self) -> Option<NaiveDate> {
        let start = self.latest_cycle_start()?;
        let avg = self.average_cycle_length?;
        start.checked_add_signed(Duration::try_days(avg)?)
    }

    pub fn shortest_cycle(&self) -> Option<i64> {
        self.cycle_lengths.iter().copied().min()
    }

    pub fn longest_cycle(&self) -> Option<i64> {
        self.cycle_lengths.iter().copied().max()
    }
}
