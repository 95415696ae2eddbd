//! Trend Engine
//!
//! Compares the second half of a journal window to the first half for mood,
//! energy and daily symptom count.

use crate::analytics::types::{AnalyzedPeriod, DailyLog, TrendSummary};

/// Minimum number of logs before trends are computed
pub const MIN_TREND_LOGS: usize = 7;

/// Calculate first-half vs. second-half deltas
///
/// Returns `None` with fewer than 7 logs. Logs are sorted by date first; the
/// first half gets `n / 2` logs. Missing mood and energy values are left out of
/// both numerator and denominator, while a log without symptoms counts as zero
/// symptoms.
pub fn trends(logs: &[DailyLog]) -> Option<TrendSummary> {
    if logs.len() < MIN_TREND_LOGS {
        tracing::debug!(logs = logs.len(), "Not enough logs for trends");
        return None;
    }

    let mut sorted: Vec<&DailyLog> = logs.iter().collect();
    sorted.sort_by_key(|log| log.date);

    let mid = sorted.len() / 2;
    let (first, second) = sorted.split_at(mid);

    let mood_trend = field_delta(first, second, |log| log.mood_overall);
    let energy_trend = field_delta(first, second, |log| log.mood_energy);
    let symptom_trend = mean_symptoms(second) - mean_symptoms(first);

    let analyzed_period = AnalyzedPeriod {
        start: sorted[0].date,
        end: sorted[sorted.len() - 1].date,
        day_count: sorted.len(),
    };

    tracing::debug!(
        logs = sorted.len(),
        mood_trend = ?mood_trend,
        energy_trend = ?energy_trend,
        symptom_trend,
        "Computed trends"
    );

    Some(TrendSummary {
        mood_trend,
        energy_trend,
        symptom_trend,
        analyzed_period,
    })
}

fn field_delta<F>(first: &[&DailyLog], second: &[&DailyLog], field: F) -> Option<f64>
where
    F: Fn(&DailyLog) -> Option<u8>,
{
    let before = present_mean(first, &field)?;
    let after = present_mean(second, &field)?;
    Some(after - before)
}

fn present_mean<F>(logs: &[&DailyLog], field: &F) -> Option<f64>
where
    F: Fn(&DailyLog) -> Option<u8>,
{
    let values: Vec<f64> = logs.iter().filter_map(|log| field(*log)).map(f64::from).collect();
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

fn mean_symptoms(logs: &[&DailyLog]) -> f64 {
    if logs.is_empty() {
        return 0.0;
    }
    logs.iter().map(|log| log.symptom_count()).sum::<usize>() as f64 / logs.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn day(offset: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap() + Duration::days(offset)
    }

    #[test]
    fn test_requires_seven_logs() {
        let logs: Vec<DailyLog> = (0..6).map(|i| DailyLog::new(day(i)).mood(5)).collect();
        assert!(trends(&logs).is_none());
    }

    #[test]
    fn test_seven_logs_split_three_four() {
        // First three days mood 4, last four days mood 8
        let logs: Vec<DailyLog> = (0..7)
            .map(|i| DailyLog::new(day(i)).mood(if i < 3 { 4 } else { 8 }))
            .collect();

        let summary = trends(&logs).unwrap();
        assert_eq!(summary.mood_trend, Some(4.0));
        assert_eq!(summary.analyzed_period.day_count, 7);
        assert_eq!(summary.analyzed_period.start, day(0));
        assert_eq!(summary.analyzed_period.end, day(6));
    }

    #[test]
    fn test_sorts_caller_order() {
        let mut logs: Vec<DailyLog> = (0..8)
            .map(|i| DailyLog::new(day(i)).energy(if i < 4 { 7 } else { 3 }))
            .collect();
        logs.reverse();

        let summary = trends(&logs).unwrap();
        assert_eq!(summary.energy_trend, Some(-4.0));
        assert_eq!(summary.analyzed_period.start, day(0));
    }

    #[test]
    fn test_missing_mood_excluded_not_zeroed() {
        let logs: Vec<DailyLog> = (0..8)
            .map(|i| {
                let log = DailyLog::new(day(i));
                // Only one mood value per half
                match i {
                    0 => log.mood(6),
                    5 => log.mood(7),
                    _ => log,
                }
            })
            .collect();

        let summary = trends(&logs).unwrap();
        assert_eq!(summary.mood_trend, Some(1.0));
        assert_eq!(summary.energy_trend, None);
    }

    #[test]
    fn test_half_without_values_gives_none() {
        let logs: Vec<DailyLog> = (0..8)
            .map(|i| {
                let log = DailyLog::new(day(i));
                if i >= 4 {
                    log.mood(5)
                } else {
                    log
                }
            })
            .collect();

        assert_eq!(trends(&logs).unwrap().mood_trend, None);
    }

    #[test]
    fn test_symptom_trend_counts_empty_logs_as_zero() {
        let logs: Vec<DailyLog> = (0..8)
            .map(|i| {
                let log = DailyLog::new(day(i));
                if i >= 4 {
                    log.symptom("cramps", 2).symptom("fatigue", 1)
                } else if i == 0 {
                    log.symptom("cramps", 2)
                } else {
                    log
                }
            })
            .collect();

        // First half: 1 symptom / 4 days, second half: 8 / 4
        let summary = trends(&logs).unwrap();
        assert!((summary.symptom_trend - 1.75).abs() < 1e-9);
    }

    #[test]
    fn test_idempotent() {
        let logs: Vec<DailyLog> = (0..10)
            .map(|i| DailyLog::new(day(i)).mood((i % 10) as u8 + 1))
            .collect();
        assert_eq!(trends(&logs), trends(&logs));
    }
}
