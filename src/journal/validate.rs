//! Record validation
//!
//! Checks applied once when a journal is built, so analytics can assume
//! well-formed input. Every problem found is reported, not just the first.

use crate::analytics::{CyclePeriod, DailyLog};
use crate::journal::error::{JournalError, JournalResult};
use std::collections::HashSet;

/// Validate logs and periods together
pub fn validate(logs: &[DailyLog], periods: &[CyclePeriod]) -> JournalResult<()> {
    let mut issues = Vec::new();
    validate_logs(logs, &mut issues);
    validate_periods(periods, &mut issues);

    if issues.is_empty() {
        Ok(())
    } else {
        tracing::warn!(issues = issues.len(), "Journal validation failed");
        Err(JournalError::Invalid(issues))
    }
}

fn validate_logs(logs: &[DailyLog], issues: &mut Vec<String>) {
    let mut seen_dates = HashSet::new();

    for log in logs {
        let date = log.date;

        if !seen_dates.insert(date) {
            issues.push(format!("{}: duplicate date", date));
        }

        for (name, value) in [
            ("mood_overall", log.mood_overall),
            ("mood_anxiety", log.mood_anxiety),
            ("mood_energy", log.mood_energy),
        ] {
            if let Some(v) = value {
                if !(1..=10).contains(&v) {
                    issues.push(format!("{}: {} {} outside 1-10", date, name, v));
                }
            }
        }

        if let Some(q) = log.sleep_quality {
            if !(1..=5).contains(&q) {
                issues.push(format!("{}: sleep_quality {} outside 1-5", date, q));
            }
        }

        if let Some(hours) = log.sleep_hours {
            if !hours.is_finite() || hours < 0.0 {
                issues.push(format!("{}: sleep_hours {} must be non-negative", date, hours));
            }
        }

        let mut seen_symptoms = HashSet::new();
        for symptom in &log.symptoms {
            if symptom.symptom_id.trim().is_empty() {
                issues.push(format!("{}: empty symptom id", date));
            } else if !seen_symptoms.insert(symptom.symptom_id.as_str()) {
                issues.push(format!("{}: symptom {} logged twice", date, symptom.symptom_id));
            }
            if !(1..=5).contains(&symptom.severity) {
                issues.push(format!(
                    "{}: symptom {} severity {} outside 1-5",
                    date, symptom.symptom_id, symptom.severity
                ));
            }
        }
    }
}

fn validate_periods(periods: &[CyclePeriod], issues: &mut Vec<String>) {
    let open = periods.iter().filter(|p| !p.is_closed()).count();
    if open > 1 {
        issues.push(format!("{} periods are open, at most one allowed", open));
    }

    for period in periods {
        if let Some(end) = period.end_date {
            if end < period.start_date {
                issues.push(format!(
                    "period starting {} ends before it starts ({})",
                    period.start_date, end
                ));
            }
        }
    }

    let mut sorted: Vec<&CyclePeriod> = periods.iter().collect();
    sorted.sort_by_key(|p| p.start_date);

    for pair in sorted.windows(2) {
        let (earlier, later) = (pair[0], pair[1]);
        if earlier.contains(later.start_date) {
            issues.push(format!(
                "period starting {} overlaps period starting {}",
                later.start_date, earlier.start_date
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn issues(logs: &[DailyLog], periods: &[CyclePeriod]) -> Vec<String> {
        match validate(logs, periods) {
            Ok(()) => Vec::new(),
            Err(JournalError::Invalid(issues)) => issues,
            Err(e) => panic!("unexpected error: {}", e),
        }
    }

    #[test]
    fn test_valid_journal() {
        let logs = vec![
            DailyLog::new(date(2024, 1, 1)).mood(5).anxiety(3).energy(7).sleep(7.5, 4),
            DailyLog::new(date(2024, 1, 2)).symptom("cramps", 5).symptom("fatigue", 1),
        ];
        let periods = vec![
            CyclePeriod::open(date(2024, 1, 29)),
            CyclePeriod::new(date(2024, 1, 1), date(2024, 1, 5)),
        ];
        assert!(validate(&logs, &periods).is_ok());
    }

    #[test]
    fn test_log_issues_are_collected() {
        let logs = vec![
            DailyLog::new(date(2024, 1, 1)).mood(0),
            DailyLog::new(date(2024, 1, 1)).sleep(-1.0, 6),
            DailyLog::new(date(2024, 1, 2)).symptom("cramps", 2).symptom("cramps", 9),
        ];

        let found = issues(&logs, &[]);
        assert_eq!(found.len(), 6);
        assert!(found.iter().any(|i| i.contains("duplicate date")));
        assert!(found.iter().any(|i| i.contains("mood_overall 0")));
        assert!(found.iter().any(|i| i.contains("sleep_quality 6")));
        assert!(found.iter().any(|i| i.contains("sleep_hours -1")));
        assert!(found.iter().any(|i| i.contains("logged twice")));
        assert!(found.iter().any(|i| i.contains("severity 9")));
    }

    #[test]
    fn test_period_issues() {
        let periods = vec![
            CyclePeriod::open(date(2024, 3, 1)),
            CyclePeriod::open(date(2024, 2, 1)),
            CyclePeriod::new(date(2024, 1, 10), date(2024, 1, 5)),
        ];

        let found = issues(&[], &periods);
        assert!(found.iter().any(|i| i.contains("2 periods are open")));
        assert!(found.iter().any(|i| i.contains("ends before it starts")));
        // The open February period runs into March
        assert!(found.iter().any(|i| i.contains("overlaps")));
    }

    #[test]
    fn test_overlapping_closed_periods() {
        let periods = vec![
            CyclePeriod::new(date(2024, 1, 1), date(2024, 1, 6)),
            CyclePeriod::new(date(2024, 1, 6), date(2024, 1, 9)),
        ];
        assert_eq!(issues(&[], &periods).len(), 1);
    }
}
