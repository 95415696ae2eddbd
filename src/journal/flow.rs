//! Period derivation from flow entries
//!
//! Journals imported from CSV only carry a per-day flow level. Runs of
//! consecutive flow days become cycle periods.

use crate::analytics::{CyclePeriod, DailyLog, FlowLevel};
use chrono::NaiveDate;

/// Derive periods from runs of consecutive days with recorded flow
///
/// A run made up only of spotting days is not a period. A run whose last day
/// is `today` is still ongoing and comes back open. Result is most recent
/// first.
pub fn periods_from_flow(logs: &[DailyLog], today: NaiveDate) -> Vec<CyclePeriod> {
    let mut flow_days: Vec<(NaiveDate, FlowLevel)> = logs
        .iter()
        .filter(|log| log.period_flow.is_flowing())
        .map(|log| (log.date, log.period_flow))
        .collect();
    flow_days.sort_by_key(|(date, _)| *date);
    flow_days.dedup_by_key(|(date, _)| *date);

    let mut periods = Vec::new();
    let mut run: Option<Run> = None;

    for (date, flow) in flow_days {
        if let Some(current) = run.as_mut().filter(|r| r.end.succ_opt() == Some(date)) {
            current.end = date;
            current.bleeding |= flow != FlowLevel::Spotting;
            continue;
        }

        if let Some(finished) = run.take() {
            periods.extend(finished.into_period(today));
        }
        run = Some(Run {
            start: date,
            end: date,
            bleeding: flow != FlowLevel::Spotting,
        });
    }
    if let Some(finished) = run {
        periods.extend(finished.into_period(today));
    }

    periods.reverse();
    periods
}

struct Run {
    start: NaiveDate,
    end: NaiveDate,
    /// Any day heavier than spotting
    bleeding: bool,
}

impl Run {
    fn into_period(self, today: NaiveDate) -> Option<CyclePeriod> {
        if !self.bleeding {
            return None;
        }
        if self.end == today {
            Some(CyclePeriod::open(self.start))
        } else {
            Some(CyclePeriod::new(self.start, self.end))
        }
    }
}
