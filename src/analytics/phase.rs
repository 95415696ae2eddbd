//! Cycle-Phase Classifier
//!
//! Maps a day offset within a cycle to one of four phases and aggregates
//! symptom counts per phase.

use crate::analytics::types::DailyLog;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Last cycle day that is still classified
pub const MAX_CYCLE_DAY: i64 = 35;

/// Named sub-interval of a cycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum CyclePhase {
    /// Days 1-5
    Menstrual,
    /// Days 6-13
    Follicular,
    /// Days 14-16
    Ovulation,
    /// Days 17-35
    Luteal,
}

impl CyclePhase {
    /// Get all phases in cycle order
    pub fn all() -> &'static [CyclePhase] {
        &[
            CyclePhase::Menstrual,
            CyclePhase::Follicular,
            CyclePhase::Ovulation,
            CyclePhase::Luteal,
        ]
    }

    /// Classify a 1-based cycle day; `None` outside 1..=35
    pub fn from_cycle_day(day: i64) -> Option<Self> {
        match day {
            1..=5 => Some(CyclePhase::Menstrual),
            6..=13 => Some(CyclePhase::Follicular),
            14..=16 => Some(CyclePhase::Ovulation),
            17..=MAX_CYCLE_DAY => Some(CyclePhase::Luteal),
            _ => None,
        }
    }

    /// Name used in insight text
    pub fn label(&self) -> &'static str {
        match self {
            CyclePhase::Menstrual => "menstrual",
            CyclePhase::Follicular => "follicular",
            CyclePhase::Ovulation => "ovulation",
            CyclePhase::Luteal => "luteal",
        }
    }
}

impl std::fmt::Display for CyclePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 1-based day offset of `date` within a cycle starting at `cycle_start`
///
/// The cycle start itself is day 1. Dates before the start give values <= 0.
pub fn cycle_day(cycle_start: NaiveDate, date: NaiveDate) -> i64 {
    (date - cycle_start).num_days() + 1
}

/// Phase of `date` relative to `cycle_start`, if within the classified range
pub fn phase_for_date(cycle_start: NaiveDate, date: NaiveDate) -> Option<CyclePhase> {
    CyclePhase::from_cycle_day(cycle_day(cycle_start, date))
}

/// Symptom totals for one phase
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct PhaseSummary {
    pub phase: CyclePhase,
    /// Number of logs that fell into this phase
    pub logged_days: usize,
    pub total_symptoms: usize,
    /// `total_symptoms / logged_days`, 0 when nothing was logged
    pub mean_symptoms: f64,
}

/// Aggregate symptom counts per phase for logs relative to `cycle_start`
///
/// Always returns the four phases in cycle order. Logs outside days 1-35 are
/// skipped.
pub fn phase_symptom_summary(logs: &[DailyLog], cycle_start: NaiveDate) -> Vec<PhaseSummary> {
    let mut days = [0usize; 4];
    let mut symptoms = [0usize; 4];

    for log in logs {
        if let Some(phase) = phase_for_date(cycle_start, log.date) {
            let idx = phase_index(phase);
            days[idx] += 1;
            symptoms[idx] += log.symptom_count();
        }
    }

    CyclePhase::all()
        .iter()
        .map(|&phase| {
            let idx = phase_index(phase);
            PhaseSummary {
                phase,
                logged_days: days[idx],
                total_symptoms: symptoms[idx],
                mean_symptoms: if days[idx] == 0 {
                    0.0
                } else {
                    symptoms[idx] as f64 / days[idx] as f64
                },
            }
        })
        .collect()
}

fn phase_index(phase: CyclePhase) -> usize {
    match phase {
        CyclePhase::Menstrual => 0,
        CyclePhase::Follicular => 1,
        CyclePhase::Ovulation => 2,
        CyclePhase::Luteal => 3,
    }
}
