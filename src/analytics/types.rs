//! Core data types for the analytics engine
//!
//! This module defines the records the analytics functions consume and produce:
//! - `DailyLog`: one journal entry per calendar date
//! - `CyclePeriod`: a contiguous menstrual interval
//! - `CycleStats`: derived cycle and period length statistics
//! - `Insight`, `SymptomCorrelation`, `TrendSummary`: analysis output

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Menstrual flow recorded on a given day
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FlowLevel {
    #[default]
    None,
    Spotting,
    Light,
    Medium,
    Heavy,
}

impl FlowLevel {
    /// Whether any bleeding was recorded
    pub fn is_flowing(&self) -> bool {
        !matches!(self, FlowLevel::None)
    }
}

impl std::fmt::Display for FlowLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlowLevel::None => write!(f, "none"),
            FlowLevel::Spotting => write!(f, "spotting"),
            FlowLevel::Light => write!(f, "light"),
            FlowLevel::Medium => write!(f, "medium"),
            FlowLevel::Heavy => write!(f, "heavy"),
        }
    }
}

impl std::str::FromStr for FlowLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" => Ok(FlowLevel::None),
            "spotting" => Ok(FlowLevel::Spotting),
            "light" => Ok(FlowLevel::Light),
            "medium" => Ok(FlowLevel::Medium),
            "heavy" => Ok(FlowLevel::Heavy),
            other => Err(format!("unknown flow level: {}", other)),
        }
    }
}

/// A symptom logged on a given day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggedSymptom {
    /// Symptom identifier (e.g., "cramps", "fatigue")
    pub symptom_id: String,
    /// Severity from 1 (mild) to 5 (severe)
    pub severity: u8,
}

impl LoggedSymptom {
    pub fn new(symptom_id: impl Into<String>, severity: u8) -> Self {
        Self {
            symptom_id: symptom_id.into(),
            severity,
        }
    }
}

/// One journal entry per calendar date
///
/// Every field except `date` is optional: a log may carry only a flow entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyLog {
    /// Calendar date (unique key)
    pub date: NaiveDate,
    #[serde(default)]
    pub period_flow: FlowLevel,
    /// Overall mood, 1-10
    #[serde(default)]
    pub mood_overall: Option<u8>,
    /// Anxiety, 1-10
    #[serde(default)]
    pub mood_anxiety: Option<u8>,
    /// Energy, 1-10
    #[serde(default)]
    pub mood_energy: Option<u8>,
    /// Hours slept the night before
    #[serde(default)]
    pub sleep_hours: Option<f64>,
    /// Sleep quality, 1-5
    #[serde(default)]
    pub sleep_quality: Option<u8>,
    #[serde(default)]
    pub symptoms: Vec<LoggedSymptom>,
}

impl DailyLog {
    /// Create an empty log for a date
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            period_flow: FlowLevel::None,
            mood_overall: None,
            mood_anxiety: None,
            mood_energy: None,
            sleep_hours: None,
            sleep_quality: None,
            symptoms: Vec::new(),
        }
    }

    /// Builder: set period flow
    pub fn flow(mut self, flow: FlowLevel) -> Self {
        self.period_flow = flow;
        self
    }

    /// Builder: set overall mood
    pub fn mood(mut self, mood: u8) -> Self {
        self.mood_overall = Some(mood);
        self
    }

    /// Builder: set anxiety
    pub fn anxiety(mut self, anxiety: u8) -> Self {
        self.mood_anxiety = Some(anxiety);
        self
    }

    /// Builder: set energy
    pub fn energy(mut self, energy: u8) -> Self {
        self.mood_energy = Some(energy);
        self
    }

    /// Builder: set sleep duration and quality
    pub fn sleep(mut self, hours: f64, quality: u8) -> Self {
        self.sleep_hours = Some(hours);
        self.sleep_quality = Some(quality);
        self
    }

    /// Builder: add a symptom
    pub fn symptom(mut self, symptom_id: impl Into<String>, severity: u8) -> Self {
        self.symptoms.push(LoggedSymptom::new(symptom_id, severity));
        self
    }

    /// Number of symptoms logged on this day
    pub fn symptom_count(&self) -> usize {
        self.symptoms.len()
    }

    /// Check if a symptom was logged on this day
    pub fn has_symptom(&self, symptom_id: &str) -> bool {
        self.symptoms.iter().any(|s| s.symptom_id == symptom_id)
    }
}

/// A contiguous menstrual interval
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CyclePeriod {
    pub start_date: NaiveDate,
    /// `None` while the period is still ongoing
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl CyclePeriod {
    /// A closed period
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date: Some(end_date),
        }
    }

    /// An ongoing period
    pub fn open(start_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date: None,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.end_date.is_some()
    }

    /// Length in days, counting both ends; `None` while open
    pub fn length(&self) -> Option<i64> {
        self.end_date
            .map(|end| (end - self.start_date).num_days() + 1)
    }

    /// Whether the period covers a date (open periods extend indefinitely)
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && self.end_date.map(|end| date <= end).unwrap_or(true)
    }
}

/// Cycle and period length statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CycleStats {
    /// `None` with fewer than two periods
    pub average_cycle_length: Option<i64>,
    /// `None` when no period has a recorded length
    pub average_period_length: Option<i64>,
    /// Gaps between consecutive period starts, same order as `cycles`
    pub cycle_lengths: Vec<i64>,
    /// Periods the statistics were computed from, in source order
    pub cycles: Vec<CyclePeriod>,
}

/// Tag naming the icon an insight is shown with
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum InsightIcon {
    Information,
    Calendar,
    Sleep,
    Emoticon,
    Water,
}

impl std::fmt::Display for InsightIcon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InsightIcon::Information => write!(f, "information"),
            InsightIcon::Calendar => write!(f, "calendar"),
            InsightIcon::Sleep => write!(f, "sleep"),
            InsightIcon::Emoticon => write!(f, "emoticon"),
            InsightIcon::Water => write!(f, "water"),
        }
    }
}

/// A human-readable observation about the journal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Insight {
    pub icon: InsightIcon,
    pub text: String,
}

impl Insight {
    pub fn new(icon: InsightIcon, text: impl Into<String>) -> Self {
        Self {
            icon,
            text: text.into(),
        }
    }
}

/// Co-occurrence strength between two symptoms
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SymptomCorrelation {
    /// Lexicographically smaller symptom id
    pub symptom_a: String,
    pub symptom_b: String,
    /// `count / min(total_a, total_b)`, in (0, 1]
    pub correlation: f64,
    /// Number of logs containing both symptoms
    pub co_occurrence_count: usize,
}

/// Date span a trend was computed over
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalyzedPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Number of logs analyzed
    pub day_count: usize,
}

/// Second-half minus first-half deltas
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendSummary {
    pub mood_trend: Option<f64>,
    pub energy_trend: Option<f64>,
    pub symptom_trend: f64,
    pub analyzed_period: AnalyzedPeriod,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_period_length() {
        let closed = CyclePeriod::new(date(2024, 3, 1), date(2024, 3, 5));
        assert_eq!(closed.length(), Some(5));

        let open = CyclePeriod::open(date(2024, 3, 29));
        assert_eq!(open.length(), None);
        assert!(!open.is_closed());
        assert!(open.contains(date(2024, 4, 10)));
    }

    #[test]
    fn test_daily_log_builder() {
        let log = DailyLog::new(date(2024, 1, 15))
            .mood(7)
            .sleep(7.5, 4)
            .symptom("cramps", 3)
            .symptom("fatigue", 2);

        assert_eq!(log.symptom_count(), 2);
        assert!(log.has_symptom("fatigue"));
        assert!(!log.has_symptom("headache"));
        assert_eq!(log.sleep_quality, Some(4));
    }

    #[test]
    fn test_daily_log_deserializes_sparse_entry() {
        let json = r#"{"date": "2024-01-15", "period_flow": "heavy"}"#;
        let log: DailyLog = serde_json::from_str(json).unwrap();

        assert_eq!(log.period_flow, FlowLevel::Heavy);
        assert!(log.symptoms.is_empty());
        assert_eq!(log.mood_overall, None);
    }

    #[test]
    fn test_insight_icon_serializes_as_tag() {
        let insight = Insight::new(InsightIcon::Information, "Keep logging");
        let json = serde_json::to_string(&insight).unwrap();
        assert!(json.contains("\"icon\":\"information\""));
    }

    #[test]
    fn test_flow_level_parse() {
        assert_eq!("Heavy".parse::<FlowLevel>(), Ok(FlowLevel::Heavy));
        assert_eq!("".parse::<FlowLevel>(), Ok(FlowLevel::None));
        assert!("gushing".parse::<FlowLevel>().is_err());
        assert!(FlowLevel::Spotting.is_flowing());
    }
}
