//! Journal Boundary
//!
//! The analytics core only sees typed, validated records. This module is where
//! raw journal data becomes those records:
//!
//! - **JournalSource**: the collaborator trait the API and CLI read through
//! - **Journal**: in-memory journal, loaded from a JSON file
//! - **validate**: record checks applied once on load
//! - **flow**: derive cycle periods from daily flow entries
//! - **csv_import**: import daily logs from CSV
//! - **error**: error types

pub mod csv_import;
pub mod error;
pub mod flow;
pub mod validate;

pub use csv_import::{CsvImportResult, CsvLogImporter};
pub use error::{JournalError, JournalResult};
pub use flow::periods_from_flow;
pub use validate::validate;

use crate::analytics::{CyclePeriod, DailyLog};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Inclusive calendar date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range, returning None if start is after end
    pub fn try_new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        if start <= end {
            Some(Self { start, end })
        } else {
            None
        }
    }

    /// The last `days` days up to and including `today`
    ///
    /// `None` when the start would fall outside the representable calendar.
    pub fn last_days(days: i64, today: NaiveDate) -> Option<Self> {
        let start = Duration::try_days(days.max(1) - 1)
            .and_then(|span| today.checked_sub_signed(span))?;
        Some(Self { start, end: today })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of calendar days covered
    pub fn day_count(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Source of journal records consumed by the analytics layer
pub trait JournalSource: Send + Sync {
    /// Daily logs within the range, ascending by date
    fn daily_logs(&self, range: DateRange) -> JournalResult<Vec<DailyLog>>;

    /// All cycle periods, most recent first
    fn cycle_periods(&self) -> JournalResult<Vec<CyclePeriod>>;
}

/// On-disk journal layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JournalFile {
    #[serde(default)]
    pub logs: Vec<DailyLog>,
    #[serde(default)]
    pub periods: Vec<CyclePeriod>,
}

/// Validated in-memory journal
#[derive(Debug, Clone, Default)]
pub struct Journal {
    /// Ascending by date
    logs: Vec<DailyLog>,
    /// Most recent first
    periods: Vec<CyclePeriod>,
}

impl Journal {
    /// Validate and index records
    pub fn new(mut logs: Vec<DailyLog>, mut periods: Vec<CyclePeriod>) -> JournalResult<Self> {
        validate(&logs, &periods)?;

        logs.sort_by_key(|log| log.date);
        periods.sort_by(|a, b| b.start_date.cmp(&a.start_date));

        Ok(Self { logs, periods })
    }

    /// Load a journal from a JSON file
    pub fn load(path: &Path) -> JournalResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let file: JournalFile = serde_json::from_str(&content)?;
        let journal = Self::new(file.logs, file.periods)?;

        tracing::info!(
            path = ?path,
            logs = journal.logs.len(),
            periods = journal.periods.len(),
            "Loaded journal"
        );

        Ok(journal)
    }

    /// Write the journal to a JSON file
    pub fn save(&self, path: &Path) -> JournalResult<()> {
        let file = JournalFile {
            logs: self.logs.clone(),
            periods: self.periods.clone(),
        };
        let content = serde_json::to_string_pretty(&file)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn logs(&self) -> &[DailyLog] {
        &self.logs
    }

    pub fn periods(&self) -> &[CyclePeriod] {
        &self.periods
    }

    /// Range from the first to the last logged date
    pub fn date_span(&self) -> Option<DateRange> {
        let first = self.logs.first()?;
        let last = self.logs.last()?;
        DateRange::try_new(first.date, last.date)
    }
}

impl JournalSource for Journal {
    fn daily_logs(&self, range: DateRange) -> JournalResult<Vec<DailyLog>> {
        Ok(self
            .logs
            .iter()
            .filter(|log| range.contains(log.date))
            .cloned()
            .collect())
    }

    fn cycle_periods(&self) -> JournalResult<Vec<CyclePeriod>> {
        Ok(self.periods.clone())
    }
}
