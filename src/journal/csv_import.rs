//! CSV Import
//!
//! Imports daily logs from CSV exports. Columns are matched by header name, so
//! column order and extra columns don't matter. Recognized headers:
//!
//! | header                      | field           |
//! |-----------------------------|-----------------|
//! | `date`                      | `date`          |
//! | `flow`, `period_flow`       | `period_flow`   |
//! | `mood`, `mood_overall`      | `mood_overall`  |
//! | `anxiety`, `mood_anxiety`   | `mood_anxiety`  |
//! | `energy`, `mood_energy`     | `mood_energy`   |
//! | `sleep_hours`, `sleep`      | `sleep_hours`   |
//! | `sleep_quality`             | `sleep_quality` |
//! | `symptoms`                  | `symptoms`      |
//!
//! Symptoms are written as `id:severity` pairs separated by `;`
//! (e.g. `cramps:3;fatigue:2`).

use crate::analytics::{DailyLog, FlowLevel, LoggedSymptom};
use crate::journal::error::{JournalError, JournalResult};
use chrono::NaiveDate;
use std::io::Read;
use std::path::Path;

/// Maximum number of row errors kept in a result
const MAX_ERRORS: usize = 100;

/// CSV daily-log importer
pub struct CsvLogImporter {
    /// Format string for parsing the date column
    date_format: String,
}

/// Result of a CSV import operation
#[derive(Debug)]
pub struct CsvImportResult {
    pub logs: Vec<DailyLog>,
    pub rows_processed: usize,
    pub rows_failed: usize,
    pub errors: Vec<String>,
}

#[derive(Debug, Default)]
struct ColumnMap {
    date: Option<usize>,
    flow: Option<usize>,
    mood: Option<usize>,
    anxiety: Option<usize>,
    energy: Option<usize>,
    sleep_hours: Option<usize>,
    sleep_quality: Option<usize>,
    symptoms: Option<usize>,
}

impl ColumnMap {
    fn detect(headers: &csv::StringRecord) -> Self {
        let mut map = ColumnMap::default();

        for (idx, header) in headers.iter().enumerate() {
            let slot = match header.trim().to_lowercase().replace(' ', "_").as_str() {
                "date" => &mut map.date,
                "flow" | "period_flow" => &mut map.flow,
                "mood" | "mood_overall" => &mut map.mood,
                "anxiety" | "mood_anxiety" => &mut map.anxiety,
                "energy" | "mood_energy" => &mut map.energy,
                "sleep" | "sleep_hours" => &mut map.sleep_hours,
                "sleep_quality" => &mut map.sleep_quality,
                "symptoms" => &mut map.symptoms,
                _ => continue,
            };
            slot.get_or_insert(idx);
        }

        map
    }
}

impl Default for CsvLogImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvLogImporter {
    /// Create a new importer expecting ISO dates
    pub fn new() -> Self {
        Self {
            date_format: "%Y-%m-%d".to_string(),
        }
    }

    /// Set the date format string
    pub fn with_date_format(mut self, format: &str) -> Self {
        self.date_format = format.to_string();
        self
    }

    /// Import logs from a CSV file
    pub fn import(&self, path: &Path) -> JournalResult<CsvImportResult> {
        let file = std::fs::File::open(path)?;
        self.import_reader(file)
    }

    /// Import from a CSV string (useful for testing)
    pub fn import_str(&self, csv_data: &str) -> JournalResult<CsvImportResult> {
        self.import_reader(csv_data.as_bytes())
    }

    fn import_reader<R: Read>(&self, source: R) -> JournalResult<CsvImportResult> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(source);

        let columns = ColumnMap::detect(reader.headers()?);
        let date_col = columns
            .date
            .ok_or_else(|| JournalError::Parse("CSV has no date column".to_string()))?;

        let mut logs = Vec::new();
        let mut rows_processed = 0;
        let mut rows_failed = 0;
        let mut errors = Vec::new();

        for (line_num, result) in reader.records().enumerate() {
            // Header is line 1
            let actual_line = line_num + 2;

            let parsed = result
                .map_err(JournalError::from)
                .and_then(|record| self.parse_record(&record, date_col, &columns));

            match parsed {
                Ok(log) => {
                    logs.push(log);
                    rows_processed += 1;
                }
                Err(e) => {
                    errors.push(format!("Line {}: {}", actual_line, e));
                    rows_failed += 1;
                }
            }
        }

        if errors.len() > MAX_ERRORS {
            let total = errors.len();
            errors.truncate(MAX_ERRORS);
            errors.push(format!("... and {} more errors", total - MAX_ERRORS));
        }

        tracing::debug!(rows_processed, rows_failed, "CSV import finished");

        Ok(CsvImportResult {
            logs,
            rows_processed,
            rows_failed,
            errors,
        })
    }

    fn parse_record(
        &self,
        record: &csv::StringRecord,
        date_col: usize,
        columns: &ColumnMap,
    ) -> JournalResult<DailyLog> {
        let date_str = record
            .get(date_col)
            .map(str::trim)
            .ok_or_else(|| JournalError::Parse("missing date column".to_string()))?;
        let date = NaiveDate::parse_from_str(date_str, &self.date_format)
            .map_err(|_| JournalError::Parse(format!("Could not parse date: {}", date_str)))?;

        let mut log = DailyLog::new(date);

        if let Some(flow) = field(record, columns.flow) {
            log.period_flow = flow.parse::<FlowLevel>().map_err(JournalError::Parse)?;
        }
        log.mood_overall = parse_optional(record, columns.mood, "mood")?;
        log.mood_anxiety = parse_optional(record, columns.anxiety, "anxiety")?;
        log.mood_energy = parse_optional(record, columns.energy, "energy")?;
        log.sleep_hours = parse_optional(record, columns.sleep_hours, "sleep_hours")?;
        log.sleep_quality = parse_optional(record, columns.sleep_quality, "sleep_quality")?;

        if let Some(symptoms) = field(record, columns.symptoms) {
            log.symptoms = parse_symptoms(symptoms)?;
        }

        Ok(log)
    }
}

/// Non-empty trimmed cell for an optional column
fn field(record: &csv::StringRecord, column: Option<usize>) -> Option<&str> {
    record
        .get(column?)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn parse_optional<T: std::str::FromStr>(
    record: &csv::StringRecord,
    column: Option<usize>,
    name: &str,
) -> JournalResult<Option<T>> {
    match field(record, column) {
        None => Ok(None),
        Some(value) => value
            .parse::<T>()
            .map(Some)
            .map_err(|_| JournalError::Parse(format!("invalid {}: {}", name, value))),
    }
}

/// Parse `id:severity;id:severity`
fn parse_symptoms(cell: &str) -> JournalResult<Vec<LoggedSymptom>> {
    cell.split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| -> JournalResult<LoggedSymptom> {
            let (id, severity) = entry
                .split_once(':')
                .ok_or_else(|| JournalError::Parse(format!("symptom missing severity: {}", entry)))?;
            let severity = severity
                .trim()
                .parse::<u8>()
                .map_err(|_| JournalError::Parse(format!("invalid severity: {}", entry)))?;
            Ok(LoggedSymptom::new(id.trim(), severity))
        })
        .collect()
}
