//! # Cyclelog
//!
//! Cycle Journal Analytics - pattern, correlation and trend analysis over a
//! personal symptom, mood and cycle journal.
//!
//! ## Features
//!
//! - **Cycle statistics**: average cycle and period length, current phase and
//!   the next predicted start
//! - **Pattern insights**: day-of-week, sleep, mood and cycle-phase rules
//!   rendered as short human-readable findings
//! - **Symptom correlations**: which symptoms tend to show up together
//! - **Trends**: is mood, energy or symptom load moving up or down
//!
//! ## Modules
//!
//! - [`analytics`]: Pure analysis over in-memory records
//! - [`journal`]: Journal file loading, validation and CSV import
//! - [`api`]: REST API server with Axum
//! - [`config`]: TOML configuration and logging setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cyclelog::analytics::*;
//! use cyclelog::journal::{DateRange, Journal, JournalSource};
//! use chrono::NaiveDate;
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let journal = Journal::load(Path::new("journal.json"))?;
//!     let today = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
//!
//!     let logs = journal.daily_logs(DateRange::last_days(90, today).ok_or("date out of range")?)?;
//!     let stats = compute_cycle_stats(&journal.cycle_periods()?, DEFAULT_CYCLE_WINDOW);
//!
//!     for insight in analyze_patterns(&logs, &stats).insights {
//!         println!("{}", insight.text);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod analytics;
pub mod api;
pub mod config;
pub mod journal;

// Re-export top-level types for convenience
pub use analytics::{
    analyze_patterns, compute_cycle_stats, symptom_correlations, trends, CyclePeriod, CyclePhase,
    CycleStats, DailyLog, FlowLevel, Insight, InsightIcon, LoggedSymptom, PatternReport,
    SymptomCorrelation, TrendSummary,
};

pub use journal::{
    CsvImportResult, CsvLogImporter, DateRange, Journal, JournalError, JournalResult,
    JournalSource,
};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{AnalysisConfig, ApiConfig, Config, ConfigError, LoggingConfig};
