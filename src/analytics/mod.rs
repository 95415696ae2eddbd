//! Journal Analytics
//!
//! Pure, synchronous analysis over daily logs and cycle periods that have
//! already been loaded into memory.
//!
//! - **types**: Input records and output structures
//! - **cycles**: Cycle and period length statistics, cycle outlook
//! - **correlations**: Symptom co-occurrence strength
//! - **trends**: First-half vs. second-half deltas
//! - **patterns**: Day-of-week, sleep, mood and cycle-phase insights
//! - **phase**: Cycle day to phase mapping
//!
//! Nothing here performs I/O or reads the clock. Where a computation depends on
//! the current date, it takes `today` as an argument.
//!
//! # Example
//!
//! ```rust
//! use cyclelog::analytics::*;
//! use chrono::NaiveDate;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//! let periods = vec![
//!     CyclePeriod::new(start, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()),
//!     CyclePeriod::new(
//!         NaiveDate::from_ymd_opt(2024, 2, 2).unwrap(),
//!         NaiveDate::from_ymd_opt(2024, 2, 6).unwrap(),
//!     ),
//! ];
//! let stats = compute_cycle_stats(&periods, DEFAULT_CYCLE_WINDOW);
//! assert_eq!(stats.average_cycle_length, Some(28));
//!
//! let logs = vec![DailyLog::new(start).mood(6).symptom("cramps", 3)];
//! let report = analyze_patterns(&logs, &stats);
//! assert!(report.is_placeholder());
//! ```

pub mod correlations;
pub mod cycles;
pub mod patterns;
pub mod phase;
pub mod trends;
pub mod types;

pub use correlations::symptom_correlations;
pub use cycles::{compute_cycle_stats, DEFAULT_CYCLE_WINDOW};
pub use patterns::{analyze_patterns, PatternReport};
pub use phase::{cycle_day, phase_symptom_summary, CyclePhase, PhaseSummary};
pub use trends::trends;
pub use types::{
    AnalyzedPeriod, CyclePeriod, CycleStats, DailyLog, FlowLevel, Insight, InsightIcon,
    LoggedSymptom, SymptomCorrelation, TrendSummary,
};
