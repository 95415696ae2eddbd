//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use crate::config::AnalysisConfig;
use crate::journal::JournalSource;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Source of daily logs and cycle periods
    pub journal: Arc<dyn JournalSource>,
    /// Analysis window settings
    pub analysis: Arc<AnalysisConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(journal: Arc<dyn JournalSource>, analysis: AnalysisConfig) -> Self {
        Self {
            journal,
            analysis: Arc::new(analysis),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
