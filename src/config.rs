//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub journal: JournalConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub analysis: AnalysisConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Journal file location
#[derive(Debug, Clone, Deserialize)]
pub struct JournalConfig {
    #[serde(default = "default_journal_path")]
    pub path: String,
}

fn default_journal_path() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("cyclelog").join("journal.json").to_string_lossy().to_string())
        .unwrap_or_else(|| "./journal.json".to_string())
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            path: default_journal_path(),
        }
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8090
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ApiConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Analysis window settings
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Most recent periods used for cycle statistics
    #[serde(default = "default_cycle_window")]
    pub cycle_window: usize,

    /// Days of logs analyzed when a request doesn't say
    #[serde(default = "default_range_days")]
    pub default_range_days: i64,
}

fn default_cycle_window() -> usize {
    crate::analytics::DEFAULT_CYCLE_WINDOW
}

fn default_range_days() -> i64 {
    90
}

/// Accepted values for `default_range_days`, matching the API's `days` bounds
pub const RANGE_DAYS_BOUNDS: std::ops::RangeInclusive<i64> = 7..=365;

/// Fewest periods that yield a cycle length
pub const MIN_CYCLE_WINDOW: usize = 2;

impl AnalysisConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !RANGE_DAYS_BOUNDS.contains(&self.default_range_days) {
            return Err(ConfigError::Invalid(format!(
                "analysis.default_range_days must be between {} and {}, got {}",
                RANGE_DAYS_BOUNDS.start(),
                RANGE_DAYS_BOUNDS.end(),
                self.default_range_days
            )));
        }
        if self.cycle_window < MIN_CYCLE_WINDOW {
            return Err(ConfigError::Invalid(format!(
                "analysis.cycle_window must be at least {}, got {}",
                MIN_CYCLE_WINDOW, self.cycle_window
            )));
        }
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            cycle_window: default_cycle_window(),
            default_range_days: default_range_days(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,

    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Install the global tracing subscriber
    ///
    /// `RUST_LOG` wins over the configured level. `format = "json"` selects
    /// structured output; anything else gets the human-readable formatter.
    /// When `file` is set, output is appended there instead of stderr.
    pub fn init(&self) -> Result<(), ConfigError> {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("cyclelog={}", self.level)));

        let writer = match &self.file {
            Some(path) => {
                let file = std::fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|e| ConfigError::Io {
                        path: PathBuf::from(path),
                        error: e.to_string(),
                    })?;
                tracing_subscriber::fmt::writer::BoxMakeWriter::new(std::sync::Mutex::new(file))
            }
            None => tracing_subscriber::fmt::writer::BoxMakeWriter::new(std::io::stderr),
        };

        let registry = tracing_subscriber::registry().with(filter);
        if self.format == "json" {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_writer(writer))
                .init();
        } else {
            registry
                .with(tracing_subscriber::fmt::layer().with_writer(writer))
                .init();
        }

        Ok(())
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::from_toml(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse and validate configuration from TOML text
    ///
    /// A leading `~/` in `journal.path` and `logging.file` is expanded to the
    /// home directory.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let mut config: Config = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })?;

        config.journal.path = expand_home(&config.journal.path);
        config.logging.file = config.logging.file.as_deref().map(expand_home);
        config.analysis.validate()?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    ///
    /// Runs before logging is set up, so unusable files are reported on stderr.
    pub fn load_default() -> Self {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("cyclelog").join("config.toml")),
            Some(PathBuf::from("./cyclelog.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        let (config, skipped) = Self::load_first(&config_paths);
        for e in skipped {
            eprintln!("Warning: skipping config: {}", e);
        }
        config
    }

    /// First existing, valid config among `paths`, plus errors for files skipped on the way
    fn load_first(paths: &[PathBuf]) -> (Self, Vec<ConfigError>) {
        let mut skipped = Vec::new();

        for path in paths.iter().filter(|p| p.exists()) {
            match Self::load_with_env(path) {
                Ok(config) => return (config, skipped),
                Err(e) => skipped.push(e),
            }
        }

        (Self::from_env(), skipped)
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("CYCLELOG_JOURNAL") {
            self.journal.path = path;
        }

        if let Ok(host) = std::env::var("CYCLELOG_API_HOST") {
            self.api.host = host;
        }
        if let Ok(port) = std::env::var("CYCLELOG_API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        if let Ok(window) = std::env::var("CYCLELOG_CYCLE_WINDOW") {
            if let Ok(w) = window.parse() {
                if w >= MIN_CYCLE_WINDOW {
                    self.analysis.cycle_window = w;
                }
            }
        }

        if let Ok(level) = std::env::var("CYCLELOG_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("CYCLELOG_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Expand a leading `~/` to the user's home directory
fn expand_home(path: &str) -> String {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest).to_string_lossy().to_string(),
        _ => path.to_string(),
    }
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    let journal_path = toml::Value::String(default_journal_path());

    format!(
        r#"# Cyclelog Configuration
#
# Environment variables override these settings:
# - CYCLELOG_JOURNAL
# - CYCLELOG_API_HOST
# - CYCLELOG_API_PORT
# - CYCLELOG_CYCLE_WINDOW
# - CYCLELOG_LOG_LEVEL
# - CYCLELOG_LOG_FORMAT

[journal]
# JSON journal file with daily logs and cycle periods
path = {journal_path}

[api]
# API server host
host = "127.0.0.1"

# API server port
port = 8090

# Allowed CORS origins (empty = allow any)
cors_origins = []

# Request timeout in seconds
request_timeout_secs = 30

[analysis]
# Number of most recent periods used for cycle statistics
cycle_window = 12

# Days of logs analyzed when a request doesn't specify a range
default_range_days = 90

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Optional log file path
# file = "/var/log/cyclelog/cyclelog.log"
"#
    )
}
