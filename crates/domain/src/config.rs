//! Configuration structures
//!
//! Every section carries serde defaults so a config file only needs the
//! values it overrides. Loading lives in `hrcal-infra::config`.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_TIMEOUT_SECS, DEFAULT_EVENTS_PATH, DEFAULT_HOLIDAYS_PATH,
    DEFAULT_INTERVIEWS_PATH, DEFAULT_LEAVES_PATH, DEFAULT_LOG_FILTER, DEFAULT_MAX_ATTEMPTS,
    DEFAULT_MAX_PAGES, DEFAULT_MEETINGS_PATH,
};
use crate::types::WeekStart;

/// Top-level application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub calendar: CalendarConfig,
    pub logging: LoggingConfig,
}

/// HR REST API connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub auth_token: Option<String>,
    pub timeout_seconds: u64,
    /// Total attempts per request (1 = no retries).
    pub max_attempts: usize,
    /// Upper bound on pages followed for one paginated collection.
    pub max_pages: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            auth_token: None,
            timeout_seconds: DEFAULT_API_TIMEOUT_SECS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

/// Calendar view settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    pub week_start: WeekStart,
    pub pad_trailing_cells: bool,
    /// IANA zone used to decide which day is "today". Local time when unset.
    pub timezone: Option<String>,
    pub sources: SourcesConfig,
}

/// Per-category source endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub events: SourceConfig,
    pub holidays: SourceConfig,
    pub meetings: SourceConfig,
    pub leaves: SourceConfig,
    pub interviews: SourceConfig,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            events: SourceConfig::enabled(DEFAULT_EVENTS_PATH),
            holidays: SourceConfig::enabled(DEFAULT_HOLIDAYS_PATH),
            meetings: SourceConfig::enabled(DEFAULT_MEETINGS_PATH),
            leaves: SourceConfig::enabled(DEFAULT_LEAVES_PATH),
            interviews: SourceConfig { enabled: false, path: DEFAULT_INTERVIEWS_PATH.to_string() },
        }
    }
}

/// One source endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub path: String,
}

impl SourceConfig {
    fn enabled(path: &str) -> Self {
        Self { enabled: true, path: path.to_string() }
    }
}

fn default_true() -> bool {
    true
}

/// Logging settings consumed by the tracing subscriber setup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive; `RUST_LOG` takes precedence when set.
    pub filter: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: DEFAULT_LOG_FILTER.to_string(), json: false }
    }
}
