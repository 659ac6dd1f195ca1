//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If `HRCAL_API_BASE_URL` is unset, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//! 5. Validates the result before handing it out
//!
//! ## Environment Variables
//! - `HRCAL_API_BASE_URL`: HR API root (required for env loading)
//! - `HRCAL_API_TOKEN`: Bearer token
//! - `HRCAL_API_TIMEOUT_SECS`: Request timeout in seconds
//! - `HRCAL_API_MAX_ATTEMPTS`: Attempts per request (1 = no retries)
//! - `HRCAL_API_MAX_PAGES`: Page limit per collection
//! - `HRCAL_WEEK_START`: `sunday` or `monday`
//! - `HRCAL_TIMEZONE`: IANA zone for the today-marker
//! - `HRCAL_PAD_TRAILING`: Pad the grid to six full weeks (true/false)
//! - `HRCAL_INTERVIEWS_ENABLED`: Include the interviews source (true/false)
//! - `HRCAL_LOG_FILTER`: Tracing filter directive
//! - `HRCAL_LOG_JSON`: JSON log output (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./hrcal.json` or `./hrcal.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono_tz::Tz;
use hrcal_domain::{Config, HrCalError, Result, WeekStart};
use url::Url;

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the base URL is
/// not set there, falls back to loading from a config file. Once the base
/// URL is set, a bad value in any other variable is returned as is.
///
/// # Errors
/// Returns `HrCalError::Config` if:
/// - An environment variable has an invalid value
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - A value fails validation
pub fn load() -> Result<Config> {
    let config = if env_opt("HRCAL_API_BASE_URL").is_some() {
        let config = load_from_env()?;
        tracing::info!("Configuration loaded from environment variables");
        config
    } else {
        tracing::debug!("HRCAL_API_BASE_URL not set, trying file");
        load_from_file(None)?
    };
    validate(&config)?;
    Ok(config)
}

/// Load configuration from environment variables
///
/// `HRCAL_API_BASE_URL` must be present; every other variable falls back to
/// the default of its field.
///
/// # Errors
/// Returns `HrCalError::Config` if the base URL is missing or a variable has
/// an invalid value.
pub fn load_from_env() -> Result<Config> {
    let mut config = Config::default();

    config.api.base_url = env_var("HRCAL_API_BASE_URL")?;
    config.api.auth_token = env_opt("HRCAL_API_TOKEN");
    if let Some(timeout) = env_parse::<u64>("HRCAL_API_TIMEOUT_SECS", "timeout")? {
        config.api.timeout_seconds = timeout;
    }
    if let Some(attempts) = env_parse::<usize>("HRCAL_API_MAX_ATTEMPTS", "max attempts")? {
        config.api.max_attempts = attempts;
    }
    if let Some(pages) = env_parse::<u32>("HRCAL_API_MAX_PAGES", "max pages")? {
        config.api.max_pages = pages;
    }

    if let Some(week_start) = env_opt("HRCAL_WEEK_START") {
        config.calendar.week_start = WeekStart::from_str(&week_start).map_err(HrCalError::Config)?;
    }
    config.calendar.timezone = env_opt("HRCAL_TIMEZONE");
    config.calendar.pad_trailing_cells =
        env_bool("HRCAL_PAD_TRAILING", config.calendar.pad_trailing_cells);
    config.calendar.sources.interviews.enabled =
        env_bool("HRCAL_INTERVIEWS_ENABLED", config.calendar.sources.interviews.enabled);

    if let Some(filter) = env_opt("HRCAL_LOG_FILTER") {
        config.logging.filter = filter;
    }
    config.logging.json = env_bool("HRCAL_LOG_JSON", config.logging.json);

    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `HrCalError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(HrCalError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            HrCalError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| HrCalError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Check values serde cannot check on its own.
///
/// # Errors
/// Returns `HrCalError::Config` for a base URL that is not an absolute
/// http(s) URL, an unknown timezone, or zero attempts, timeout or pages.
pub fn validate(config: &Config) -> Result<()> {
    let url = Url::parse(&config.api.base_url)
        .map_err(|e| HrCalError::Config(format!("Invalid API base URL: {}", e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(HrCalError::Config(format!(
            "API base URL must use http or https, got {}",
            url.scheme()
        )));
    }

    if let Some(zone) = config.calendar.timezone.as_deref() {
        Tz::from_str(zone)
            .map_err(|_| HrCalError::Config(format!("Unknown timezone: {}", zone)))?;
    }

    if config.api.max_attempts == 0 {
        return Err(HrCalError::Config("api.max_attempts must be at least 1".to_string()));
    }
    if config.api.timeout_seconds == 0 {
        return Err(HrCalError::Config("api.timeout_seconds must be at least 1".to_string()));
    }
    if config.api.max_pages == 0 {
        return Err(HrCalError::Config("api.max_pages must be at least 1".to_string()));
    }

    Ok(())
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| HrCalError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| HrCalError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(HrCalError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidates_in(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidates_in(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidates_in(dir: &Path) -> Vec<PathBuf> {
    vec![
        dir.join("hrcal.json"),
        dir.join("hrcal.toml"),
        dir.join("config.json"),
        dir.join("config.toml"),
        dir.join("../config.json"),
        dir.join("../config.toml"),
        dir.join("../../config.json"),
        dir.join("../../config.toml"),
    ]
}

/// Get required environment variable
///
/// # Errors
/// Returns `HrCalError::Config` if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    env_opt(key).ok_or_else(|| {
        HrCalError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Optional environment variable; blank values count as unset.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn env_parse<T>(key: &str, what: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_opt(key)
        .map(|raw| {
            raw.parse::<T>().map_err(|e| HrCalError::Config(format!("Invalid {}: {}", what, e)))
        })
        .transpose()
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive).
/// Any other value keeps `default`.
fn env_bool(key: &str, default: bool) -> bool {
    let Some(raw) = env_opt(key) else {
        return default;
    };
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => {
            tracing::warn!(key, value = %raw, default, "unrecognized boolean value; using default");
            default
        }
    }
}
