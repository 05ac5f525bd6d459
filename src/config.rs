// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use crate::units::DurationMode;

/// Public run-list widget endpoint; the account ID is sent as `userID`.
pub const DEFAULT_FEED_URL: &str =
    "http://nikerunning.nike.com/nikeplus/v1/services/widget/get_public_run_list.jsp";

/// Directory name used under `$HOME` when no cache directory is configured.
const DEFAULT_CACHE_DIR_NAME: &str = ".pace-tracker";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Account identifier sent to the feed endpoint
    pub account_id: String,
    /// Directory holding one cached feed document per day
    pub cache_dir: PathBuf,
    /// Feed endpoint (without query string)
    pub feed_url: String,
    /// Index of the first run to keep; earlier runs are dropped
    pub start_offset: usize,
    /// Fetch even if today's document is already cached
    pub force_download: bool,
    /// How total durations are split into hours/minutes/seconds
    pub duration_mode: DurationMode,
    /// Where to write chart data as JSON, if anywhere
    pub chart_export: Option<PathBuf>,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            account_id: "test_account".to_string(),
            cache_dir: env::temp_dir().join(DEFAULT_CACHE_DIR_NAME),
            feed_url: DEFAULT_FEED_URL.to_string(),
            start_offset: 0,
            force_download: false,
            duration_mode: DurationMode::Legacy,
            chart_export: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let cache_dir = match env::var("PACE_CACHE_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => env::var("HOME")
                .map(|home| PathBuf::from(home).join(DEFAULT_CACHE_DIR_NAME))
                .map_err(|_| ConfigError::Missing("PACE_CACHE_DIR"))?,
        };

        Ok(Self {
            account_id: env::var("PACE_ACCOUNT_ID")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("PACE_ACCOUNT_ID"))?,
            cache_dir,
            feed_url: env::var("PACE_FEED_URL").unwrap_or_else(|_| DEFAULT_FEED_URL.to_string()),
            start_offset: match env::var("PACE_START_OFFSET") {
                Ok(v) => v
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::Invalid("PACE_START_OFFSET", v))?,
                Err(_) => 0,
            },
            force_download: match env::var("PACE_FORCE_DOWNLOAD") {
                Ok(v) => parse_flag(&v).ok_or(ConfigError::Invalid("PACE_FORCE_DOWNLOAD", v))?,
                Err(_) => false,
            },
            duration_mode: match env::var("PACE_DURATION_MODE") {
                Ok(v) => v
                    .parse()
                    .map_err(|_| ConfigError::Invalid("PACE_DURATION_MODE", v))?,
                Err(_) => DurationMode::Legacy,
            },
            chart_export: env::var("PACE_CHART_EXPORT").ok().map(PathBuf::from),
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: '{1}'")]
    Invalid(&'static str, String),
}
