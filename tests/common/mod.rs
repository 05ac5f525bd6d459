// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use chrono::NaiveDate;
use pace_tracker::config::Config;
use pace_tracker::units::DurationMode;
use std::path::Path;

/// Feed document with five runs (24 miles total).
pub const RUN_LIST_FIXTURE: &str = "tests/fixtures/run_list.xml";

/// Feed document the service returns for an unknown account.
#[allow(dead_code)]
pub const ERROR_PAYLOAD_FIXTURE: &str = "tests/fixtures/error_payload.xml";

/// Read a fixture file.
pub fn fixture(path: &str) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {}: {}", path, e))
}

/// The day the tests pretend it is.
#[allow(dead_code)]
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2011, 10, 8).unwrap()
}

/// Config pointing at a temporary cache directory and a mock feed URL.
#[allow(dead_code)]
pub fn test_config(cache_dir: &Path, feed_url: String) -> Config {
    Config {
        account_id: "1148796416".to_string(),
        cache_dir: cache_dir.to_path_buf(),
        feed_url,
        start_offset: 0,
        force_download: false,
        duration_mode: DurationMode::Legacy,
        chart_export: None,
    }
}

/// Compare floats with a small tolerance.
#[allow(dead_code)]
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {}, got {}",
        expected,
        actual
    );
}
