// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Unit conversions and pace formatting.
//!
//! The feed reports distances in kilometers and durations in milliseconds;
//! everything downstream works in miles and whole seconds.

use serde::{Deserialize, Serialize};

/// Kilometers per mile, as used by the feed conversions.
pub const KM_PER_MILE: f64 = 1.609;

/// Convert a feed distance (kilometers) to miles.
pub fn km_to_miles(km: f64) -> f64 {
    km / KM_PER_MILE
}

/// Convert a feed duration (milliseconds) to whole seconds, truncating.
pub fn ms_to_seconds(ms: u64) -> u64 {
    ms / 1000
}

/// How the seconds component of a total duration is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationMode {
    /// `seconds = total % minutes`, matching historical reports.
    #[default]
    Legacy,
    /// `seconds = total % 60`.
    Standard,
}

impl std::str::FromStr for DurationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(Self::Legacy),
            "standard" => Ok(Self::Standard),
            other => Err(format!("unknown duration mode '{}'", other)),
        }
    }
}

/// A total duration broken into hours, minutes and seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationParts {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl std::fmt::Display for DurationParts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// Decompose a number of seconds into (hours, minutes, seconds).
///
/// In [`DurationMode::Legacy`] the seconds are `total % minutes`. That is
/// undefined when the minutes component is zero, in which case we fall back
/// to `total % 60`.
pub fn decompose_duration(total_seconds: u64, mode: DurationMode) -> DurationParts {
    let hours = total_seconds / 3600;
    let minutes = total_seconds / 60 % 60;
    let seconds = match mode {
        DurationMode::Standard => total_seconds % 60,
        DurationMode::Legacy if minutes == 0 => {
            tracing::warn!(
                total_seconds,
                "Legacy duration split has zero minutes, using seconds mod 60"
            );
            total_seconds % 60
        }
        DurationMode::Legacy => total_seconds % minutes,
    };

    DurationParts {
        hours,
        minutes,
        seconds,
    }
}

/// Split a pace into whole minutes and seconds, rounding to the nearest second.
pub fn split_pace(pace: f64) -> (u64, u64) {
    let total = pace.max(0.0).round() as u64;
    (total / 60, total % 60)
}

/// Format a pace (seconds per mile) as e.g. `7'05"/mile`.
pub fn format_pace(pace: f64) -> String {
    let (minutes, seconds) = split_pace(pace);
    format!("{}'{:02}\"/mile", minutes, seconds)
}
