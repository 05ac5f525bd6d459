// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! A single completed run, as reconstructed from the feed.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::conditions::{HowFelt, Terrain, Weather};
use crate::units::format_pace;

/// One completed activity.
///
/// Constructed once while parsing; fields are read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    /// Distance in miles
    distance: f64,
    /// Elapsed time in whole seconds
    duration_seconds: u64,
    /// Local start time with the feed's timezone suffix discarded
    start_time: NaiveDateTime,
    /// Raw condition codes; `None` when the feed left them empty
    how_felt: Option<u8>,
    weather: Option<u8>,
    terrain: Option<u8>,
}

impl Run {
    pub fn new(distance: f64, duration_seconds: u64, start_time: NaiveDateTime) -> Self {
        Self {
            distance,
            duration_seconds,
            start_time,
            how_felt: None,
            weather: None,
            terrain: None,
        }
    }

    /// Attach the optional condition codes.
    pub fn with_conditions(
        mut self,
        how_felt: Option<u8>,
        weather: Option<u8>,
        terrain: Option<u8>,
    ) -> Self {
        self.how_felt = how_felt;
        self.weather = weather;
        self.terrain = terrain;
        self
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn duration_seconds(&self) -> u64 {
        self.duration_seconds
    }

    pub fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }

    /// Calendar day the run started on.
    pub fn date(&self) -> NaiveDate {
        self.start_time.date()
    }

    /// Seconds per mile, or `None` when the distance is not positive.
    pub fn pace(&self) -> Option<f64> {
        if self.distance > 0.0 && self.distance.is_finite() {
            Some(self.duration_seconds as f64 / self.distance)
        } else {
            None
        }
    }

    pub fn pace_string(&self) -> Option<String> {
        self.pace().map(format_pace)
    }

    pub fn how_felt_code(&self) -> Option<u8> {
        self.how_felt
    }

    pub fn weather_code(&self) -> Option<u8> {
        self.weather
    }

    pub fn terrain_code(&self) -> Option<u8> {
        self.terrain
    }

    pub fn how_felt(&self) -> Option<HowFelt> {
        self.how_felt.and_then(HowFelt::from_code)
    }

    pub fn weather(&self) -> Option<Weather> {
        self.weather.and_then(Weather::from_code)
    }

    pub fn terrain(&self) -> Option<Terrain> {
        self.terrain.and_then(Terrain::from_code)
    }
}

impl std::fmt::Display for Run {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Run(dist={:.2}, dur={}, pace={}, startTime={})",
            self.distance,
            self.duration_seconds,
            self.pace_string().as_deref().unwrap_or("n/a"),
            self.start_time.format("%Y-%m-%dT%H:%M:%S")
        )
    }
}
