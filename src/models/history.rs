// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Run history aggregate: feed-level totals plus the retained runs.
//!
//! The summary always reflects the whole feed. The run list is trimmed by
//! the configured start offset, and every derived statistic is computed
//! from that trimmed list.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Run;
use crate::units::DurationParts;

/// Totals reported by the feed's summary section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunHistorySummary {
    /// Run count as reported by the feed
    pub total_runs: u64,
    /// Total distance in miles
    pub total_distance_miles: f64,
    /// Total duration in whole seconds
    pub total_duration_seconds: u64,
    /// Total duration split into hours, minutes and seconds
    pub total_duration: DurationParts,
}

/// Parsed run history for one feed snapshot.
#[derive(Debug, Clone)]
pub struct RunHistory {
    summary: RunHistorySummary,
    runs: Vec<Run>,
    start_offset: usize,
    parsed_run_count: usize,
}

impl RunHistory {
    /// Build a history from every run in the feed, keeping runs from
    /// `start_offset` onward in their original order.
    pub fn new(summary: RunHistorySummary, mut runs: Vec<Run>, start_offset: usize) -> Self {
        let parsed_run_count = runs.len();
        runs.drain(..start_offset.min(parsed_run_count));

        Self {
            summary,
            runs,
            start_offset,
            parsed_run_count,
        }
    }

    pub fn summary(&self) -> &RunHistorySummary {
        &self.summary
    }

    /// Runs retained after the start offset, oldest first.
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    pub fn start_offset(&self) -> usize {
        self.start_offset
    }

    /// Number of runs parsed from the feed before offset filtering.
    pub fn parsed_run_count(&self) -> usize {
        self.parsed_run_count
    }

    /// Mean pace (seconds per mile) across the retained runs.
    ///
    /// Fails on an empty history, or when any retained run has no defined
    /// pace; the error carries that run's index in the retained list.
    pub fn average_pace(&self) -> Result<f64, HistoryError> {
        if self.runs.is_empty() {
            return Err(HistoryError::Empty {
                start_offset: self.start_offset,
                parsed: self.parsed_run_count,
            });
        }

        let mut total = 0.0;
        for (index, run) in self.runs.iter().enumerate() {
            total += run
                .pace()
                .ok_or(HistoryError::UndefinedPace { index })?;
        }

        Ok(total / self.runs.len() as f64)
    }

    /// Per-run paces in run order; `None` marks a run with no defined pace.
    pub fn pace_series(&self) -> Vec<Option<f64>> {
        self.runs.iter().map(Run::pace).collect()
    }

    /// Total miles per calendar day, ascending by date.
    pub fn group_distance_by_day(&self) -> BTreeMap<NaiveDate, f64> {
        let mut days = BTreeMap::new();
        for run in &self.runs {
            *days.entry(run.date()).or_insert(0.0) += run.distance();
        }
        days
    }
}

/// Conditions under which history statistics are undefined.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HistoryError {
    #[error("No runs retained (start offset {start_offset}, {parsed} runs parsed)")]
    Empty { start_offset: usize, parsed: usize },

    #[error("Run {index} has no positive distance, pace is undefined")]
    UndefinedPace { index: usize },
}
