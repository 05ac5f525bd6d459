// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Text summary and chart data for a run history.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::Path;

use crate::models::{HistoryError, RunHistory};
use crate::units::format_pace;

/// Render the summary report: feed totals, one line per retained run and
/// the average pace.
pub fn render_summary(history: &RunHistory) -> String {
    let summary = history.summary();
    let mut out = String::new();

    let _ = writeln!(out, "Total runs: {}", summary.total_runs);
    let _ = writeln!(
        out,
        "Total distance: {:.2} miles",
        summary.total_distance_miles
    );
    let _ = writeln!(out, "Total duration: {} hours", summary.total_duration);
    out.push('\n');

    for (index, run) in history.runs().iter().enumerate() {
        let number = history.start_offset() + index + 1;
        let minutes = run.duration_seconds() / 60;
        let seconds = run.duration_seconds() % 60;
        let pace = run.pace_string().unwrap_or_else(|| "n/a".to_string());
        let _ = writeln!(
            out,
            "{:2})  {:4.2} miles  in {:3}:{:02} minutes  ({})",
            number,
            run.distance(),
            minutes,
            seconds,
            pace
        );
    }
    out.push('\n');

    match history.average_pace() {
        Ok(pace) => {
            let _ = writeln!(out, "Average pace overall: {}", format_pace(pace));
        }
        Err(HistoryError::Empty { .. }) => {
            let _ = writeln!(out, "Average pace overall: no runs to average");
        }
        Err(e @ HistoryError::UndefinedPace { .. }) => {
            let _ = writeln!(out, "Average pace overall: undefined ({})", e);
        }
    }

    out
}

/// Render miles per day, one line per day, oldest first.
pub fn render_day_totals(history: &RunHistory) -> String {
    let mut out = String::new();
    for (date, miles) in history.group_distance_by_day() {
        let _ = writeln!(out, "{}/{:02} {:.2} miles", date.month(), date.day(), miles);
    }
    out
}

/// Miles run on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayDistance {
    pub date: NaiveDate,
    pub miles: f64,
}

/// Data handed to the chart renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    /// Run number (1-based, counting dropped runs) of the first pace
    pub first_run_number: usize,
    /// Seconds per mile for each retained run; `null` where undefined
    pub paces: Vec<Option<f64>>,
    /// Miles per day, ascending by date
    pub distance_by_day: Vec<DayDistance>,
}

impl ChartData {
    pub fn from_history(history: &RunHistory) -> Self {
        Self {
            first_run_number: history.start_offset() + 1,
            paces: history.pace_series(),
            distance_by_day: history
                .group_distance_by_day()
                .into_iter()
                .map(|(date, miles)| DayDistance { date, miles })
                .collect(),
        }
    }

    /// Write as pretty-printed JSON.
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        tracing::info!(path = %path.as_ref().display(), "Chart data written");
        Ok(())
    }
}
