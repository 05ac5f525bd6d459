// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Pace-Tracker: ingest a runner's public run-list feed and summarize it.
//!
//! This crate fetches the feed (caching one snapshot per day), parses it
//! into per-run records and exposes the totals and pace statistics used
//! for reporting and charting.

pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod services;
pub mod time_utils;
pub mod units;

pub use error::{AppError, Result};
pub use models::{Run, RunHistory, RunHistorySummary};
