// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod conditions;
pub mod history;
pub mod run;

pub use conditions::{HowFelt, Terrain, Weather};
pub use history::{HistoryError, RunHistory, RunHistorySummary};
pub use run::Run;
