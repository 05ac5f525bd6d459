// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types.
//!
//! Every variant is fatal to a pipeline run; the caller reports it and exits.

use crate::config::ConfigError;
use crate::models::HistoryError;
use crate::services::cache::CacheError;
use crate::services::parser::FeedError;

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    #[error("Run history error: {0}")]
    History(#[from] HistoryError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// True when there is simply nothing to show: no fresh feed and no
    /// earlier cached copy.
    pub fn is_no_data(&self) -> bool {
        matches!(self, AppError::Cache(CacheError::NoPriorCache { .. }))
    }
}

/// Result type alias for the pipeline
pub type Result<T> = std::result::Result<T, AppError>;
