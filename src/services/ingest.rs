// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Feed ingestion pipeline.
//!
//! Handles the core workflow, strictly in sequence:
//! 1. Resolve which cached document to use (fetching if needed)
//! 2. Read it from the cache directory
//! 3. Parse it into a run history

use chrono::NaiveDate;

use crate::config::Config;
use crate::error::Result;
use crate::models::RunHistory;
use crate::services::cache::{CacheResolver, ResolvedCache};
use crate::services::feed::FeedSource;
use crate::services::parser::FeedParser;

/// Loads a [`RunHistory`] for one account.
pub struct FeedIngestor<S> {
    source: S,
    resolver: CacheResolver,
    parser: FeedParser,
    account_id: String,
    force_download: bool,
}

impl<S: FeedSource> FeedIngestor<S> {
    pub fn new(
        source: S,
        resolver: CacheResolver,
        parser: FeedParser,
        account_id: impl Into<String>,
        force_download: bool,
    ) -> Self {
        Self {
            source,
            resolver,
            parser,
            account_id: account_id.into(),
            force_download,
        }
    }

    /// Build an ingestor from configuration, creating the cache directory.
    pub fn from_config(config: &Config, source: S) -> Result<Self> {
        let resolver = CacheResolver::open(&config.cache_dir)?;
        let parser = FeedParser::new(config.start_offset, config.duration_mode);
        Ok(Self::new(
            source,
            resolver,
            parser,
            config.account_id.clone(),
            config.force_download,
        ))
    }

    pub fn resolver(&self) -> &CacheResolver {
        &self.resolver
    }

    /// Run the pipeline for `today`.
    pub async fn load(&self, today: NaiveDate) -> Result<(ResolvedCache, RunHistory)> {
        tracing::info!(account_id = %self.account_id, %today, "Loading run history");

        let resolved = self
            .resolver
            .resolve(&self.source, &self.account_id, self.force_download, today)
            .await?;

        let bytes = self.resolver.read(&resolved.file_name)?;
        let history = self.parser.parse_bytes(&bytes)?;

        Ok((resolved, history))
    }
}
