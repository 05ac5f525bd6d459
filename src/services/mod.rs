// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod cache;
pub mod feed;
pub mod ingest;
pub mod parser;

pub use cache::{CacheError, CacheOrigin, CacheResolver, ResolvedCache};
pub use feed::{FeedSource, FetchError, HttpFeedClient};
pub use ingest::FeedIngestor;
pub use parser::{FeedError, FeedParser};
