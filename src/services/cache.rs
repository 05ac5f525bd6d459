// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily feed cache.
//!
//! One feed document is cached per calendar day, named after the day
//! (`19Oct2026.xml`). Resolution order:
//! 1. Today's document, unless a re-fetch is forced.
//! 2. A freshly fetched document, saved as today's.
//! 3. If the fetch fails, the newest cached document from the current
//!    month, then the month before, up to 11 months back.
//!
//! There is no locking; concurrent runs against the same directory may
//! race on today's file.

use chrono::{Datelike, NaiveDate};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::feed::FeedSource;
use crate::time_utils::{cache_file_name, month_abbreviation_back};

/// How many months (including the current one) the fallback search covers.
pub const FALLBACK_MONTHS: u32 = 12;

/// Where the resolved document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOrigin {
    /// Today's document was already cached
    Today,
    /// The feed was fetched and saved as today's document
    Fetched,
    /// The fetch failed; an older document was found this many months back
    Fallback { months_back: u32 },
}

/// The cached document chosen for parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCache {
    pub file_name: String,
    pub origin: CacheOrigin,
}

/// Resolves which cached feed document to parse.
#[derive(Debug, Clone)]
pub struct CacheResolver {
    cache_dir: PathBuf,
}

impl CacheResolver {
    /// Use `cache_dir` for cached documents, creating it if needed.
    pub fn open(cache_dir: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let cache_dir = cache_dir.into();
        fs::create_dir_all(&cache_dir).map_err(|e| CacheError::CreateDir {
            path: cache_dir.clone(),
            source: e,
        })?;

        tracing::debug!(path = %cache_dir.display(), "Cache directory ready");
        Ok(Self { cache_dir })
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Full path of a cached document.
    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.cache_dir.join(file_name)
    }

    /// Pick the document to parse for `today`, fetching when required.
    pub async fn resolve<S: FeedSource>(
        &self,
        source: &S,
        account_id: &str,
        force_download: bool,
        today: NaiveDate,
    ) -> Result<ResolvedCache, CacheError> {
        let file_name = cache_file_name(today);
        let path = self.path_for(&file_name);

        if path.is_file() && !force_download {
            tracing::info!(file = %file_name, "Using feed cached earlier today");
            return Ok(ResolvedCache {
                file_name,
                origin: CacheOrigin::Today,
            });
        }

        tracing::info!(account_id, force_download, "Downloading run-list feed");
        match source.fetch(account_id).await {
            Ok(bytes) => {
                fs::write(&path, &bytes).map_err(|e| CacheError::Write {
                    path: path.clone(),
                    source: e,
                })?;
                tracing::info!(file = %file_name, bytes = bytes.len(), "Feed saved to cache");
                Ok(ResolvedCache {
                    file_name,
                    origin: CacheOrigin::Fetched,
                })
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    dir = %self.cache_dir.display(),
                    "Could not download feed, looking for an older cached copy"
                );
                let (file_name, months_back) = self.find_fallback(today)?;
                tracing::info!(file = %file_name, months_back, "Using older cached feed");
                Ok(ResolvedCache {
                    file_name,
                    origin: CacheOrigin::Fallback { months_back },
                })
            }
        }
    }

    /// Search backward month by month for a cached document.
    ///
    /// At the first month offset with any file whose name contains that
    /// month's abbreviation, the most recently modified such file wins
    /// (file name breaks ties). Returns the file name and the offset.
    pub fn find_fallback(&self, today: NaiveDate) -> Result<(String, u32), CacheError> {
        let entries = self.list_files()?;

        for offset in 0..FALLBACK_MONTHS {
            let month = month_abbreviation_back(today.month(), offset);
            let newest = entries
                .iter()
                .filter(|(name, _)| name.contains(month))
                .max_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));

            if let Some((name, _)) = newest {
                return Ok((name.clone(), offset));
            }
        }

        Err(CacheError::NoPriorCache {
            dir: self.cache_dir.clone(),
        })
    }

    /// Read a cached document.
    pub fn read(&self, file_name: &str) -> Result<Vec<u8>, CacheError> {
        let path = self.path_for(file_name);
        fs::read(&path).map_err(|e| CacheError::Read { path, source: e })
    }

    /// Regular files in the cache directory with their modification times.
    fn list_files(&self) -> Result<Vec<(String, SystemTime)>, CacheError> {
        let list_err = |e| CacheError::List {
            path: self.cache_dir.clone(),
            source: e,
        };

        let mut files = Vec::new();
        for entry in fs::read_dir(&self.cache_dir).map_err(list_err)? {
            let entry = entry.map_err(list_err)?;
            let metadata = match entry.metadata() {
                Ok(m) if m.is_file() => m,
                _ => continue,
            };
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
            files.push((name, modified));
        }
        Ok(files)
    }
}

/// Errors from cache resolution.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Failed to create cache directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to list cache directory {path}: {source}")]
    List {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("No feed downloaded before: nothing cached in {dir} for the last 12 months")]
    NoPriorCache { dir: PathBuf },
}
