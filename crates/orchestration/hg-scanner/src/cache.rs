//! Directory listing cache.
//!
//! This module provides a thread-safe cache of resolved directory listings,
//! so repeated or overlapping scans against the same hour directory issue a
//! single remote listing call per directory.

use hg_error::ListingError;
use hg_traits::DirectoryLister;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::OnceCell;
use tracing::{debug, trace, warn};

use crate::filter::PatternFilter;

/// Outcome of listing one directory, as stored in the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachedListing {
    /// Full paths of the matching files, in listing order
    Listed(Vec<String>),

    /// The listing failed; treated as holding no files
    Failed(ListingError),
}

impl CachedListing {
    /// Matching file paths; empty for a failed listing.
    pub fn paths(&self) -> &[String] {
        match self {
            Self::Listed(paths) => paths,
            Self::Failed(_) => &[],
        }
    }

    /// Whether the listing failed.
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Counters describing cache activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Directories held by the cache
    pub entries: usize,

    /// Remote listing calls issued
    pub listings: u64,

    /// Lookups answered without a remote call
    pub hits: u64,

    /// Listing calls that failed
    pub failures: u64,
}

/// Cache from concrete directory path to its resolved listing.
///
/// Entries are populated at most once and never evicted or refreshed; use a
/// new cache to observe fresh remote state. Concurrent first lookups of the
/// same directory share one listing call.
#[derive(Default)]
pub struct ListingCache {
    /// Per-directory cells; the map lock is held only to find or create a cell.
    entries: Mutex<HashMap<String, Arc<OnceCell<CachedListing>>>>,
    listings: AtomicU64,
    hits: AtomicU64,
    failures: AtomicU64,
}

impl ListingCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached listing of `dir`, listing it through `lister` on first use.
    ///
    /// Only entries whose name matches `filter` are kept, each mapped to its
    /// full path under `dir`. A failed listing is cached as
    /// [`CachedListing::Failed`] and is not retried.
    pub async fn get_or_populate<L>(
        &self,
        dir: &str,
        lister: &L,
        filter: &PatternFilter,
    ) -> CachedListing
    where
        L: DirectoryLister + ?Sized,
    {
        let cell = self.entries.lock().entry(dir.to_string()).or_default().clone();

        let populated = AtomicBool::new(false);
        let listing = cell
            .get_or_init(|| {
                let populated = &populated;
                async move {
                    populated.store(true, Ordering::Relaxed);
                    self.populate(dir, lister, filter).await
                }
            })
            .await;

        if !populated.load(Ordering::Relaxed) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(dir = %dir, "Listing cache hit");
        }

        listing.clone()
    }

    async fn populate<L>(&self, dir: &str, lister: &L, filter: &PatternFilter) -> CachedListing
    where
        L: DirectoryLister + ?Sized,
    {
        self.listings.fetch_add(1, Ordering::Relaxed);

        match lister.list(dir).await {
            Ok(entries) => {
                let total = entries.len();
                let paths: Vec<String> = entries
                    .iter()
                    .filter(|entry| filter.matches(&entry.path_suffix))
                    .map(|entry| entry.full_path(dir))
                    .collect();

                debug!(dir = %dir, entries = total, matched = paths.len(), "Listed directory");
                CachedListing::Listed(paths)
            }
            Err(e) => {
                self.failures.fetch_add(1, Ordering::Relaxed);
                match &e {
                    ListingError::NotFound(_) => debug!(dir = %dir, "Directory not found"),
                    _ => warn!(dir = %dir, error = %e, "Listing failed, treating as empty"),
                }
                CachedListing::Failed(e)
            }
        }
    }

    /// The cached listing of `dir`, if it has been populated.
    pub fn get(&self, dir: &str) -> Option<CachedListing> {
        let entries = self.entries.lock();
        entries.get(dir).and_then(|cell| cell.get().cloned())
    }

    /// Whether `dir` has a populated entry.
    pub fn contains(&self, dir: &str) -> bool {
        self.get(dir).is_some()
    }

    /// Number of populated directories.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .values()
            .filter(|cell| cell.initialized())
            .count()
    }

    /// Check if the cache holds no populated directories.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the cache counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            listings: self.listings.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }
}

impl std::fmt::Debug for ListingCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListingCache")
            .field("stats", &self.stats())
            .finish()
    }
}
