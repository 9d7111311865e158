//! Statistics for scan runs.

use chrono::{DateTime, Duration, Utc};
use hg_types::Slot;
use serde::{Deserialize, Serialize};

use crate::cache::CacheStats;

/// Statistics collected during a scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    /// When the scan started
    pub started_at: Option<DateTime<Utc>>,

    /// When the scan completed
    pub completed_at: Option<DateTime<Utc>>,

    /// Hours enumerated from the interval
    pub hours_scanned: usize,

    /// Hours whose slot carried at least one event
    pub slots_found: usize,

    /// Hours dropped for having no events
    pub hours_empty: usize,

    /// Files across the returned slots
    pub files_matched: usize,

    /// Events across the returned slots
    pub events: u64,

    /// Remote listing calls issued during this scan
    pub listings_issued: u64,

    /// Directory lookups answered from the cache during this scan
    pub cache_hits: u64,

    /// Listing calls that failed during this scan
    pub listing_failures: u64,
}

impl ScanStats {
    /// Create a new stats tracker with the current time as start time.
    pub fn new() -> Self {
        Self {
            started_at: Some(Utc::now()),
            ..Default::default()
        }
    }

    /// Record one resolved hour.
    pub fn record_slot(&mut self, slot: &Slot) {
        self.hours_scanned += 1;
        if slot.has_events() {
            self.slots_found += 1;
            self.files_matched += slot.paths().len();
            self.events = self.events.saturating_add(slot.events());
        } else {
            self.hours_empty += 1;
        }
    }

    /// Mark the scan complete, attributing cache activity since `before`.
    pub fn complete(&mut self, before: CacheStats, after: CacheStats) {
        self.listings_issued = after.listings.saturating_sub(before.listings);
        self.cache_hits = after.hits.saturating_sub(before.hits);
        self.listing_failures = after.failures.saturating_sub(before.failures);
        self.completed_at = Some(Utc::now());
    }

    /// Get the duration of the scan.
    pub fn duration(&self) -> Option<Duration> {
        match (self.started_at, self.completed_at) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }

    /// Check if any listing failed.
    pub fn has_listing_failures(&self) -> bool {
        self.listing_failures > 0
    }
}
