//! Main SlotScanner implementation.

use hg_error::Result;
use hg_traits::DirectoryLister;
use hg_types::{HourInterval, Slot, TopicSources};
use tracing::{debug, info};

use crate::cache::ListingCache;
use crate::config::ScanConfig;
use crate::filter::PatternFilter;
use crate::resolver::SlotResolver;
use crate::stats::ScanStats;

/// Slots returned by a scan together with its statistics.
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Slots carrying at least one event, ascending by hour
    pub slots: Vec<Slot>,

    /// Statistics for the scan
    pub stats: ScanStats,
}

/// The scanning engine: enumerates hours and resolves their slots.
///
/// Owns a [`ListingCache`] that persists across calls, so repeated or
/// overlapping scans through the same engine list each hour directory once.
/// Use [`slots_with_cache`](Self::slots_with_cache) with a fresh cache for an
/// isolated, uncached view.
pub struct SlotScanner<L: DirectoryLister> {
    lister: L,
    sources: TopicSources,
    filter: PatternFilter,
    cache: ListingCache,
}

impl<L: DirectoryLister> SlotScanner<L> {
    /// Create a new SlotScanner.
    ///
    /// # Arguments
    ///
    /// * `lister` - A working lister, typically chosen by [`crate::NamenodeSelector`]
    /// * `sources` - Per-topic root configuration
    /// * `config` - The scan configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configured file pattern is invalid.
    pub fn new(lister: L, sources: TopicSources, config: ScanConfig) -> Result<Self> {
        let filter = PatternFilter::new(&config.file_pattern)?;

        Ok(Self {
            lister,
            sources,
            filter,
            cache: ListingCache::new(),
        })
    }

    /// Slots of `topic` within `interval`, using the engine's cache.
    pub async fn slots(&self, topic: &str, interval: &HourInterval) -> Result<Vec<Slot>> {
        self.slots_with_cache(topic, interval, &self.cache).await
    }

    /// Slots of `topic` within `interval`, using the given cache.
    pub async fn slots_with_cache(
        &self,
        topic: &str,
        interval: &HourInterval,
        cache: &ListingCache,
    ) -> Result<Vec<Slot>> {
        Ok(self.scan_with_cache(topic, interval, cache).await?.slots)
    }

    /// Scan `topic` within `interval` with the engine's cache, reporting statistics.
    pub async fn scan(&self, topic: &str, interval: &HourInterval) -> Result<ScanReport> {
        self.scan_with_cache(topic, interval, &self.cache).await
    }

    /// Scan `topic` within `interval` with the given cache, reporting statistics.
    ///
    /// Hours are resolved strictly in ascending order, one at a time. Slots
    /// without events are dropped. A configuration error for the topic fails
    /// the whole scan before any listing is issued.
    pub async fn scan_with_cache(
        &self,
        topic: &str,
        interval: &HourInterval,
        cache: &ListingCache,
    ) -> Result<ScanReport> {
        let resolver = SlotResolver::new(topic, &self.sources, &self.lister, &self.filter, cache)?;

        info!(
            topic = %topic,
            start = %interval.start().to_rfc3339(),
            end = %interval.end().to_rfc3339(),
            hours = interval.len(),
            "Scanning HDFS for slots"
        );

        let mut stats = ScanStats::new();
        let before = cache.stats();
        let mut slots = Vec::new();

        for hour in interval.hours() {
            let slot = resolver.resolve(hour).await;
            stats.record_slot(&slot);

            if slot.has_events() {
                debug!(
                    topic = %topic,
                    time = %hour.to_rfc3339(),
                    files = slot.paths().len(),
                    events = slot.events(),
                    "Found slot"
                );
                slots.push(slot);
            }
        }

        stats.complete(before, cache.stats());

        debug!(
            topic = %topic,
            hours = stats.hours_scanned,
            slots = stats.slots_found,
            events = stats.events,
            listings = stats.listings_issued,
            cache_hits = stats.cache_hits,
            "Scan completed"
        );

        Ok(ScanReport { slots, stats })
    }

    /// The engine-owned cache.
    pub fn cache(&self) -> &ListingCache {
        &self.cache
    }

    /// The lister backing this engine.
    pub fn lister(&self) -> &L {
        &self.lister
    }

    /// The topic sources this engine resolves roots from.
    pub fn sources(&self) -> &TopicSources {
        &self.sources
    }
}
