//! Per-hour slot resolution.

use chrono::{DateTime, Utc};
use hg_error::Result;
use hg_traits::DirectoryLister;
use hg_types::{Slot, TopicSources, hour_path};
use tracing::debug;

use crate::cache::ListingCache;
use crate::filter::PatternFilter;

/// Builds the [`Slot`] of one topic for any hour.
///
/// Roots are resolved once when the resolver is created; a malformed or
/// unknown topic fails there, before any listing is issued. Each hour then
/// maps every root to `root/YYYY/MM/DD/HH`, lists it through the cache, and
/// merges the results. A failed listing removes only that root's files from
/// the slot.
pub struct SlotResolver<'a, L: ?Sized> {
    topic: &'a str,
    roots: Vec<String>,
    lister: &'a L,
    filter: &'a PatternFilter,
    cache: &'a ListingCache,
}

impl<'a, L> SlotResolver<'a, L>
where
    L: DirectoryLister + ?Sized,
{
    /// Create a resolver for `topic`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the topic is unknown or its roots
    /// cannot be resolved to absolute paths.
    pub fn new(
        topic: &'a str,
        sources: &TopicSources,
        lister: &'a L,
        filter: &'a PatternFilter,
        cache: &'a ListingCache,
    ) -> Result<Self> {
        let roots = sources.roots(topic)?;

        debug!(topic = %topic, roots = ?roots, "Resolved topic roots");

        Ok(Self {
            topic,
            roots,
            lister,
            filter,
            cache,
        })
    }

    /// The resolved root directories, in merge order.
    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    /// Concrete directories holding `hour`'s data, one per root.
    pub fn directories(&self, hour: DateTime<Utc>) -> Vec<String> {
        let suffix = hour_path(hour);
        self.roots
            .iter()
            .map(|root| format!("{root}/{suffix}"))
            .collect()
    }

    /// Build the slot for `hour`.
    pub async fn resolve(&self, hour: DateTime<Utc>) -> Slot {
        let mut paths = Vec::new();

        for dir in self.directories(hour) {
            let listing = self.cache.get_or_populate(&dir, self.lister, self.filter).await;
            if listing.is_failed() {
                debug!(topic = %self.topic, dir = %dir, "Root contributes no files for this hour");
            }
            paths.extend_from_slice(listing.paths());
        }

        Slot::new(self.topic, hour, paths)
    }
}
