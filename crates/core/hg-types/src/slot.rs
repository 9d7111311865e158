//! Hourly slot representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Zero-based index of the dot-delimited filename field holding the event count.
pub const EVENT_COUNT_FIELD: usize = 3;

/// One topic's landed data for one calendar hour.
///
/// A slot is built once from the paths discovered under every root of the
/// topic and is immutable afterwards. Paths are de-duplicated by their full
/// string, so a file reachable through both the primary and the stale root
/// contributes its events exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    topic: String,
    time: DateTime<Utc>,
    paths: Vec<String>,
    events: u64,
}

impl Slot {
    /// Create a slot from the discovered paths.
    ///
    /// Empty paths are dropped and duplicates collapsed, keeping first-seen order.
    pub fn new(topic: impl Into<String>, time: DateTime<Utc>, paths: Vec<String>) -> Self {
        let mut seen = HashSet::with_capacity(paths.len());
        let paths: Vec<String> = paths
            .into_iter()
            .filter(|path| !path.is_empty())
            .filter(|path| seen.insert(path.clone()))
            .collect();

        let events = paths
            .iter()
            .map(|path| event_count(path))
            .fold(0u64, u64::saturating_add);

        Self {
            topic: topic.into(),
            time,
            paths,
            events,
        }
    }

    /// The logical source name.
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// The hour this slot represents (UTC, hour-aligned).
    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    /// Matched file paths in discovery order.
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Total event count across all matched files.
    pub fn events(&self) -> u64 {
        self.events
    }

    /// Whether the slot carries any events.
    pub fn has_events(&self) -> bool {
        self.events >= 1
    }

    /// Distinct `dir/*.<ext>` templates covering the matched files, sorted.
    pub fn patterns(&self) -> Vec<String> {
        self.paths
            .iter()
            .map(|path| pattern_for(path))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Serializable view of this slot, including its derived patterns.
    pub fn to_record(&self) -> SlotRecord {
        SlotRecord {
            topic: self.topic.clone(),
            time: self.time,
            paths: self.paths.clone(),
            patterns: self.patterns(),
            events: self.events,
        }
    }
}

/// A slot as written by outputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRecord {
    /// Topic name
    pub topic: String,

    /// Hour timestamp (RFC 3339)
    pub time: DateTime<Utc>,

    /// Matched file paths
    pub paths: Vec<String>,

    /// Derived glob patterns
    pub patterns: Vec<String>,

    /// Total event count
    pub events: u64,
}

/// Extract the event count embedded in a landed file's name.
///
/// The filename is split on `.` and the fourth field is read as a decimal
/// number. Only leading digits count; a missing or non-numeric field yields 0
/// and a value wider than `u64` saturates to `u64::MAX`.
///
/// ```
/// use hg_types::event_count;
///
/// assert_eq!(event_count("/data/t/part.00.00.42.gz"), 42);
/// assert_eq!(event_count("/data/t/part.gz"), 0);
/// ```
pub fn event_count(path: &str) -> u64 {
    let filename = path.rsplit('/').next().unwrap_or(path);
    let Some(field) = filename.split('.').nth(EVENT_COUNT_FIELD) else {
        return 0;
    };

    let digits = &field[..field.bytes().take_while(u8::is_ascii_digit).count()];
    if digits.is_empty() {
        return 0;
    }
    // All-digit input only fails to parse on overflow
    digits.parse().unwrap_or(u64::MAX)
}

/// Replace the filename of `path` with a wildcard matching its extension.
///
/// ```
/// use hg_types::pattern_for;
///
/// assert_eq!(pattern_for("/a/b/2020/x.1.2.5.gz"), "/a/b/2020/*.gz");
/// ```
pub fn pattern_for(path: &str) -> String {
    match path.rsplit_once('/') {
        Some((dir, filename)) => format!("{dir}/*.{}", extension(filename)),
        None => format!("*.{}", extension(path)),
    }
}

// Last dot-delimited field, or the whole name when it has no dot.
fn extension(filename: &str) -> &str {
    filename.rsplit('.').next().unwrap_or(filename)
}
