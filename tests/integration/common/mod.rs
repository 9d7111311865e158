//! Common utilities for integration tests.
//!
//! Provides an in-memory [`DirectoryLister`] that counts calls per path and an
//! [`Output`] that collects slot records for verification.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use hg_error::{ListingError, Result};
use hg_scanner::Output;
use hg_traits::{DirectoryLister, ListEntry};
use hg_types::{HourInterval, SlotRecord};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory directory tree keyed by absolute directory path.
///
/// Unknown directories answer with [`ListingError::NotFound`]; directories
/// registered through [`failing`](Self::failing) answer with a transport
/// error.
#[derive(Debug, Default)]
pub struct MemoryLister {
    dirs: HashMap<String, Vec<ListEntry>>,
    failing: Vec<String>,
    calls: Mutex<HashMap<String, usize>>,
}

impl MemoryLister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file under `dir`.
    pub fn with_file(mut self, dir: &str, name: &str) -> Self {
        self.dirs
            .entry(dir.to_string())
            .or_default()
            .push(ListEntry::file(name, 128));
        self
    }

    /// Add a subdirectory entry under `dir`.
    pub fn with_directory(mut self, dir: &str, name: &str) -> Self {
        self.dirs
            .entry(dir.to_string())
            .or_default()
            .push(ListEntry::directory(name));
        self
    }

    /// Make listings of `dir` fail with a transport error.
    pub fn failing(mut self, dir: &str) -> Self {
        self.failing.push(dir.to_string());
        self
    }

    /// Total listing calls received.
    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }

    /// Listing calls received for `dir`.
    pub fn calls_for(&self, dir: &str) -> usize {
        self.calls.lock().unwrap().get(dir).copied().unwrap_or(0)
    }
}

#[async_trait]
impl DirectoryLister for MemoryLister {
    async fn list(&self, path: &str) -> std::result::Result<Vec<ListEntry>, ListingError> {
        *self.calls.lock().unwrap().entry(path.to_string()).or_default() += 1;

        if self.failing.iter().any(|dir| dir == path) {
            return Err(ListingError::Transport {
                path: path.to_string(),
                message: "connection reset".to_string(),
            });
        }

        self.dirs
            .get(path)
            .cloned()
            .ok_or_else(|| ListingError::NotFound(path.to_string()))
    }

    fn endpoint(&self) -> String {
        "memory".to_string()
    }
}

/// Collecting output that stores slot records for verification.
#[derive(Default, Clone)]
pub struct CollectingOutput {
    records: Arc<Mutex<Vec<SlotRecord>>>,
    flushes: Arc<Mutex<usize>>,
}

impl CollectingOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<SlotRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn flushes(&self) -> usize {
        *self.flushes.lock().unwrap()
    }
}

#[async_trait]
impl Output for CollectingOutput {
    async fn output(&self, slot: &SlotRecord) -> Result<()> {
        self.records.lock().unwrap().push(slot.clone());
        Ok(())
    }

    async fn flush(&self) -> Result<()> {
        *self.flushes.lock().unwrap() += 1;
        Ok(())
    }
}

/// 2021-01-02 at the given hour.
pub fn hour(h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2021, 1, 2, h, 0, 0).unwrap()
}

/// Hours `start..=end` of 2021-01-02.
pub fn hours(start: u32, end: u32) -> HourInterval {
    HourInterval::new(hour(start), hour(end)).unwrap()
}
