//! Configuration types for the scanner.

use serde::{Deserialize, Serialize};

use crate::filter::DEFAULT_FILE_PATTERN;

/// Configuration for slot scanning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Glob selecting landed files within an hour directory
    pub file_pattern: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            file_pattern: DEFAULT_FILE_PATTERN.to_string(),
        }
    }
}

impl ScanConfig {
    /// Create a new scan configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the file pattern.
    pub fn with_file_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.file_pattern = pattern.into();
        self
    }
}
