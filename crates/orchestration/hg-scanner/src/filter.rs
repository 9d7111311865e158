//! Filename filtering for listed directory entries.
//!
//! Landed files are selected by a glob over their final path component.

use glob::Pattern;
use hg_error::{ConfigError, Result};

/// Default pattern selecting compressed landed files.
pub const DEFAULT_FILE_PATTERN: &str = "*.gz";

/// A filter for matching entry names against a glob pattern.
///
/// Matches against the filename portion (after the last `/`), so the same
/// filter applies to bare `pathSuffix` values and to full paths.
///
/// # Example
///
/// ```
/// use hg_scanner::PatternFilter;
///
/// let filter = PatternFilter::new("*.gz").unwrap();
///
/// assert!(filter.matches("part.0.0.12.gz"));
/// assert!(filter.matches("/data/t/part.0.0.12.gz"));
/// assert!(!filter.matches("part.0.0.12.gz.tmp"));
/// ```
#[derive(Debug, Clone)]
pub struct PatternFilter {
    pattern: String,
    compiled: Pattern,
}

impl PatternFilter {
    /// Create a new pattern filter.
    ///
    /// Returns an error if the pattern is invalid.
    pub fn new(pattern: &str) -> Result<Self> {
        let compiled = Pattern::new(pattern).map_err(|e| {
            ConfigError::Invalid(format!("Invalid file pattern '{pattern}': {e}"))
        })?;

        Ok(Self {
            pattern: pattern.to_string(),
            compiled,
        })
    }

    /// Check if a name matches the pattern.
    pub fn matches(&self, name: &str) -> bool {
        let filename = name.rsplit('/').next().unwrap_or(name);
        self.compiled.matches(filename)
    }

    /// Get the original pattern string.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl Default for PatternFilter {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_FILE_PATTERN.to_string(),
            compiled: Pattern::new(DEFAULT_FILE_PATTERN).expect("default pattern is valid"),
        }
    }
}
