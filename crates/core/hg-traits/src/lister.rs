//! Remote directory listing trait and related types.

use async_trait::async_trait;
use hg_error::ListingError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Trait for remote directory listing backends.
///
/// Implementations include:
/// - WebHDFS `LISTSTATUS` (production)
/// - In-memory directory trees (tests)
///
/// A call lists the immediate children of one directory. Failures are
/// reported per path; callers decide whether a failure is fatal.
#[async_trait]
pub trait DirectoryLister: Send + Sync {
    /// Lists the immediate entries of `path`.
    async fn list(&self, path: &str) -> Result<Vec<ListEntry>, ListingError>;

    /// Human-readable identity of the backend, used in logs.
    fn endpoint(&self) -> String {
        "unknown".to_string()
    }
}

#[async_trait]
impl<L: DirectoryLister + ?Sized> DirectoryLister for Arc<L> {
    async fn list(&self, path: &str) -> Result<Vec<ListEntry>, ListingError> {
        (**self).list(path).await
    }

    fn endpoint(&self) -> String {
        (**self).endpoint()
    }
}

/// Kind of a listed entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntryKind {
    /// Regular file
    #[default]
    File,
    /// Sub-directory
    Directory,
    /// Symbolic link
    Symlink,
}

/// One child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    /// Final path component, relative to the listed directory
    pub path_suffix: String,

    /// Entry kind
    pub kind: EntryKind,

    /// Size in bytes (0 for directories)
    pub length: u64,
}

impl ListEntry {
    /// Creates a file entry.
    pub fn file(path_suffix: impl Into<String>, length: u64) -> Self {
        Self {
            path_suffix: path_suffix.into(),
            kind: EntryKind::File,
            length,
        }
    }

    /// Creates a directory entry.
    pub fn directory(path_suffix: impl Into<String>) -> Self {
        Self {
            path_suffix: path_suffix.into(),
            kind: EntryKind::Directory,
            length: 0,
        }
    }

    /// Full path of this entry under `dir`.
    pub fn full_path(&self, dir: &str) -> String {
        format!("{}/{}", dir.trim_end_matches('/'), self.path_suffix)
    }
}
