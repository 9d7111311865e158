//! Trait definitions for hourglass.
//!
//! The remote filesystem is reached only through [`DirectoryLister`], so the
//! scanner can be driven by WebHDFS in production and by in-memory listers
//! in tests.

pub mod lister;

pub use lister::{DirectoryLister, EntryKind, ListEntry};
