//! WebHDFS access.
//!
//! This module provides the production [`DirectoryLister`](hg_traits::DirectoryLister):
//! - Client configuration and `LISTSTATUS` decoding
//! - Namenode failover on startup

mod client;
mod selector;

pub use client::{
    DEFAULT_TIMEOUT_SECS, DEFAULT_WEBHDFS_PORT, WebHdfsConfig, WebHdfsLister, parse_list_status,
    parse_remote_error,
};
pub use selector::{NamenodeSelector, PROBE_PATH};
