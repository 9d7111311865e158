//! hg-scanner - hourly slot discovery over HDFS.
//!
//! This crate finds, for a topic and an hour range, the landed files of
//! every hour and the events they hold, reading counts from file names
//! rather than file contents. It provides:
//!
//! - [`SlotScanner`] - hour enumeration and empty-slot filtering
//! - [`SlotResolver`] - per-hour root reconciliation and aggregation
//! - [`ListingCache`] - at-most-once directory listing per engine
//! - WebHDFS listing with namenode failover ([`webhdfs`])
//! - Slot output to stdout as JSONL/JSON ([`output`])
//!
//! # Example
//!
//! ```ignore
//! use hg_scanner::{NamenodeSelector, ScanConfig, SlotScanner, WebHdfsConfig};
//! use hg_types::{HourInterval, TopicSources};
//!
//! let hosts = vec!["nn1".to_string(), "nn2".to_string()];
//! let lister = NamenodeSelector::connect(&hosts, &WebHdfsConfig::new()).await?;
//! let sources = TopicSources::from_path("sources.yaml")?;
//!
//! let scanner = SlotScanner::new(lister, sources, ScanConfig::new())?;
//! let interval = HourInterval::new(start, end)?;
//!
//! for slot in scanner.slots("clicks", &interval).await? {
//!     println!("{} {} events", slot.time(), slot.events());
//! }
//! ```

pub mod cache;
pub mod config;
pub mod filter;
pub mod output;
pub mod resolver;
pub mod scanner;
pub mod stats;
pub mod webhdfs;

pub use cache::{CacheStats, CachedListing, ListingCache};
pub use config::ScanConfig;
pub use filter::{DEFAULT_FILE_PATTERN, PatternFilter};
pub use output::{Output, OutputFormat, StdoutOutput};
pub use resolver::SlotResolver;
pub use scanner::{ScanReport, SlotScanner};
pub use stats::ScanStats;
pub use webhdfs::{NamenodeSelector, WebHdfsConfig, WebHdfsLister};
