//! Output implementations for discovered slots.
//!
//! This module provides the [`Output`] trait and the [`StdoutOutput`]
//! implementation, which writes slots as JSON or JSONL for downstream
//! schedulers to consume.

mod stdout;

pub use stdout::{OutputFormat, StdoutOutput};

use async_trait::async_trait;
use hg_error::Result;
use hg_types::SlotRecord;

/// Trait for outputting discovered slots.
///
/// Slots are handed over in ascending hour order.
#[async_trait]
pub trait Output: Send + Sync {
    /// Output a single slot.
    async fn output(&self, slot: &SlotRecord) -> Result<()>;

    /// Flush any buffered output.
    ///
    /// Called after all slots have been output.
    async fn flush(&self) -> Result<()>;
}
