//! Stdout output implementation for discovered slots.

use async_trait::async_trait;
use hg_error::Result;
use hg_types::SlotRecord;
use serde::{Deserialize, Serialize};
use std::io::Write;

use super::Output;

/// Output format for stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON Lines format - one JSON object per line (default)
    #[default]
    Jsonl,

    /// Pretty-printed JSON
    Json,
}

/// Stdout output implementation.
///
/// JSONL output puts each slot on its own line, suitable for piping to `jq`
/// or counting with `wc -l`.
pub struct StdoutOutput {
    format: OutputFormat,
}

impl StdoutOutput {
    /// Create a new StdoutOutput with the specified format.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Create a new StdoutOutput with JSONL format (default).
    pub fn jsonl() -> Self {
        Self::new(OutputFormat::Jsonl)
    }

    /// Create a new StdoutOutput with pretty-printed JSON format.
    pub fn json() -> Self {
        Self::new(OutputFormat::Json)
    }

    /// Render one slot in the configured format.
    pub fn render(&self, slot: &SlotRecord) -> Result<String> {
        let rendered = match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(slot),
            OutputFormat::Jsonl => serde_json::to_string(slot),
        }
        .map_err(|e| anyhow::anyhow!("JSON serialization failed: {e}"))?;

        Ok(rendered)
    }
}

impl Default for StdoutOutput {
    fn default() -> Self {
        Self::jsonl()
    }
}

#[async_trait]
impl Output for StdoutOutput {
    async fn output(&self, slot: &SlotRecord) -> Result<()> {
        println!("{}", self.render(slot)?);
        Ok(())
    }

    async fn flush(&self) -> Result<()> {
        std::io::stdout()
            .flush()
            .map_err(|e| anyhow::anyhow!("Failed to flush stdout: {e}"))?;
        Ok(())
    }
}
