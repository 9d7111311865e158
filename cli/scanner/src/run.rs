//! Main execution logic for hg-scan CLI.

use hg_error::Result;
use hg_scanner::{
    NamenodeSelector, Output, ScanConfig, ScanReport, SlotScanner, StdoutOutput, WebHdfsConfig,
};
use hg_types::{HourInterval, TopicSources};
use tracing::info;

use crate::args::Cli;

/// Reports of a completed run, one per requested topic in argument order.
pub type RunReports = Vec<(String, ScanReport)>;

/// Execute a scan with the provided arguments.
///
/// Every topic is scanned before anything is written, so a configuration
/// error in any topic leaves stdout empty.
pub async fn execute(args: Cli) -> Result<RunReports> {
    let sources = TopicSources::from_path(&args.sources)?;
    info!(
        sources = %args.sources.display(),
        topics = sources.len(),
        "Loaded topic sources"
    );

    let interval = HourInterval::new(args.start, args.end)?;

    let mut webhdfs = WebHdfsConfig::new()
        .with_port(args.port)
        .with_timeout(args.timeout_secs)
        .with_https(args.https);
    if let Some(user) = &args.user {
        webhdfs = webhdfs.with_user(user);
    }

    let lister = NamenodeSelector::connect(&args.namenodes, &webhdfs).await?;

    let config = ScanConfig::new().with_file_pattern(&args.file_pattern);
    let scanner = SlotScanner::new(lister, sources, config)?;

    let mut reports = Vec::with_capacity(args.topics.len());
    for topic in &args.topics {
        let report = scanner.scan(topic, &interval).await?;
        reports.push((topic.clone(), report));
    }

    let output = StdoutOutput::new(args.output_format.into());
    write_slots(&output, &reports).await?;

    Ok(reports)
}

/// Hand every slot of every report to `output`, then flush it.
pub async fn write_slots<O: Output>(output: &O, reports: &RunReports) -> Result<()> {
    for (_, report) in reports {
        for slot in &report.slots {
            output.output(&slot.to_record()).await?;
        }
    }
    output.flush().await
}
