//! hg-scan CLI
//!
//! Hourly slot discovery over WebHDFS.

use clap::Parser;
use hg_cli_common::{format_number, init_logging};
use hg_error::{ErrorCategory, HgError, classify_error};
use tracing::error;

mod args;
mod run;

use args::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    // Initialize logging (to stderr, so stdout is clean for slots)
    init_logging(args.log_level)?;

    let reports = match run::execute(args).await {
        Ok(reports) => reports,
        Err(e) => std::process::exit(report_failure(&e)),
    };

    // Report results to stderr
    eprintln!();
    eprintln!("Scan completed:");
    for (topic, report) in &reports {
        let stats = &report.stats;
        eprintln!("  Topic {topic}:");
        eprintln!("    Hours scanned:    {}", format_number(stats.hours_scanned as u64));
        eprintln!("    Slots found:      {}", format_number(stats.slots_found as u64));
        eprintln!("    Files matched:    {}", format_number(stats.files_matched as u64));
        eprintln!("    Events:           {}", format_number(stats.events));
        eprintln!("    Listings issued:  {}", format_number(stats.listings_issued));
        eprintln!("    Cache hits:       {}", format_number(stats.cache_hits));
        eprintln!("    Listing failures: {}", format_number(stats.listing_failures));

        if let Some(duration) = stats.duration() {
            eprintln!(
                "    Duration:         {:.2}s",
                duration.num_milliseconds() as f64 / 1000.0
            );
        }
    }

    Ok(())
}

/// Log a failed run and pick its exit code.
fn report_failure(err: &HgError) -> i32 {
    match err {
        HgError::Config(config) => {
            error!(
                topic = config.topic().unwrap_or("-"),
                error = %config,
                "Fatal configuration error"
            );
            1
        }
        HgError::NoNamenodeAvailable { tried } => {
            error!(tried = ?tried, "No namenode available");
            2
        }
        other => {
            let category = match classify_error(other) {
                ErrorCategory::Recoverable => "recoverable",
                ErrorCategory::Fatal => "fatal",
            };
            error!(error = %other, category, "Scan failed");
            3
        }
    }
}
