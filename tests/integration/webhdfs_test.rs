//! Namenode selection and live WebHDFS listing.

use crate::common::MemoryLister;
use hg_error::HgError;
use hg_scanner::{NamenodeSelector, ScanConfig, SlotScanner, WebHdfsConfig};
use hg_traits::DirectoryLister;
use hg_types::{HourInterval, TopicConfig, TopicSources};

fn live_namenode() -> String {
    std::env::var("HG_TEST_NAMENODE").unwrap_or_else(|_| "localhost:50070".to_string())
}

#[tokio::test]
async fn test_select_skips_unhealthy_candidates() {
    let candidates = vec![
        MemoryLister::new().failing("/"),
        MemoryLister::new().with_directory("/", "data"),
    ];

    let chosen = NamenodeSelector::select(candidates).await.unwrap();

    assert_eq!(chosen.calls_for("/"), 1);
    assert!(chosen.list("/").await.is_ok());
}

#[tokio::test]
async fn test_select_rejects_missing_probe_path() {
    // A namenode that cannot list "/" is not usable.
    let candidates = vec![MemoryLister::new()];

    let err = NamenodeSelector::select(candidates).await.unwrap_err();

    match err {
        HgError::NoNamenodeAvailable { tried } => assert_eq!(tried, vec!["memory"]),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_connect_refused_namenode() {
    let hosts = vec!["127.0.0.1:1".to_string()];
    let config = WebHdfsConfig::new().with_timeout(2);

    let err = NamenodeSelector::connect(&hosts, &config).await.unwrap_err();

    match err {
        HgError::NoNamenodeAvailable { tried } => assert_eq!(tried, vec!["http://127.0.0.1:1/"]),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
#[ignore = "requires a running WebHDFS namenode"]
async fn test_live_failover_and_scan() {
    let hosts = vec!["127.0.0.1:1".to_string(), live_namenode()];
    let lister = NamenodeSelector::connect(&hosts, &WebHdfsConfig::new())
        .await
        .unwrap();

    let sources = TopicSources::new().with_topic(
        "probe",
        TopicConfig::new().with_primary_root("/hourglass-it/missing"),
    );
    let scanner = SlotScanner::new(lister, sources, ScanConfig::new()).unwrap();
    let interval = HourInterval::single(chrono::Utc::now());

    let report = scanner.scan("probe", &interval).await.unwrap();

    assert!(report.slots.is_empty());
    assert_eq!(report.stats.listings_issued, 1);
    assert_eq!(report.stats.listing_failures, 1);
}
