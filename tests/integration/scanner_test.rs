//! End-to-end slot scanning over an in-memory directory tree.

use crate::common::{MemoryLister, hour, hours};
use hg_error::{ConfigError, HgError};
use hg_scanner::{ListingCache, ScanConfig, SlotScanner};
use hg_types::{TopicConfig, TopicSources, event_count, pattern_for};

fn sources() -> TopicSources {
    TopicSources::new()
        .with_topic(
            "t",
            TopicConfig::new()
                .with_primary_root("hdfs://nn:8020/data/t")
                .with_stale_root("/stale/t"),
        )
        .with_topic("quiet", TopicConfig::new().with_primary_root("/data/quiet"))
}

/// A day of `t` with data in hours 01, 03 and 04, some of it landed twice.
fn lister() -> MemoryLister {
    MemoryLister::new()
        .with_file("/data/t/2021/01/02/01", "part.a.b.5.gz")
        .with_file("/data/t/2021/01/02/01", "_SUCCESS")
        .with_file("/data/t/2021/01/02/03", "file.a.b.17.gz")
        .with_file("/stale/t/2021/01/02/03", "late.a.b.3.gz")
        .with_file("/data/t/2021/01/02/04", "part.a.b.0.gz")
        .with_file("/data/t/2021/01/02/04", "part.a.b.9.gz.tmp")
        .with_directory("/data/t/2021/01/02/02", "_temporary")
}

fn scanner(lister: MemoryLister) -> SlotScanner<MemoryLister> {
    SlotScanner::new(lister, sources(), ScanConfig::new()).unwrap()
}

#[tokio::test]
async fn test_slots_bounded_by_hours_and_never_empty() {
    let scanner = scanner(lister());
    let interval = hours(0, 5);

    let slots = scanner.slots("t", &interval).await.unwrap();

    assert!(slots.len() <= interval.len());
    assert!(slots.iter().all(|slot| slot.events() >= 1));
    assert!(
        slots
            .iter()
            .all(|slot| interval.start() <= slot.time() && slot.time() <= interval.end())
    );
    assert_eq!(
        slots.iter().map(|s| s.time()).collect::<Vec<_>>(),
        vec![hour(1), hour(3)]
    );
}

#[tokio::test]
async fn test_single_slot_end_to_end() {
    let lister = MemoryLister::new().with_file("/data/t/2021/01/02/03", "file.a.b.17.gz");
    let sources =
        TopicSources::new().with_topic("t", TopicConfig::new().with_primary_root("/data/t"));
    let scanner = SlotScanner::new(lister, sources, ScanConfig::new()).unwrap();

    let slots = scanner.slots("t", &hours(3, 3)).await.unwrap();

    assert_eq!(slots.len(), 1);
    let record = slots[0].to_record();
    assert_eq!(record.topic, "t");
    assert_eq!(record.time, hour(3));
    assert_eq!(record.paths, vec!["/data/t/2021/01/02/03/file.a.b.17.gz"]);
    assert_eq!(record.patterns, vec!["/data/t/2021/01/02/03/*.gz"]);
    assert_eq!(record.events, 17);
}

#[tokio::test]
async fn test_primary_and_stale_roots_merge() {
    let scanner = scanner(lister());

    let slots = scanner.slots("t", &hours(3, 3)).await.unwrap();

    assert_eq!(
        slots[0].paths(),
        [
            "/data/t/2021/01/02/03/file.a.b.17.gz",
            "/stale/t/2021/01/02/03/late.a.b.3.gz",
        ]
    );
    assert_eq!(slots[0].events(), 20);
    assert_eq!(
        slots[0].patterns(),
        vec!["/data/t/2021/01/02/03/*.gz", "/stale/t/2021/01/02/03/*.gz"]
    );
}

#[tokio::test]
async fn test_duplicate_roots_count_files_once() {
    let lister = MemoryLister::new().with_file("/data/t/2021/01/02/03", "file.a.b.17.gz");
    let sources = TopicSources::new().with_topic(
        "t",
        TopicConfig::new()
            .with_primary_root("/data/t")
            .with_stale_root(vec!["hdfs://nn:8020/data/t", "/data/t/"]),
    );
    let scanner = SlotScanner::new(lister, sources, ScanConfig::new()).unwrap();

    let slots = scanner.slots("t", &hours(3, 3)).await.unwrap();

    assert_eq!(slots[0].paths().len(), 1);
    assert_eq!(slots[0].events(), 17);
    assert_eq!(scanner.lister().calls_for("/data/t/2021/01/02/03"), 1);
}

#[tokio::test]
async fn test_fresh_caches_are_idempotent() {
    let scanner = scanner(lister());

    let first = scanner
        .slots_with_cache("t", &hours(0, 5), &ListingCache::new())
        .await
        .unwrap();
    let second = scanner
        .slots_with_cache("t", &hours(0, 5), &ListingCache::new())
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(scanner.lister().calls_for("/data/t/2021/01/02/03"), 2);
}

#[tokio::test]
async fn test_overlapping_rescan_issues_no_listings() {
    let scanner = scanner(lister());
    let cache = ListingCache::new();

    let wide = scanner.slots_with_cache("t", &hours(0, 5), &cache).await.unwrap();
    let calls = scanner.lister().total_calls();
    let narrow = scanner.slots_with_cache("t", &hours(2, 4), &cache).await.unwrap();

    assert_eq!(scanner.lister().total_calls(), calls);
    let expected: Vec<_> = wide
        .into_iter()
        .filter(|slot| (hour(2)..=hour(4)).contains(&slot.time()))
        .collect();
    assert_eq!(narrow, expected);
}

#[tokio::test]
async fn test_failed_listing_collapses_to_empty() {
    let lister = lister().failing("/stale/t/2021/01/02/03");
    let scanner = scanner(lister);

    let report = scanner.scan("t", &hours(3, 3)).await.unwrap();

    assert_eq!(report.slots[0].events(), 17);
    assert_eq!(report.stats.listing_failures, 1);
    assert!(scanner.cache().get("/stale/t/2021/01/02/03").unwrap().is_failed());

    // Not retried through the same cache
    scanner.scan("t", &hours(3, 3)).await.unwrap();
    assert_eq!(scanner.lister().calls_for("/stale/t/2021/01/02/03"), 1);
}

#[tokio::test]
async fn test_interval_without_data_is_empty() {
    let scanner = scanner(lister());

    let slots = scanner.slots("quiet", &hours(0, 23)).await.unwrap();

    assert!(slots.is_empty());
    assert_eq!(scanner.lister().total_calls(), 24);
}

#[tokio::test]
async fn test_unknown_topic_is_fatal() {
    let scanner = scanner(lister());

    let err = scanner.slots("nope", &hours(0, 5)).await.unwrap_err();

    assert!(matches!(err, HgError::Config(ConfigError::UnknownTopic(ref t)) if t == "nope"));
    assert_eq!(scanner.lister().total_calls(), 0);
}

#[tokio::test]
async fn test_malformed_topic_is_fatal() {
    let sources = TopicSources::from_yaml_str(
        r#"
bad:
  input:
    gobblin: "relative/path"
"#,
    )
    .unwrap();
    let scanner = SlotScanner::new(MemoryLister::new(), sources, ScanConfig::new()).unwrap();

    let err = scanner.slots("bad", &hours(0, 1)).await.unwrap_err();

    match err {
        HgError::Config(config) => assert_eq!(config.topic(), Some("bad")),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(scanner.lister().total_calls(), 0);
}

#[tokio::test]
async fn test_custom_file_pattern() {
    let lister = MemoryLister::new()
        .with_file("/data/t/2021/01/02/03", "part.a.b.4.gz")
        .with_file("/data/t/2021/01/02/03", "part.a.b.6.lzo");
    let sources =
        TopicSources::new().with_topic("t", TopicConfig::new().with_primary_root("/data/t"));
    let scanner =
        SlotScanner::new(lister, sources, ScanConfig::new().with_file_pattern("*.lzo")).unwrap();

    let slots = scanner.slots("t", &hours(3, 3)).await.unwrap();

    assert_eq!(slots[0].events(), 6);
    assert_eq!(slots[0].patterns(), vec!["/data/t/2021/01/02/03/*.lzo"]);
}

#[test]
fn test_event_count_and_pattern_helpers() {
    assert_eq!(event_count("/x/part.00.00.42.gz"), 42);
    assert_eq!(event_count("/x/part.gz"), 0);
    assert_eq!(pattern_for("/a/b/2020/x.y.z.gz"), "/a/b/2020/*.gz");
}
