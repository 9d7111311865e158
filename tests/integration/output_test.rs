//! Slot records handed to outputs.

use crate::common::{CollectingOutput, MemoryLister, hour, hours};
use hg_scanner::{Output, ScanConfig, SlotScanner, StdoutOutput};
use hg_types::{SlotRecord, TopicConfig, TopicSources};

async fn scan_into(output: &CollectingOutput) {
    let lister = MemoryLister::new()
        .with_file("/data/t/2021/01/02/05", "b.x.y.2.gz")
        .with_file("/data/t/2021/01/02/05", "a.x.y.1.gz")
        .with_file("/data/t/2021/01/02/07", "c.x.y.30.gz");
    let sources =
        TopicSources::new().with_topic("t", TopicConfig::new().with_primary_root("/data/t"));
    let scanner = SlotScanner::new(lister, sources, ScanConfig::new()).unwrap();

    for slot in scanner.slots("t", &hours(4, 8)).await.unwrap() {
        output.output(&slot.to_record()).await.unwrap();
    }
    output.flush().await.unwrap();
}

#[tokio::test]
async fn test_records_arrive_in_hour_order() {
    let output = CollectingOutput::new();

    scan_into(&output).await;

    let records = output.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].time, hour(5));
    assert_eq!(records[0].events, 3);
    assert_eq!(records[0].patterns, vec!["/data/t/2021/01/02/05/*.gz"]);
    assert_eq!(records[1].time, hour(7));
    assert_eq!(records[1].events, 30);
    assert_eq!(output.flushes(), 1);
}

#[tokio::test]
async fn test_jsonl_rendering_decodes_back() {
    let output = CollectingOutput::new();
    scan_into(&output).await;
    let record = output.records().remove(0);

    let line = StdoutOutput::jsonl().render(&record).unwrap();

    assert!(!line.contains('\n'));
    assert!(line.contains(r#""time":"2021-01-02T05:00:00Z""#));
    let decoded: SlotRecord = serde_json::from_str(&line).unwrap();
    assert_eq!(decoded, record);
}
