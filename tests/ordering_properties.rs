//! Property-based tests for report ordering and highlighting
//!
//! These tests verify invariants that should hold for all inputs:
//! - Each model's rows are contiguous and newest first
//! - Highlights only ever land on a model's newest row
//! - Build metadata reaches exactly the records sharing the latest date
//! - The raw sheet has one row per record plus the header

use nightly_perf::config::{default_summary_columns, BuildMetadata};
use nightly_perf::core::Record;
use nightly_perf::report::{build_report, CellValue, OrderedRecords};
use proptest::prelude::*;
use serde_json::json;
use std::collections::HashSet;

/// Generate a benchmark run for one of a handful of models and dates
fn benchmark_run() -> impl Strategy<Value = Record> {
    ("m[0-3]", 1u32..=5, 0i64..4, prop::option::of(0.0f64..2.0)).prop_map(
        |(model, day, failed, ttft)| {
            let mut value = json!({
                "model_id": model,
                "date": format!("202601{:02}", day),
                "failed": failed,
            });
            if let (Some(ttft), Some(obj)) = (ttft, value.as_object_mut()) {
                obj.insert("mean_ttft_ms".into(), json!(ttft));
            }
            Record::from_value(value).unwrap()
        },
    )
}

fn build() -> BuildMetadata {
    BuildMetadata::new(Some("abc".into()), Some("7".into()), None)
}

proptest! {
    /// Property: ordering groups each model into one contiguous block whose
    /// dates never increase
    #[test]
    fn prop_model_blocks_are_contiguous(runs in prop::collection::vec(benchmark_run(), 0..30)) {
        let total = runs.len();
        let ordered = OrderedRecords::from_records(runs);
        prop_assert_eq!(ordered.len(), total);

        let mut seen = HashSet::new();
        let mut covered = 0;
        for block in ordered.blocks() {
            prop_assert!(seen.insert(block.model_id().into_owned()));
            prop_assert_eq!(block.start(), covered);
            covered += block.records().len();

            let dates: Vec<_> = block.records().iter().map(|r| r.date().into_owned()).collect();
            prop_assert!(dates.windows(2).all(|pair| pair[0] >= pair[1]));
        }
        prop_assert_eq!(covered, total);
    }

    /// Property: every highlighted cell sits on the first row of its model block
    #[test]
    fn prop_highlights_only_on_newest_rows(runs in prop::collection::vec(benchmark_run(), 0..30)) {
        let ordered = OrderedRecords::from_records(runs.clone());
        let newest_rows: HashSet<u32> = ordered
            .blocks()
            .filter(|block| block.previous().is_some())
            .map(|block| (block.start() + 2) as u32)
            .collect();

        let report = build_report(runs, &default_summary_columns(), &build());
        for cell in &report.summary.highlights {
            prop_assert!(newest_rows.contains(&cell.row), "unexpected highlight {:?}", cell);
        }
    }

    /// Property: build metadata is present exactly on records tied at the
    /// latest date
    #[test]
    fn prop_metadata_only_on_latest_date(runs in prop::collection::vec(benchmark_run(), 1..30)) {
        let latest = runs.iter().map(|r| r.date().into_owned()).max().unwrap();
        let expected = runs.iter().filter(|r| r.date() == latest).count();

        let report = build_report(runs, &default_summary_columns(), &build());
        prop_assert_eq!(report.stamped_records, expected);

        for index in 0..report.record_count() {
            let date = report.summary.cell(index, "date").map(|c| c.value.clone());
            let build_id = report.summary.cell(index, "build_id").map(|c| c.value.clone());
            let build_url = report.summary.cell(index, "build_url").map(|c| c.value.clone());

            if date == Some(CellValue::Text(latest.clone())) {
                prop_assert_eq!(build_id, Some(CellValue::Text("7".into())));
            } else {
                prop_assert_eq!(build_id, Some(CellValue::Empty));
            }
            prop_assert_eq!(build_url, Some(CellValue::Empty));
        }
    }

    /// Property: the raw sheet carries one row per record plus the header
    #[test]
    fn prop_raw_sheet_row_count(runs in prop::collection::vec(benchmark_run(), 1..30)) {
        let total = runs.len();
        let report = build_report(runs, &default_summary_columns(), &build());

        let raw = report.raw.expect("raw sheet for non-empty input");
        prop_assert_eq!(raw.row_count(), total + 1);
        prop_assert_eq!(report.summary.row_count(), total + 1);
    }
}
