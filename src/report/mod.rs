//! Pure report engine: order records, stamp build metadata, detect changes
//! and lay out both sheets.
//!
//! ```rust
//! use nightly_perf::config::{default_summary_columns, BuildMetadata};
//! use nightly_perf::core::Record;
//! use nightly_perf::report::build_report;
//! use serde_json::json;
//!
//! let records = vec![
//!     Record::from_value(json!({"date": "20260101", "model_id": "m1", "request_throughput": 10.0})).unwrap(),
//!     Record::from_value(json!({"date": "20260102", "model_id": "m1", "request_throughput": 12.0})).unwrap(),
//! ];
//! let report = build_report(records, &default_summary_columns(), &BuildMetadata::default());
//!
//! assert_eq!(report.summary.row_count(), 3);
//! assert_eq!(report.summary.highlights.len(), 1);
//! assert!(report.raw.is_some());
//! ```

pub mod highlight;
pub mod metadata;
pub mod ordering;
pub mod sheet;

pub use highlight::{find_changed_cells, floats_differ, values_differ, CellRef, FLOAT_TOLERANCE};
pub use metadata::{apply_build_metadata_to_latest, latest_date};
pub use ordering::{ModelBlock, ModelBlocks, OrderedRecords};
pub use sheet::{
    build_raw_sheet, build_summary_sheet, cell_value, coerce_numeric, raw_columns,
    truncate_cell_text, Cell, CellValue, DisplayHint, SheetData, DECIMAL_FORMAT,
    MAX_CELL_TEXT_CHARS, NUMERIC_COLUMN_WIDTH, RAW_SHEET, SUMMARY_SHEET,
};

use crate::config::BuildMetadata;
use crate::core::Record;

/// Both sheets of a finished report, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub summary: SheetData,
    /// Absent when no records were collected.
    pub raw: Option<SheetData>,
    /// Records stamped with the build metadata.
    pub stamped_records: usize,
}

impl Report {
    pub fn record_count(&self) -> usize {
        self.summary.rows.len()
    }

    pub fn sheets(&self) -> impl Iterator<Item = &SheetData> {
        std::iter::once(&self.summary).chain(self.raw.as_ref())
    }
}

/// Run the engine over already-collected records.
pub fn build_report(
    records: Vec<Record>,
    summary_columns: &[String],
    build: &BuildMetadata,
) -> Report {
    let mut ordered = OrderedRecords::from_records(records);
    let stamped_records = apply_build_metadata_to_latest(ordered.records_mut(), build);

    let highlights = find_changed_cells(&ordered, summary_columns);
    let summary = build_summary_sheet(&ordered, summary_columns, highlights);
    let raw = (!ordered.is_empty()).then(|| build_raw_sheet(&ordered, summary_columns));

    Report {
        summary,
        raw,
        stamped_records,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_summary_columns;
    use crate::core::COMMIT_SHA_FIELD;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        Record::from_value(value).unwrap()
    }

    #[test]
    fn test_empty_input_has_header_only_summary() {
        let columns = default_summary_columns();
        let report = build_report(Vec::new(), &columns, &BuildMetadata::default());

        assert_eq!(report.summary.row_count(), 1);
        assert_eq!(report.summary.columns, columns);
        assert!(report.raw.is_none());
        assert_eq!(report.sheets().count(), 1);
        assert_eq!(report.stamped_records, 0);
    }

    #[test]
    fn test_build_metadata_lands_on_latest_rows() {
        let build = BuildMetadata::new(Some("abc".into()), None, None);
        let report = build_report(
            vec![
                record(json!({ "date": "20260101", "model_id": "m1" })),
                record(json!({ "date": "20260102", "model_id": "m1" })),
            ],
            &default_summary_columns(),
            &build,
        );

        assert_eq!(report.stamped_records, 1);
        assert_eq!(
            report.summary.cell(0, COMMIT_SHA_FIELD).map(|c| &c.value),
            Some(&CellValue::Text("abc".into()))
        );
        assert_eq!(
            report.summary.cell(1, COMMIT_SHA_FIELD).map(|c| &c.value),
            Some(&CellValue::Empty)
        );
    }

    #[test]
    fn test_raw_sheet_includes_build_columns() {
        let report = build_report(
            vec![record(json!({ "date": "20260101", "extra": 1 }))],
            &default_summary_columns(),
            &BuildMetadata::default(),
        );
        let raw = report.raw.unwrap();
        assert_eq!(
            raw.columns,
            vec!["date", "commit_sha", "build_id", "build_url", "extra"]
        );
    }
}
