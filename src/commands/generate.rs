use crate::config::{load_summary_columns, ReportConfig};
use crate::core::Result;
use crate::io::{RecordCollector, ReportWriter, XlsxReportWriter};
use crate::report::{build_report, Report};
use serde::Serialize;
use std::path::PathBuf;

/// What a report run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportOutcome {
    pub output_file: PathBuf,
    pub record_count: usize,
    pub highlighted_cells: usize,
    pub stamped_records: usize,
    pub raw_sheet_written: bool,
}

impl ReportOutcome {
    fn from_report(output_file: PathBuf, report: &Report) -> Self {
        Self {
            output_file,
            record_count: report.record_count(),
            highlighted_cells: report.summary.highlights.len(),
            stamped_records: report.stamped_records,
            raw_sheet_written: report.raw.is_some(),
        }
    }
}

// =============================================================================
// I/O Shell Functions (Side Effects at Boundaries)
// =============================================================================

/// I/O: Collect records and build the report without writing it.
pub fn prepare_report(config: &ReportConfig) -> Report {
    let summary_columns = load_summary_columns(config.summary_columns_file.as_deref());

    let records = RecordCollector::new(&config.input_dir).collect_records();
    if records.is_empty() {
        log::warn!(
            "No valid json records found under '{}'",
            config.input_dir.display()
        );
    } else {
        log::debug!(
            "Collected {} records from '{}'",
            records.len(),
            config.input_dir.display()
        );
    }

    build_report(records, &summary_columns, &config.build) // Pure!
}

/// I/O Shell: Main entry point - collect, build, then save the workbook.
///
/// Bad input files only cost their own rows; failing to write the output is
/// the only fatal error.
pub fn generate_report(config: &ReportConfig) -> Result<ReportOutcome> {
    let report = prepare_report(config);

    let mut writer = XlsxReportWriter::new(&config.output_file);
    writer.write_report(&report)?;

    let outcome = ReportOutcome::from_report(config.output_file.clone(), &report);
    log::info!(
        "Excel report saved to '{}' ({} records, {} highlighted cells)",
        outcome.output_file.display(),
        outcome.record_count,
        outcome.highlighted_cells
    );
    Ok(outcome)
}
