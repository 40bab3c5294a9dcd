//! Command implementations behind the `nightly-perf` binary.
//!
//! - **generate**: collect benchmark JSON, build the report, save the workbook

pub mod generate;

pub use generate::{generate_report, prepare_report, ReportOutcome};
