// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod io;
pub mod report;

// Re-export commonly used types
pub use crate::core::{LoadError, Record, ReportError, Result};

pub use crate::config::{BuildMetadata, ReportConfig};

pub use crate::commands::{generate_report, prepare_report, ReportOutcome};

pub use crate::report::{
    build_report, find_changed_cells, CellRef, OrderedRecords, Report, SheetData,
};

pub use crate::io::{collect_records, RecordCollector, ReportWriter, XlsxReportWriter};
