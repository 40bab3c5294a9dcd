pub mod xlsx;

pub use xlsx::{render_workbook, XlsxReportWriter, HIGHLIGHT_FILL_RGB};

use crate::core::Result;
use crate::report::Report;

pub trait ReportWriter {
    fn write_report(&mut self, report: &Report) -> Result<()>;
}
