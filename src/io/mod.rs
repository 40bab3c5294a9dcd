pub mod lenient;
pub mod loader;
pub mod walker;
pub mod writers;

pub use loader::{load_record, parse_record, read_record};
pub use walker::{collect_records, JsonRecords, RecordCollector};
pub use writers::{ReportWriter, XlsxReportWriter};

use crate::core::{ReportError, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Directory that will hold `path`; a bare file name resolves to `.`.
fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    let parent = parent_dir(path);
    fs::create_dir_all(&parent).map_err(|e| {
        ReportError::file_system("Failed to create output directory", &parent, e)
    })
}

/// Write `bytes` next to `path` and rename over it, so readers see either
/// the previous file or the complete new one.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    ensure_parent_dir(path)?;
    let parent = parent_dir(path);

    let mut staged = tempfile::NamedTempFile::new_in(&parent)
        .map_err(|e| ReportError::file_system("Failed to create temporary file", &parent, e))?;
    staged
        .write_all(bytes)
        .and_then(|()| staged.flush())
        .map_err(|e| ReportError::file_system("Failed to write report", path, e))?;
    staged
        .persist(path)
        .map_err(|e| ReportError::file_system("Failed to save report", path, e.error))?;
    Ok(())
}
