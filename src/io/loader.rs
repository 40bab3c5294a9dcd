use crate::core::{LoadError, Record};
use crate::io::lenient;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Parse one results file. The record is returned exactly as found on disk.
pub fn read_record(path: &Path) -> Result<Record, LoadError> {
    let text = fs::read_to_string(path)?;
    parse_record(&text)
}

/// Strict JSON first; text carrying `NaN`, `Infinity` or overflowing numbers
/// gets a lenient second pass. A failure reports the strict parse error.
pub fn parse_record(text: &str) -> Result<Record, LoadError> {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => Record::from_value(value).ok_or(LoadError::NotAnObject),
        Err(strict) => {
            let value = lenient::parse_marked(text).ok_or(strict)?;
            lenient::unmark_record(value).ok_or(LoadError::NotAnObject)
        }
    }
}

/// Like [`read_record`], but a bad file is logged and skipped.
pub fn load_record(path: &Path) -> Option<Record> {
    match read_record(path) {
        Ok(record) => Some(record),
        Err(e) => {
            log::warn!("Skipping '{}': {}", path.display(), e);
            None
        }
    }
}
