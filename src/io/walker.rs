use crate::core::{Record, DATE_FIELD, DEFAULT_DATE_FORMAT, SOURCE_FILE_FIELD};
use crate::io::loader::load_record;
use chrono::Utc;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const JSON_SUFFIX: &str = ".json";

/// Finds the results files in one input directory and normalizes them into
/// records.
pub struct RecordCollector {
    root: PathBuf,
    default_date: Option<String>,
}

impl RecordCollector {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            default_date: None,
        }
    }

    /// Pin the date stamped onto records that carry none. Defaults to the
    /// UTC time at which [`records`](Self::records) is called.
    pub fn with_default_date(mut self, date: impl Into<String>) -> Self {
        self.default_date = Some(date.into());
        self
    }

    /// Lazily walk the directory (non-recursive, filename order). Every call
    /// re-reads the directory.
    pub fn records(&self) -> JsonRecords {
        let default_date = self
            .default_date
            .clone()
            .unwrap_or_else(|| Utc::now().format(DEFAULT_DATE_FORMAT).to_string());

        if !self.root.is_dir() {
            log::warn!(
                "Input dir '{}' does not exist or is not a directory",
                self.root.display()
            );
            return JsonRecords {
                entries: None,
                default_date,
            };
        }

        let entries = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter();

        JsonRecords {
            entries: Some(entries),
            default_date,
        }
    }

    pub fn collect_records(&self) -> Vec<Record> {
        self.records().collect()
    }
}

/// Iterator returned by [`RecordCollector::records`].
pub struct JsonRecords {
    entries: Option<walkdir::IntoIter>,
    default_date: String,
}

impl Iterator for JsonRecords {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        let entries = self.entries.as_mut()?;
        for entry in entries.by_ref() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Failed to read directory entry: {}", e);
                    continue;
                }
            };

            let path = entry.path();
            if !is_json_file(path) {
                continue;
            }

            if let Some(record) = load_record(path) {
                return Some(normalize(record, path, &self.default_date));
            }
        }
        None
    }
}

fn is_json_file(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().ends_with(JSON_SUFFIX))
        .unwrap_or(false)
        && path.is_file()
}

/// Pure: stamp the default date if missing and always record the origin file.
fn normalize(mut record: Record, path: &Path, default_date: &str) -> Record {
    record.insert_default(DATE_FIELD, default_date);
    let basename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    record.insert(SOURCE_FILE_FIELD, basename);
    record
}

/// Collect every valid record under `root`.
pub fn collect_records(root: &Path) -> Vec<Record> {
    RecordCollector::new(root).collect_records()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn test_missing_directory_yields_nothing() {
        let dir = TempDir::new().unwrap();
        let records = collect_records(&dir.path().join("nope"));
        assert!(records.is_empty());
    }

    #[test]
    fn test_file_path_is_not_a_directory() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.json", "{}");
        assert!(collect_records(&dir.path().join("a.json")).is_empty());
    }

    #[test]
    fn test_visits_json_files_in_filename_order() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "b.json", r#"{"model_id": "b"}"#);
        write(dir.path(), "a.json", r#"{"model_id": "a"}"#);
        write(dir.path(), "c.txt", r#"{"model_id": "c"}"#);
        write(dir.path(), "d.json.bak", r#"{"model_id": "d"}"#);
        fs::create_dir(dir.path().join("nested.json")).unwrap();

        let records = collect_records(dir.path());
        let models: Vec<_> = records.iter().map(|r| r.model_id().into_owned()).collect();
        assert_eq!(models, vec!["a", "b"]);
    }

    #[test]
    fn test_source_file_is_always_overwritten() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "run.json",
            r#"{"date": "20260101", "source_file": "elsewhere.json"}"#,
        );

        let records = collect_records(dir.path());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].source_file(), "run.json");
        assert_eq!(records[0].date(), "20260101");
    }

    #[test]
    fn test_missing_date_gets_default() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "run.json", r#"{"model_id": "m1"}"#);

        let records = RecordCollector::new(dir.path())
            .with_default_date("20260315-120000")
            .collect_records();
        assert_eq!(records[0].date(), "20260315-120000");
    }

    #[test]
    fn test_generated_default_date_shape() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "run.json", "{}");

        let records = collect_records(dir.path());
        let date = records[0].date();
        assert_eq!(date.len(), "YYYYMMDD-HHMMSS".len());
        assert_eq!(&date[8..9], "-");
    }

    #[test]
    fn test_bad_files_are_skipped() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "1.json", "[1, 2]");
        write(dir.path(), "2.json", "not json");
        write(dir.path(), "3.json", r#"{"model_id": "ok"}"#);

        let records = collect_records(dir.path());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].model_id(), "ok");
    }

    #[test]
    fn test_each_call_rereads_directory() {
        let dir = TempDir::new().unwrap();
        let collector = RecordCollector::new(dir.path());
        assert_eq!(collector.records().count(), 0);

        write(dir.path(), "late.json", "{}");
        assert_eq!(collector.records().count(), 1);
    }
}
