// Test utility module for nightly-perf integration tests
#![allow(dead_code)]

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A throwaway input directory of benchmark results files.
pub struct ResultsDir {
    dir: TempDir,
}

impl ResultsDir {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write_raw(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).expect("failed to write fixture");
        path
    }

    pub fn write_json(&self, name: &str, value: &Value) -> PathBuf {
        self.write_raw(name, &serde_json::to_string_pretty(value).unwrap())
    }

    pub fn output_file(&self) -> PathBuf {
        self.dir.path().join("out").join("report.xlsx")
    }
}

/// Summary column index (0-based) of `name`.
pub fn column(columns: &[String], name: &str) -> usize {
    columns
        .iter()
        .position(|c| c == name)
        .unwrap_or_else(|| panic!("column {name} missing"))
}
