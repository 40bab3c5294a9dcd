//! Explicit configuration handed to the report pipeline.
//!
//! Nothing below the CLI reads process environment: paths, the schema
//! override and the build-metadata triple all arrive through
//! [`ReportConfig`].

pub mod columns;

pub use columns::{
    default_summary_columns, is_numeric_format_column, load_summary_columns,
    numeric_format_columns, parse_summary_columns, BENCHMARK_COLUMNS,
    IRREGULAR_BENCHMARK_COLUMNS, SUMMARY_COLUMNS_FILENAME,
};

use std::path::PathBuf;

/// CI build identifiers stamped onto the most recent rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildMetadata {
    pub commit_sha: Option<String>,
    pub build_id: Option<String>,
    pub build_url: Option<String>,
}

impl BuildMetadata {
    /// Empty strings (e.g. an exported-but-unset CI variable) count as absent.
    pub fn new(
        commit_sha: Option<String>,
        build_id: Option<String>,
        build_url: Option<String>,
    ) -> Self {
        Self {
            commit_sha: non_empty(commit_sha),
            build_id: non_empty(build_id),
            build_url: non_empty(build_url),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.commit_sha.is_none() && self.build_id.is_none() && self.build_url.is_none()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Everything one report run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Directory holding one `*.json` results file per run.
    pub input_dir: PathBuf,
    /// Destination `.xlsx` path; parent directories are created on demand.
    pub output_file: PathBuf,
    /// Summary schema file. `None` or a missing file selects the default columns.
    pub summary_columns_file: Option<PathBuf>,
    pub build: BuildMetadata,
}

impl ReportConfig {
    pub fn new(input_dir: impl Into<PathBuf>, output_file: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_file: output_file.into(),
            summary_columns_file: None,
            build: BuildMetadata::default(),
        }
    }

    pub fn with_summary_columns_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.summary_columns_file = Some(path.into());
        self
    }

    pub fn with_build(mut self, build: BuildMetadata) -> Self {
        self.build = build;
        self
    }
}
