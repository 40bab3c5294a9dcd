//! Column catalogue: benchmark metrics and the summary sheet schema.

use std::fs;
use std::path::Path;

/// File name looked up when no explicit schema override is given.
pub const SUMMARY_COLUMNS_FILENAME: &str = "nightly_perf_summary_columns.txt";

/// Metric columns compared between a model's two most recent runs.
pub const BENCHMARK_COLUMNS: &[&str] = &[
    "num_prompts",
    "request_rate",
    "burstiness",
    "max_concurrency",
    "duration",
    "completed",
    "failed",
    "request_throughput",
    "output_throughput",
    "total_token_throughput",
    "mean_ttft_ms",
    "p99_ttft_ms",
    "mean_tpot_ms",
    "p99_tpot_ms",
    "mean_itl_ms",
    "p99_itl_ms",
    "mean_e2el_ms",
    "p99_e2el_ms",
    "mean_audio_rtf",
    "p99_audio_rtf",
    "mean_audio_duration_s",
    "p99_audio_duration_s",
];

/// Benchmark columns left out of numeric coercion: `request_rate` may be
/// the string "inf" and `max_concurrency` may be null.
pub const IRREGULAR_BENCHMARK_COLUMNS: &[&str] = &["request_rate", "max_concurrency"];

const LEADING_SUMMARY_COLUMNS: &[&str] = &[
    "date",
    "endpoint_type",
    "backend",
    "model_id",
    "tokenizer_id",
];

const TRAILING_SUMMARY_COLUMNS: &[&str] = &["commit_sha", "build_id", "build_url", "source_file"];

/// Benchmark columns that receive float coercion and the decimal format.
pub fn numeric_format_columns() -> impl Iterator<Item = &'static str> {
    BENCHMARK_COLUMNS
        .iter()
        .copied()
        .filter(|c| !IRREGULAR_BENCHMARK_COLUMNS.contains(c))
}

pub fn is_numeric_format_column(column: &str) -> bool {
    BENCHMARK_COLUMNS.contains(&column) && !IRREGULAR_BENCHMARK_COLUMNS.contains(&column)
}

/// Summary schema used when no schema file is available.
pub fn default_summary_columns() -> Vec<String> {
    LEADING_SUMMARY_COLUMNS
        .iter()
        .chain(BENCHMARK_COLUMNS)
        .chain(TRAILING_SUMMARY_COLUMNS)
        .map(|c| (*c).to_string())
        .collect()
}

/// Pure function to parse a schema file: one column per line, blank lines
/// and `#` comments skipped.
pub fn parse_summary_columns(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Load the summary schema, falling back to [`default_summary_columns`] when
/// the file is absent, unreadable, or lists no columns.
pub fn load_summary_columns(path: Option<&Path>) -> Vec<String> {
    let Some(path) = path else {
        log::debug!("No summary columns file configured. Using default columns.");
        return default_summary_columns();
    };

    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(path, &e);
            return default_summary_columns();
        }
    };

    let columns = parse_summary_columns(&contents);
    if columns.is_empty() {
        log::debug!(
            "Summary columns file {} lists no columns. Using default columns.",
            path.display()
        );
        return default_summary_columns();
    }

    log::debug!(
        "Loaded {} summary columns from {}",
        columns.len(),
        path.display()
    );
    columns
}

/// Handle file read errors with appropriate logging
fn handle_read_error(path: &Path, error: &std::io::Error) {
    // A missing schema file is the normal case, not worth a warning
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read summary columns file {}: {}",
            path.display(),
            error
        );
    }
}
