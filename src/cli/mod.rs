pub mod setup;

use crate::config::{BuildMetadata, ReportConfig, SUMMARY_COLUMNS_FILENAME};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "nightly-perf")]
#[command(
    about = "Read nightly benchmark JSON results and generate an Excel report",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Directory containing performance JSON files
    #[arg(long, env = "DEFAULT_INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Output path of the Excel report
    /// (defaults to <output-dir>/nightly_perf_<timestamp>.xlsx)
    #[arg(long)]
    pub output_file: Option<PathBuf>,

    /// Directory for the default output file name
    #[arg(long, env = "DEFAULT_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Summary sheet column list, one name per line
    /// (defaults to nightly_perf_summary_columns.txt in the input directory)
    #[arg(long = "summary-columns")]
    pub summary_columns: Option<PathBuf>,

    /// Commit SHA stamped onto the latest rows
    #[arg(long, env = "BUILDKITE_COMMIT")]
    pub commit_sha: Option<String>,

    /// Build ID stamped onto the latest rows
    #[arg(long, env = "BUILDKITE_BUILD_ID")]
    pub build_id: Option<String>,

    /// Build URL stamped onto the latest rows
    #[arg(long, env = "BUILDKITE_BUILD_URL")]
    pub build_url: Option<String>,

    /// Increase verbosity level (can be repeated: -v, -vv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

impl Cli {
    /// Resolve defaults into an explicit config. `now` names the default
    /// output file.
    pub fn into_config(self, now: chrono::DateTime<chrono::Utc>) -> ReportConfig {
        let output_file = self
            .output_file
            .unwrap_or_else(|| setup::default_output_file(&self.output_dir, now));
        let summary_columns_file = self
            .summary_columns
            .unwrap_or_else(|| self.input_dir.join(SUMMARY_COLUMNS_FILENAME));

        ReportConfig::new(self.input_dir, output_file)
            .with_summary_columns_file(summary_columns_file)
            .with_build(BuildMetadata::new(
                self.commit_sha,
                self.build_id,
                self.build_url,
            ))
    }
}
