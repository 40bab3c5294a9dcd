//! Setup and initialization functions for CLI
//!
//! Logging setup and the default output path.

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

const OUTPUT_FILE_PREFIX: &str = "nightly_perf_";
const OUTPUT_TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Log level used when `RUST_LOG` is not set
pub fn default_log_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Initialize env_logger once at startup. `RUST_LOG` takes precedence over `-v`.
pub fn init_logging(verbosity: u8) {
    let env = env_logger::Env::default().default_filter_or(default_log_level(verbosity));
    if let Err(e) = env_logger::Builder::from_env(env)
        .format_timestamp_secs()
        .try_init()
    {
        // already initialized, keep the existing logger
        log::debug!("Logger already configured: {}", e);
    }
}

/// `<dir>/nightly_perf_<YYYYMMDD-HHMMSS>.xlsx`, timestamped in UTC
pub fn default_output_file(dir: &Path, now: DateTime<Utc>) -> PathBuf {
    dir.join(format!(
        "{}{}.xlsx",
        OUTPUT_FILE_PREFIX,
        now.format(OUTPUT_TIMESTAMP_FORMAT)
    ))
}
