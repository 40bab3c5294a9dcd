use anyhow::{Context, Result};
use clap::Parser;
use nightly_perf::cli::{setup, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup::init_logging(cli.verbosity);

    let config = cli.into_config(chrono::Utc::now());
    log::debug!("Resolved configuration: {:?}", config);

    let outcome = nightly_perf::commands::generate_report(&config).with_context(|| {
        format!(
            "Failed to generate report '{}'",
            config.output_file.display()
        )
    })?;
    log::debug!("Report outcome: {}", serde_json::to_string(&outcome)?);
    Ok(())
}
