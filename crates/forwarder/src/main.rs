use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use forwarder::pipeline;
use forwarder::runtime::boot::{self, BootOptions};

/// Register FortiGate log records as MISP events.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the log directory from the configuration
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Build events and log them without contacting MISP
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let options = BootOptions {
        config_path: cli.config,
        log_dir: cli.log_dir,
        dry_run: cli.dry_run,
    };

    let config = boot::boot(&options)?;
    let submitter = boot::build_submitter(&config, options.dry_run)?;

    let report = pipeline::run(&config, submitter.as_ref()).await?;
    report.log();

    Ok(if report.has_failures() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
