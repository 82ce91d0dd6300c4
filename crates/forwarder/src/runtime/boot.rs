//! Boot — logging init, config load, submitter construction.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, Subscriber};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::conf::{ForwarderConfig, LogFormat, LoggingConfig};
use crate::submit::{DryRunSubmitter, MispClient, Submitter};

/// Command line overrides applied on top of the loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct BootOptions {
    pub config_path: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub dry_run: bool,
}

/// Initialise the tracing subscriber.
/// `RUST_LOG` wins over the configured level.
pub fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format {
        LogFormat::Json => {
            let layer = fmt::layer()
                .json()
                .with_target(true)
                .with_thread_ids(false);
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
        LogFormat::Pretty => {
            let layer = fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false);
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
    }
}

const BOOTSTRAP_FILTER: &str = "info,forwarder=debug";

/// Plain fmt subscriber used until the configuration is known.
fn bootstrap_subscriber<W>(filter: EnvFilter, writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish()
}

/// Thread-local subscriber for config loading. Dropping the guard frees
/// the slot for [`init_logging`].
pub fn init_logging_basic() -> tracing::subscriber::DefaultGuard {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(BOOTSTRAP_FILTER));
    tracing::subscriber::set_default(bootstrap_subscriber(filter, std::io::stderr))
}

/// Load and validate configuration, then start logging.
pub fn boot(options: &BootOptions) -> Result<ForwarderConfig> {
    let bootstrap = init_logging_basic();

    let mut config = ForwarderConfig::load(options.config_path.as_deref())
        .context("Failed to load configuration")?;
    if let Some(dir) = &options.log_dir {
        config.log_dir = dir.clone();
    }
    config
        .validate(!options.dry_run)
        .context("Configuration validation failed")?;

    drop(bootstrap);
    init_logging(&config.logging);
    info!("Starting FortiGate → MISP forwarder v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Log directory: {}, state file: {}, delimiter: {:?}",
        config.log_dir.display(),
        config.state_file.display(),
        config.parser.delimiter
    );
    let modifiers: Vec<&str> = config.mapping.modifiers.iter().map(|m| m.as_str()).collect();
    info!("Label modifiers: {:?}", modifiers);

    Ok(config)
}

/// The MISP client, or a logging stand-in for dry runs.
pub fn build_submitter(config: &ForwarderConfig, dry_run: bool) -> Result<Box<dyn Submitter>> {
    if dry_run {
        info!("Dry run: events are logged, not submitted");
        return Ok(Box::new(DryRunSubmitter::new()));
    }

    let client = MispClient::new(&config.misp).context("Failed to build MISP client")?;
    info!("Submitting events to {}", client.endpoint());
    Ok(Box::new(client))
}
