//! # gearbox CLI entry point
//!
//! Resolves configuration, installs logging, and replays the driver script.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use gearbox_cli::{run_script, DriverConfig, OutputFormat};

/// Environment variable holding a `tracing` filter directive. Overrides `-v`.
const LOG_ENV: &str = "GEARBOX_LOG";

/// Drive a vehicle through a sequence of gear and pedal actions.
///
/// Actions: throttle, brake, shift_up, shift_down. With no actions given on
/// the command line or in the config file, replays a short demo drive.
#[derive(Parser, Debug)]
#[command(name = "gearbox", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Actions to replay, in order. Overrides the configured script.
    actions: Vec<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

fn init_tracing(verbose: u8) {
    let filter = log_filter(verbose, std::env::var(LOG_ENV).ok());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// A valid `GEARBOX_LOG` directive wins over the `-v` count.
fn log_filter(verbose: u8, env_directive: Option<String>) -> EnvFilter {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_directive
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(level))
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = resolve_config(&cli)?;
    tracing::debug!(?config, "resolved configuration");

    let stdout = std::io::stdout();
    run_script(&config, &mut stdout.lock())?;
    Ok(())
}

/// Defaults, then config file, then environment, then flags.
fn resolve_config(cli: &Cli) -> anyhow::Result<DriverConfig> {
    let base = match &cli.config {
        Some(path) => DriverConfig::load(path)?,
        None => DriverConfig::default(),
    };
    let mut config = base.with_env()?;
    if let Some(format) = cli.format {
        config.format = format;
    }
    if !cli.actions.is_empty() {
        config.script = cli.actions.clone();
    }
    Ok(config)
}
