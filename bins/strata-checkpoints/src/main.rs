//! Strata checkpoint tool.
//!
//! Inspects the compiled-in checkpoint tables and evaluates the reorg guard
//! against a block-index snapshot. Read-only: nothing is written to disk or
//! sent over the network.

mod config;
mod snapshot;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use strata_consensus::ReorgGuard;
use strata_core::constants::NetworkType;
use strata_core::traits::ChainView;
use strata_core::types::Hash256;
use tracing::{error, info};

use crate::config::{LogFormat, ToolConfig};
use crate::snapshot::IndexSnapshot;

/// Exit code for a candidate the guard rejects.
const EXIT_REJECTED: u8 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "strata-checkpoints",
    version,
    about = "Inspect Strata checkpoints and the sync horizon"
)]
struct Cli {
    /// Use the test network table (empty) instead of mainnet.
    #[arg(long, global = true)]
    testnet: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every checkpoint of the active table.
    List,
    /// Print the expected chain length used for sync progress.
    Estimate,
    /// Check a block hash against the checkpoint at its height.
    Check {
        /// Block height
        height: u64,
        /// Block hash (64 hex digits, optional 0x prefix)
        hash: String,
    },
    /// Evaluate the guard against a JSON block-index snapshot.
    Inspect {
        /// Path to the snapshot file
        snapshot: PathBuf,
        /// Report whether a block at this height may still change
        #[arg(long)]
        height: Option<u64>,
    },
}

impl Cli {
    fn config(&self) -> ToolConfig {
        let network = if self.testnet {
            NetworkType::Testnet
        } else {
            NetworkType::Mainnet
        };
        ToolConfig {
            network,
            log_level: self.log_level.clone(),
            log_format: self.log_format,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = cli.config();
    init_logging(&config.log_level, config.log_format);

    match run(&config, cli.command) {
        Ok(code) => code,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &ToolConfig, command: Command) -> Result<ExitCode> {
    let guard = ReorgGuard::for_network(config.network);
    info!(network = %config.network, checkpoints = guard.table().len(), "checkpoint table loaded");

    match command {
        Command::List => {
            if guard.table().is_empty() {
                println!("no checkpoints for {}", config.network);
            }
            for cp in guard.table().iter() {
                println!("{:>10}  {}", cp.height, cp.hash);
            }
        }
        Command::Estimate => {
            println!("{}", guard.total_blocks_estimate());
        }
        Command::Check { height, hash } => {
            let hash: Hash256 = hash.parse().context("invalid block hash")?;
            if let Err(e) = guard.enforce_hardened(height, &hash) {
                println!("rejected: {e}");
                return Ok(ExitCode::from(EXIT_REJECTED));
            }
            println!("ok");
        }
        Command::Inspect { snapshot, height } => {
            let index = IndexSnapshot::load(&snapshot)?
                .into_index()
                .with_context(|| format!("invalid snapshot {}", snapshot.display()))?;
            info!(blocks = index.len(), "snapshot loaded");

            match guard.last_checkpoint(&index) {
                Some(node) => println!("last checkpoint: height={} hash={}", node.height, node.hash),
                None => println!("last checkpoint: none"),
            }

            let horizon = guard
                .sync_checkpoint(&index)
                .context("snapshot has no chain tip")?;
            if let Some(tip) = index.tip() {
                println!("tip:             height={} hash={}", tip.height, tip.hash);
            }
            println!("sync horizon:    height={} hash={}", horizon.height, horizon.hash);

            if let Some(height) = height {
                if let Err(e) = guard.enforce_sync(&index, height) {
                    println!("height {height}: settled ({e})");
                    return Ok(ExitCode::from(EXIT_REJECTED));
                }
                println!("height {height}: may change");
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Initialize tracing subscriber with the given log level and output format.
///
/// Logs go to stderr so command output on stdout stays machine-readable.
fn init_logging(level_str: &str, format: LogFormat) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_str));

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}
