//! txextract CLI — turn relay transactions into domain events.
//!
//! # Commands
//! ```text
//! txextract extract   --tx <tx.json> [--receipt <receipt.json>] --block-time <secs>
//! txextract batch     --input <bundles.json>
//! txextract selectors
//! ```
//!
//! Every command accepts `--config <file.yaml>` and `--abi-dir <dir>`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use txextract_registry::MemoryRegistry;

mod cmd_batch;
mod cmd_extract;
mod cmd_selectors;
mod config;
mod output;

use config::ExtractorConfig;

#[derive(Parser)]
#[command(
    name = "txextract",
    about = "Decode relay transactions into domain events",
    long_about = "
txextract: decode relay protocol, WETH and ERC-20 method calls into domain
events and print them as JSON lines. Built on alloy-rs.

ENVIRONMENT VARIABLES:
  RUST_LOG    Overrides the configured log levels
",
    version
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Extractor config file (YAML, or JSON by extension)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory of JSON ABI files (overrides `abi_dir` from the config)
    #[arg(long, global = true)]
    abi_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the event of a single transaction
    Extract {
        /// Transaction JSON file (eth_getTransactionByHash result)
        #[arg(long)]
        tx: PathBuf,
        /// Receipt JSON file; omit for a pending transaction
        #[arg(long)]
        receipt: Option<PathBuf>,
        /// Block timestamp in Unix seconds
        #[arg(long, default_value_t = 0)]
        block_time: i64,
    },

    /// Extract a batch of transactions in parallel
    Batch {
        /// JSON array (or JSON lines) of `{tx, receipt, blockTime}` bundles
        #[arg(long)]
        input: PathBuf,
    },

    /// List the method selectors known to the registry
    Selectors {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ExtractorConfig::load_or_default(cli.config.as_deref())?;
    if let Some(dir) = cli.abi_dir {
        config.abi_dir = dir;
    }
    if cli.verbose {
        config.log.level = "debug".into();
    }
    txextract_observability::init_tracing(&config.log);

    match cli.command {
        Commands::Extract { tx, receipt, block_time } => {
            cmd_extract::run(&config, &tx, receipt.as_deref(), block_time)
        }

        Commands::Batch { input } => cmd_batch::run(&config, &input).await,

        Commands::Selectors { json } => cmd_selectors::run(&config, json),
    }
}

/// Build the method registry from the configured ABI directory.
pub(crate) fn load_registry(abi_dir: &Path) -> Result<MemoryRegistry> {
    let registry = MemoryRegistry::new();
    let loaded = registry
        .load_directory(abi_dir)
        .with_context(|| format!("load ABIs from '{}'", abi_dir.display()))?;
    if loaded == 0 {
        anyhow::bail!("no ABI functions found in '{}'", abi_dir.display());
    }
    tracing::info!("loaded {loaded} method selectors from {}", abi_dir.display());
    Ok(registry)
}

/// Read and parse a JSON file.
pub(crate) fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("read '{}'", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parse '{}'", path.display()))
}
