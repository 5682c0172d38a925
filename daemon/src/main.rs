//! Tally daemon: entry point for running an election authority.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use tally_elections::ElectionsEngine;
use tally_node::{init_logging_from, Ledger, NodeConfig, TallyNode};
use tally_types::SystemClock;
use tally_workflow::WorkflowEngine;

#[derive(Parser, Debug)]
#[command(name = "tally-daemon", about = "Election authority daemon")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "TALLY_CONFIG")]
    config: Option<PathBuf>,

    /// Hex identity of the initial owner.
    #[arg(long, env = "TALLY_OWNER")]
    owner: Option<String>,

    /// Hex identities granted admin at start-up (comma-separated).
    #[arg(long, env = "TALLY_ADMINS", value_delimiter = ',')]
    admins: Vec<String>,

    /// Log level filter, e.g. "info" or "debug,tally_elections=trace".
    #[arg(long, env = "TALLY_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "TALLY_LOG_FORMAT")]
    log_format: Option<String>,

    /// Append-only JSON-lines audit file.
    #[arg(long, env = "TALLY_AUDIT_LOG")]
    audit_log: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Run an authority until SIGINT/SIGTERM.
    Run {
        /// Which election engine the authority drives.
        #[arg(long, value_enum, default_value_t = Variant::Elections)]
        variant: Variant,
    },
    /// Print the resolved configuration as TOML and exit.
    Config,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Variant {
    /// One fixed registration → proposals → voting → tally session.
    Workflow,
    /// Many independently scheduled elections.
    Elections,
}

/// File settings first, then any flag or env var that was given.
fn resolve_config(cli: &Cli) -> anyhow::Result<NodeConfig> {
    let mut config = match &cli.config {
        Some(path) => NodeConfig::from_toml_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => NodeConfig::default(),
    };
    if let Some(owner) = &cli.owner {
        config.owner = owner.clone();
    }
    if !cli.admins.is_empty() {
        config.admins = cli.admins.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        config.log_format = format.clone();
    }
    if let Some(path) = &cli.audit_log {
        config.audit_log = Some(path.clone());
    }
    config.validate().context("invalid configuration")?;
    Ok(config)
}

async fn run<E: Ledger>(config: NodeConfig) -> anyhow::Result<()> {
    let node = TallyNode::<E>::start(config, Arc::new(SystemClock)).await?;
    tracing::info!("authority running; waiting for SIGINT/SIGTERM");
    node.run_until_signal().await?;
    tracing::info!("tally daemon exited cleanly");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    init_logging_from(&config)?;

    match cli.command {
        Command::Run { variant } => {
            tracing::info!(
                ?variant,
                log_level = %config.log_level,
                audit = ?config.audit_log,
                "starting election authority"
            );
            match variant {
                Variant::Workflow => run::<WorkflowEngine>(config).await?,
                Variant::Elections => run::<ElectionsEngine>(config).await?,
            }
        }
        Command::Config => print!("{}", config.to_toml_string()?),
    }

    Ok(())
}
