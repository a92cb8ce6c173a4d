//! nodecfg - inspect a node's configuration.
//!
//! Loads the configuration the same way the node does (defaults, then the
//! file, then `--set` overrides) and prints what came out of it.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use nodecfg_config::LoadOptions;
use nodecfg_telemetry::{LogConfig, LogFormat};
use tracing::debug;

mod commands;

use commands::config;

/// nodecfg - node configuration inspector
#[derive(Parser)]
#[command(name = "nodecfg")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file to load instead of searching the default locations
    #[arg(short, long, global = true, env = "NODECFG_CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Override a value, e.g. `--set redpanda.node_id=3` (repeatable)
    #[arg(long = "set", global = true, value_name = "KEY=VALUE")]
    overrides: Vec<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format: compact (default), pretty, json or full
    #[arg(long, global = true, default_value = "compact")]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect the configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration with source annotations
    Show {
        /// Output format (yaml or json)
        #[arg(short, long, default_value = "yaml")]
        format: String,
        /// Show only one section (e.g. redpanda, rpk, redpanda.kafka_api)
        #[arg(short, long)]
        section: Option<String>,
    },
    /// Show the config file exactly as loaded, without defaults or overrides
    File {
        /// Output format (yaml or json)
        #[arg(short, long, default_value = "yaml")]
        format: String,
    },
    /// Print the process lock file path
    LockPath,
    /// Resolve and load the CLI's TLS settings for one API
    Tls {
        /// Which API: kafka or admin
        #[arg(long, default_value = "kafka")]
        api: String,
    },
    /// Show the config file locations that are checked
    Paths,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging, with --verbose override.
    let level = if cli.verbose { "debug" } else { "info" };
    let format = cli.log_format.parse().unwrap_or_else(|e| {
        eprintln!("{e}; using compact");
        LogFormat::Compact
    });
    if let Err(e) = nodecfg_telemetry::setup_logging(&LogConfig::new(level).with_format(format)) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let mut options = LoadOptions::new();
    if let Some(path) = cli.config {
        options = options.with_path(path);
    }
    for raw in &cli.overrides {
        options = options.with_override(raw)?;
    }
    debug!(
        path = ?options.path,
        overrides = options.overrides.len(),
        "resolved load options"
    );

    match cli.command {
        Commands::Config { command } => handle_config(command, &options),
    }
}

fn handle_config(command: ConfigCommands, options: &LoadOptions) -> Result<()> {
    match command {
        ConfigCommands::Show { format, section } => {
            config::show_config(options, &format, section.as_deref())
        },
        ConfigCommands::File { format } => config::show_file(options, &format),
        ConfigCommands::LockPath => config::show_lock_path(options),
        ConfigCommands::Tls { api } => config::show_tls(options, &api),
        ConfigCommands::Paths => config::show_paths(options),
    }
}
