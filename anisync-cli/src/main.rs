//! anisync: diff, merge and push anime watch-list changes.

#![allow(clippy::print_stdout, reason = "CLI tool outputs to stdout")]

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod cli;
mod commands;
mod config_commands;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    let config_path = match cli.config {
        Some(path) => path,
        None => anisync_core::config::default_config_path()
            .context("Could not determine the config directory")?,
    };

    match cli.command {
        Commands::Diff { old, new, service, json } => {
            commands::diff(&old, &new, service.into(), json)
        }
        Commands::Fetch { user, json } => commands::fetch(&config_path, user, json).await,
        Commands::Push { old, new, dry_run } => {
            commands::push(&config_path, &old, &new, dry_run).await
        }
        Commands::Config(cmd) => config_commands::handle(cmd, &config_path),
    }
}

fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level).with_context(|| format!("Invalid log level: {level}"))?;
    let subscriber =
        FmtSubscriber::builder().with_env_filter(filter).with_writer(std::io::stderr).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
