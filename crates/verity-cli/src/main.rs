//! Verity CLI - Command-line interface for checking news credibility.

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use verity_cli::commands;
use verity_cli::repl;
use verity_cli::{Cli, Command, Config, Formatter};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::path()?,
    };
    let mut config = Config::load_from(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    if !path.exists() {
        if let Err(e) = config.save() {
            tracing::warn!("Could not write default config: {}", e);
        }
    }

    if let Some(profile_name) = cli.profile {
        config.switch_profile(profile_name)?;
    }

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        None | Some(Command::Repl) => {
            repl::run_repl(&config, &formatter).await?;
        }
        Some(Command::Analyze(args)) => {
            commands::execute_analyze(args, &config, &formatter).await?;
        }
        Some(Command::History(args)) => {
            commands::execute_history(args, &config, &formatter).await?;
        }
        Some(Command::Key(args)) => {
            commands::execute_key(args, &config, &formatter).await?;
        }
        Some(Command::Profile(args)) => {
            commands::execute_profile(args, &mut config, &formatter).await?;
        }
    }

    Ok(())
}
