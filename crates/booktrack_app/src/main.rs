mod commands;
mod config;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use booktrack_client::{BookTrackClient, FileStore};
use booktrack_logging::{bt_error, bt_info};
use clap::Parser;

use crate::commands::Command;

/// Command-line client for the BookTrack catalog.
#[derive(Debug, Parser)]
#[command(name = "booktrack", version)]
struct Cli {
    /// RON config file (defaults to ./booktrack.ron when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Overrides the API endpoint from the config file.
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            bt_error!("{:#}", err);
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = config::load(cli.config.as_deref())?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    logging::initialize(config.log, logging::level_for(cli.verbose));
    bt_info!(
        "Using {} with state in {:?}",
        config.base_url,
        config.state_dir
    );

    let storage = Arc::new(FileStore::new(config.state_dir.clone()));
    let client = BookTrackClient::new(&config.client_settings(), storage)?;
    commands::run(&client, cli.command).await
}
