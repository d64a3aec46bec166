//! Rigger CLI
//!
//! Command-line interface for provisioning Team Services pipelines.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "rigger")]
#[command(about = "Team Services pipeline provisioning CLI", long_about = None)]
struct Cli {
    /// Team Services account URL
    #[arg(long, env = "RIGGER_ACCOUNT")]
    account: String,

    /// Personal access token used for authentication
    #[arg(long, env = "RIGGER_PAT", hide_env_values = true)]
    pat: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rigger_cli=info,rigger_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = Config {
        account: cli.account,
        pat: cli.pat,
    };

    handle_command(cli.command, &config).await
}
