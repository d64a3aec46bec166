//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod pools;
mod provision;

pub use provision::ProvisionArgs;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Provision a project, service endpoints and CI/CD definitions
    Provision(ProvisionArgs),
    /// List the account's agent pools
    Pools,
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Provision(args) => provision::handle_provision_command(args, config).await,
        Commands::Pools => pools::handle_pools_command(config).await,
    }
}
