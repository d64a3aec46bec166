//! Pools command handler

use anyhow::Result;
use colored::*;
use rigger_client::TeamServicesClient;
use rigger_core::EncodedPat;

use crate::config::Config;

/// List the account's agent pools
pub async fn handle_pools_command(config: &Config) -> Result<()> {
    let client = TeamServicesClient::new(&config.account, EncodedPat::encode(&config.pat));
    let pools = client.list_pools().await?;

    if pools.is_empty() {
        println!("{}", "No agent pools found.".yellow());
    } else {
        println!("{}", format!("Found {} agent pool(s):", pools.len()).bold());
        println!();
        for pool in pools {
            println!(
                "  {} {} ({})",
                "▸".cyan(),
                pool.name.bold(),
                pool.id.to_string().dimmed()
            );
        }
    }

    Ok(())
}
