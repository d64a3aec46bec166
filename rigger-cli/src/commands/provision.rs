//! Provision command handler
//!
//! Collects the provisioning inputs from the command line, runs the whole
//! chain and prints what was resolved or created.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::*;
use rigger_core::domain::{AzureSubscription, DockerHost, DockerRegistry};
use rigger_core::{ProjectType, Target};
use rigger_provision::{DirTemplates, ProvisionConfig, ProvisionSummary, run};

use crate::config::Config;

/// Provisioning inputs
#[derive(Args)]
pub struct ProvisionArgs {
    /// Application name; also used as the team project name
    #[arg(long)]
    pub application_name: String,

    /// Kind of application to provision pipelines for
    #[arg(long, value_enum)]
    pub project_type: ProjectType,

    /// Deployment target
    #[arg(long, value_enum)]
    pub target: Target,

    /// Agent queue the build definition runs on
    #[arg(long, default_value = "Default")]
    pub queue: String,

    /// Directory holding the build and release definition templates
    #[arg(long, default_value = "templates")]
    pub templates: PathBuf,

    /// Azure subscription name (paas target)
    #[arg(long, default_value = "")]
    pub azure_sub_name: String,

    /// Azure subscription id (paas target)
    #[arg(long, default_value = "")]
    pub azure_sub_id: String,

    /// Azure AD tenant id (paas target)
    #[arg(long, default_value = "")]
    pub tenant_id: String,

    /// Service principal id (paas target)
    #[arg(long, default_value = "")]
    pub service_principal_id: String,

    /// Service principal key (paas target)
    #[arg(long, default_value = "")]
    pub service_principal_key: String,

    /// Docker host URL (docker target)
    #[arg(long, default_value = "")]
    pub docker_host: String,

    /// Path to the Docker host TLS certificates (docker target)
    #[arg(long)]
    pub docker_cert_path: Option<String>,

    /// Container registry URL (docker target)
    #[arg(long, default_value = "")]
    pub docker_registry: String,

    /// Container registry username (docker target)
    #[arg(long, default_value = "")]
    pub docker_registry_username: String,

    /// Container registry password (docker target)
    #[arg(long, default_value = "")]
    pub docker_registry_password: String,

    /// Container registry email (docker target)
    #[arg(long, default_value = "")]
    pub docker_registry_email: String,

    /// host:container port mapping; defaults per project type
    #[arg(long)]
    pub docker_ports: Option<String>,
}

/// Handle the provision command
pub async fn handle_provision_command(args: ProvisionArgs, config: &Config) -> Result<()> {
    let mut provision_config = ProvisionConfig::new(
        &config.account,
        &config.pat,
        &args.application_name,
        args.project_type,
        args.target,
    );
    provision_config.queue = args.queue;
    provision_config.azure = AzureSubscription {
        name: args.azure_sub_name,
        id: args.azure_sub_id,
        tenant_id: args.tenant_id,
        service_principal_id: args.service_principal_id,
        service_principal_key: args.service_principal_key,
    };
    provision_config.docker_host = DockerHost {
        url: args.docker_host,
        cert_path: args.docker_cert_path,
    };
    provision_config.docker_registry = DockerRegistry {
        url: args.docker_registry,
        username: args.docker_registry_username,
        password: args.docker_registry_password,
        email: args.docker_registry_email,
    };
    if let Some(ports) = args.docker_ports {
        provision_config.docker_ports = ports;
    }

    let templates = DirTemplates::new(&args.templates);
    let summary = run(&provision_config, &templates).await?;

    print_summary(&summary);
    Ok(())
}

/// Print everything the run resolved or created
fn print_summary(summary: &ProvisionSummary) {
    println!("{}", "Provisioning complete.".bold());
    println!();
    println!(
        "  {} Team project {} ({})",
        "+".green(),
        summary.project.name.bold(),
        summary.project.id.dimmed()
    );
    if let Some(endpoint) = &summary.azure_endpoint {
        println!(
            "  {} Azure endpoint {} ({})",
            "+".green(),
            endpoint.name.bold(),
            endpoint.id.dimmed()
        );
    }
    if let Some(endpoint) = &summary.docker_host_endpoint {
        println!(
            "  {} Docker host endpoint {} ({})",
            "+".green(),
            endpoint.name.bold(),
            endpoint.id.dimmed()
        );
    }
    if let Some(endpoint) = &summary.docker_registry_endpoint {
        println!(
            "  {} Docker registry endpoint {} ({})",
            "+".green(),
            endpoint.name.bold(),
            endpoint.id.dimmed()
        );
    }
    println!("  {} Agent queue id {}", "+".green(), summary.queue_id);
    println!(
        "  {} Build definition {} (#{})",
        "+".green(),
        summary.build.name.bold(),
        summary.build.id
    );
    println!(
        "  {} Release definition {} (#{})",
        "+".green(),
        summary.release.name.bold(),
        summary.release.id
    );
}
