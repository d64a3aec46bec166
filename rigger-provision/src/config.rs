//! Provisioning run configuration
//!
//! One immutable struct carries everything a run needs. The interactive
//! layer (CLI flags, prompts) fills it in and validates it once; the
//! orchestrator and provisioners only ever read it.

use rigger_core::domain::{AzureSubscription, DockerHost, DockerRegistry, Identity};
use rigger_core::{ProjectType, Target};

/// Inputs for one provisioning run.
#[derive(Debug, Clone)]
pub struct ProvisionConfig {
    /// Account URL including the collection,
    /// e.g. "http://tfs:8080/tfs/DefaultCollection"
    pub account: String,

    /// Raw personal access token; encoded exactly once when the run starts
    pub pat: String,

    /// Application name; doubles as the team project name and the stem of
    /// the build/release definition names
    pub application_name: String,

    /// Kind of application (selects templates and default ports)
    pub project_type: ProjectType,

    /// Deployment target (selects which endpoints the release references)
    pub target: Target,

    /// Agent queue name the build runs on
    pub queue: String,

    /// Azure subscription connection inputs; only consulted for the
    /// App Service target
    pub azure: AzureSubscription,

    /// Docker host connection inputs; only consulted for the Docker target
    pub docker_host: DockerHost,

    /// Container registry connection inputs; only consulted for the Docker
    /// target
    pub docker_registry: DockerRegistry,

    /// host:container port mapping embedded in Docker release payloads
    pub docker_ports: String,

    /// Explicit release approver; defaults to the build definition's author
    /// when unset
    pub approver: Option<Identity>,
}

impl ProvisionConfig {
    /// Create a configuration with the usual defaults: the `Default` agent
    /// queue, the project type's port mapping, no endpoint inputs.
    pub fn new(
        account: impl Into<String>,
        pat: impl Into<String>,
        application_name: impl Into<String>,
        project_type: ProjectType,
        target: Target,
    ) -> Self {
        Self {
            account: account.into(),
            pat: pat.into(),
            application_name: application_name.into(),
            project_type,
            target,
            queue: "Default".to_string(),
            azure: AzureSubscription::default(),
            docker_host: DockerHost::default(),
            docker_registry: DockerRegistry::default(),
            docker_ports: project_type.default_port_mapping().to_string(),
            approver: None,
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.account.is_empty() {
            anyhow::bail!("account URL cannot be empty");
        }
        if !self.account.starts_with("http://") && !self.account.starts_with("https://") {
            anyhow::bail!("account URL must start with http:// or https://");
        }
        if self.pat.is_empty() {
            anyhow::bail!("personal access token cannot be empty");
        }
        if self.application_name.is_empty() {
            anyhow::bail!("application name cannot be empty");
        }
        if self.queue.is_empty() {
            anyhow::bail!("agent queue name cannot be empty");
        }

        match self.target {
            Target::AppService => {
                if !self.azure.is_requested() {
                    anyhow::bail!("App Service target requires an Azure subscription name");
                }
                if self.azure.id.is_empty()
                    || self.azure.tenant_id.is_empty()
                    || self.azure.service_principal_id.is_empty()
                    || self.azure.service_principal_key.is_empty()
                {
                    anyhow::bail!(
                        "App Service target requires subscription id, tenant id and service principal credentials"
                    );
                }
            }
            Target::Docker => {
                if !self.docker_host.is_requested() {
                    anyhow::bail!("Docker target requires a Docker host URL");
                }
                if !self.docker_registry.is_requested() {
                    anyhow::bail!("Docker target requires a registry URL");
                }
                if self.docker_registry.username.is_empty()
                    || self.docker_registry.password.is_empty()
                    || self.docker_registry.email.is_empty()
                {
                    anyhow::bail!("Docker target requires registry credentials");
                }
                if self.docker_ports.is_empty() {
                    anyhow::bail!("Docker target requires a port mapping");
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paas_config() -> ProvisionConfig {
        let mut config = ProvisionConfig::new(
            "http://localhost:8080/tfs/DefaultCollection",
            "token",
            "e2eDemo",
            ProjectType::Asp,
            Target::AppService,
        );
        config.azure = AzureSubscription {
            name: "AzureSub".into(),
            id: "sub-id".into(),
            tenant_id: "tenant".into(),
            service_principal_id: "sp".into(),
            service_principal_key: "key".into(),
        };
        config
    }

    fn docker_config() -> ProvisionConfig {
        let mut config = ProvisionConfig::new(
            "http://localhost:8080/tfs/DefaultCollection",
            "token",
            "e2eDemo",
            ProjectType::Node,
            Target::Docker,
        );
        config.docker_host = DockerHost {
            url: "tcp://docker:2376".into(),
            cert_path: None,
        };
        config.docker_registry = DockerRegistry {
            url: "https://index.docker.io/v1/".into(),
            username: "user".into(),
            password: "secret".into(),
            email: "user@example.com".into(),
        };
        config
    }

    #[test]
    fn test_defaults() {
        let config = paas_config();
        assert_eq!(config.queue, "Default");
        assert_eq!(config.docker_ports, "80:80");
        assert!(config.approver.is_none());
    }

    #[test]
    fn test_node_default_ports() {
        assert_eq!(docker_config().docker_ports, "3000:3000");
    }

    #[test]
    fn test_valid_configs_pass() {
        assert!(paas_config().validate().is_ok());
        assert!(docker_config().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_account_url() {
        let mut config = paas_config();
        config.account = "not-a-url".into();
        assert!(config.validate().is_err());

        config.account = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_empty_pat_and_name() {
        let mut config = paas_config();
        config.pat = String::new();
        assert!(config.validate().is_err());

        let mut config = paas_config();
        config.application_name = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_paas_requires_subscription_fields() {
        let mut config = paas_config();
        config.azure.name = String::new();
        assert!(config.validate().is_err());

        let mut config = paas_config();
        config.azure.service_principal_key = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_docker_requires_host_registry_and_ports() {
        let mut config = docker_config();
        config.docker_host.url = String::new();
        assert!(config.validate().is_err());

        let mut config = docker_config();
        config.docker_registry.password = String::new();
        assert!(config.validate().is_err());

        let mut config = docker_config();
        config.docker_ports = String::new();
        assert!(config.validate().is_err());
    }
}
