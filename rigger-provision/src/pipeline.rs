//! The provisioning pipeline
//!
//! Fixed stage order: project, then the endpoints the target needs (the two
//! Docker lookups are independent and run concurrently), then the queue
//! lookup, then build, then release. Each stage's output feeds the next and
//! the first error aborts everything downstream.

use anyhow::{Context, Result};
use rigger_client::TeamServicesClient;
use rigger_core::domain::{BuildDefinition, Identity, ReleaseDefinition, ServiceEndpoint, TeamProject};
use rigger_core::target::{build_definition_name, release_definition_name};
use rigger_core::{EncodedPat, Target};
use tracing::info;

use crate::config::ProvisionConfig;
use crate::templates::{TemplateSource, TokenMap, render_json};

/// Everything one provisioning run resolved or created.
#[derive(Debug, Clone)]
pub struct ProvisionSummary {
    pub project: TeamProject,
    pub azure_endpoint: Option<ServiceEndpoint>,
    pub docker_host_endpoint: Option<ServiceEndpoint>,
    pub docker_registry_endpoint: Option<ServiceEndpoint>,
    pub queue_id: i64,
    pub build: BuildDefinition,
    pub release: ReleaseDefinition,
}

/// Run the whole chain: validate the config, encode the credential once and
/// provision with a fresh client.
pub async fn run(
    config: &ProvisionConfig,
    templates: &dyn TemplateSource,
) -> Result<ProvisionSummary> {
    config.validate()?;

    // The one and only encoding of the PAT; every request from here on
    // forwards the encoded value.
    let client = TeamServicesClient::new(&config.account, EncodedPat::encode(&config.pat));
    provision(config, &client, templates).await
}

/// Provision the resource chain with a caller-supplied client.
pub async fn provision(
    config: &ProvisionConfig,
    client: &TeamServicesClient,
    templates: &dyn TemplateSource,
) -> Result<ProvisionSummary> {
    let project = client
        .find_or_create_project(&config.application_name)
        .await
        .context("failed to resolve team project")?;

    let (azure_endpoint, docker_host_endpoint, docker_registry_endpoint) = match config.target {
        Target::AppService => {
            let azure = client
                .find_or_create_azure_endpoint(&project.id, &config.azure)
                .await
                .context("failed to resolve Azure service endpoint")?;
            (azure, None, None)
        }
        Target::Docker => {
            // Both lookups only need the project id; nothing stops them
            // running at the same time.
            let (host, registry) = tokio::try_join!(
                client.find_or_create_docker_host_endpoint(&project.id, &config.docker_host),
                client.find_or_create_docker_registry_endpoint(&project.id, &config.docker_registry),
            )
            .context("failed to resolve Docker service endpoints")?;
            (None, host, registry)
        }
    };

    let queue_id = client
        .find_queue(&config.queue, &project.id)
        .await
        .context("failed to resolve agent queue")?;
    info!(queue = %config.queue, queue_id, "resolved agent queue");

    let build_name = build_definition_name(&config.application_name, config.target);
    let build_template = templates
        .build_template(config.project_type, config.target)
        .await?;
    let build_tokens = build_tokens(config, &project, queue_id, &build_name);
    let build_payload = render_json(&build_template, &build_tokens)
        .context("failed to render build definition template")?;
    let build = client
        .find_or_create_build(&project.id, &build_name, &build_payload)
        .await
        .context("failed to resolve build definition")?;

    let approver = approver_for(config, &build)?;
    let release_name = release_definition_name(&config.application_name, config.target);
    let release_template = templates
        .release_template(config.project_type, config.target)
        .await?;
    let release_tokens = release_tokens(
        config,
        &project,
        queue_id,
        &build,
        &release_name,
        &approver,
        azure_endpoint.as_ref(),
        docker_host_endpoint.as_ref(),
        docker_registry_endpoint.as_ref(),
    );
    let release_payload = render_json(&release_template, &release_tokens)
        .context("failed to render release definition template")?;
    let release = client
        .find_or_create_release(&project.id, &release_name, &release_payload)
        .await
        .context("failed to resolve release definition")?;

    Ok(ProvisionSummary {
        project,
        azure_endpoint,
        docker_host_endpoint,
        docker_registry_endpoint,
        queue_id,
        build,
        release,
    })
}

/// The explicit approver when one was configured, otherwise the build
/// definition's author.
fn approver_for(config: &ProvisionConfig, build: &BuildDefinition) -> Result<Identity> {
    if let Some(approver) = &config.approver {
        return Ok(approver.clone());
    }
    build
        .authored_by
        .clone()
        .context("build definition has no author and no approver was configured")
}

/// Tokens available to build definition templates.
fn build_tokens(
    config: &ProvisionConfig,
    project: &TeamProject,
    queue_id: i64,
    build_name: &str,
) -> TokenMap {
    let mut tokens = TokenMap::new();
    tokens
        .set("BuildDefName", build_name)
        .set("Account", &config.account)
        .set("Project", &project.name)
        .set("ProjectId", &project.id)
        .set("ProjectLowerCase", project.name.to_lowercase())
        .set("QueueId", queue_id.to_string())
        .set("QueueName", &config.queue);

    if config.target.is_docker() {
        tokens
            .set("DockerHost", &config.docker_host.url)
            .set("DockerRegistry", &config.docker_registry.url)
            .set("DockerRegistryId", &config.docker_registry.username);
    }

    tokens
}

/// Tokens available to release definition templates.
///
/// Endpoint tokens for anything the run did not provision render to the
/// empty string so the payload stays well-formed.
#[allow(clippy::too_many_arguments)]
fn release_tokens(
    config: &ProvisionConfig,
    project: &TeamProject,
    queue_id: i64,
    build: &BuildDefinition,
    release_name: &str,
    approver: &Identity,
    azure: Option<&ServiceEndpoint>,
    docker_host: Option<&ServiceEndpoint>,
    docker_registry: Option<&ServiceEndpoint>,
) -> TokenMap {
    let endpoint_id = |ep: Option<&ServiceEndpoint>| ep.map(|e| e.id.clone()).unwrap_or_default();

    let mut tokens = TokenMap::new();
    tokens
        .set("ReleaseDefName", release_name)
        .set("Account", &config.account)
        .set("Project", &project.name)
        .set("ProjectId", &project.id)
        .set("ProjectLowerCase", project.name.to_lowercase())
        .set("QueueId", queue_id.to_string())
        .set("BuildId", build.id.to_string())
        .set("BuildName", &build.name)
        .set("ApproverId", &approver.id)
        .set("ApproverDisplayName", &approver.display_name)
        .set("ApproverUniqueName", &approver.unique_name)
        .set("AzureEndpointId", endpoint_id(azure));

    if config.target.is_docker() {
        tokens
            .set("DockerHostEndpoint", endpoint_id(docker_host))
            .set("DockerRegistryEndpoint", endpoint_id(docker_registry))
            .set("DockerHost", &config.docker_host.url)
            .set("DockerRegistry", &config.docker_registry.url)
            .set("DockerRegistryId", &config.docker_registry.username)
            .set("DockerPorts", &config.docker_ports);
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use rigger_core::ProjectType;
    use rigger_core::domain::{AzureSubscription, DockerHost, DockerRegistry};

    fn project() -> TeamProject {
        TeamProject {
            id: "proj-1".into(),
            name: "e2eDemo".into(),
            url: None,
            state: None,
        }
    }

    fn build() -> BuildDefinition {
        BuildDefinition {
            id: 7,
            name: "e2eDemo-CI".into(),
            authored_by: Some(Identity {
                id: "aid".into(),
                display_name: "Author".into(),
                unique_name: "author@example.com".into(),
            }),
        }
    }

    fn endpoint(id: &str, kind: &str) -> ServiceEndpoint {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": kind,
            "type": kind
        }))
        .unwrap()
    }

    fn docker_config() -> ProvisionConfig {
        let mut config = ProvisionConfig::new(
            "http://tfs:8080/tfs/DefaultCollection",
            "token",
            "e2eDemo",
            ProjectType::Asp,
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
    fn test_docker_release_tokens_embed_ports_and_endpoints() {
        let config = docker_config();
        let approver = build().authored_by.unwrap();
        let host = endpoint("ep-h", "dockerhost");
        let registry = endpoint("ep-r", "dockerregistry");
        let tokens = release_tokens(
            &config,
            &project(),
            420,
            &build(),
            "e2eDemo-Docker-CD",
            &approver,
            None,
            Some(&host),
            Some(&registry),
        );

        assert_eq!(tokens.get("DockerPorts"), Some("80:80"));
        assert_eq!(tokens.get("DockerHostEndpoint"), Some("ep-h"));
        assert_eq!(tokens.get("DockerRegistryEndpoint"), Some("ep-r"));
        // No Azure connection was provisioned for a Docker run.
        assert_eq!(tokens.get("AzureEndpointId"), Some(""));
    }

    #[test]
    fn test_paas_release_tokens_carry_azure_reference_only() {
        let mut config = ProvisionConfig::new(
            "http://tfs:8080/tfs/DefaultCollection",
            "token",
            "e2eDemo",
            ProjectType::Asp,
            Target::AppService,
        );
        config.azure = AzureSubscription {
            name: "AzureSub".into(),
            ..Default::default()
        };

        let approver = build().authored_by.unwrap();
        let azure = endpoint("ep-a", "azurerm");
        let tokens = release_tokens(
            &config,
            &project(),
            420,
            &build(),
            "e2eDemo-CD",
            &approver,
            Some(&azure),
            None,
            None,
        );

        assert_eq!(tokens.get("AzureEndpointId"), Some("ep-a"));
        assert_eq!(tokens.get("DockerHostEndpoint"), None);
        assert_eq!(tokens.get("DockerPorts"), None);
    }

    #[test]
    fn test_approver_defaults_to_build_author() {
        let config = docker_config();
        let approver = approver_for(&config, &build()).unwrap();
        assert_eq!(approver.id, "aid");
    }

    #[test]
    fn test_explicit_approver_wins() {
        let mut config = docker_config();
        config.approver = Some(Identity {
            id: "boss".into(),
            display_name: "Boss".into(),
            unique_name: "boss@example.com".into(),
        });
        let approver = approver_for(&config, &build()).unwrap();
        assert_eq!(approver.id, "boss");
    }

    #[test]
    fn test_missing_author_and_approver_is_an_error() {
        let config = docker_config();
        let mut no_author = build();
        no_author.authored_by = None;
        assert!(approver_for(&config, &no_author).is_err());
    }

    #[test]
    fn test_build_tokens_docker_extras() {
        let config = docker_config();
        let tokens = build_tokens(&config, &project(), 420, "e2eDemo-Docker-CI");
        assert_eq!(tokens.get("BuildDefName"), Some("e2eDemo-Docker-CI"));
        assert_eq!(tokens.get("QueueId"), Some("420"));
        assert_eq!(tokens.get("ProjectLowerCase"), Some("e2edemo"));
        assert_eq!(tokens.get("DockerHost"), Some("tcp://docker:2376"));
    }
}
