//! Service endpoint operations
//!
//! Three find-or-create variants share one shape: short-circuit when the
//! descriptor's identifying field is empty (the caller did not request that
//! endpoint type), otherwise list the project's endpoints, match on the
//! kind-specific discriminator, and POST the creation payload only when no
//! match exists. Endpoint creation is synchronous in the remote contract,
//! so there is no polling here.

use crate::TeamServicesClient;
use crate::error::Result;
use reqwest::Method;
use rigger_core::domain::{AzureSubscription, DockerHost, DockerRegistry, ServiceEndpoint};
use rigger_core::dto::ListEnvelope;
use rigger_core::dto::endpoint::CreateServiceEndpoint;
use tracing::info;

const SERVICE_ENDPOINTS_API_VERSION: &str = "3.0-preview.1";

impl TeamServicesClient {
    // =============================================================================
    // Service Endpoints
    // =============================================================================

    /// List every service endpoint in a project.
    pub async fn list_service_endpoints(&self, project_id: &str) -> Result<Vec<ServiceEndpoint>> {
        let url = format!(
            "{}/{}/_apis/distributedtask/serviceendpoints",
            self.account(),
            project_id
        );
        let response = self
            .request(Method::GET, &url, SERVICE_ENDPOINTS_API_VERSION)
            .send()
            .await?;

        let envelope: ListEnvelope<ServiceEndpoint> = self.handle_response(response).await?;
        Ok(envelope.value)
    }

    /// Create a service endpoint in a project.
    pub async fn create_service_endpoint(
        &self,
        project_id: &str,
        request: &CreateServiceEndpoint,
    ) -> Result<ServiceEndpoint> {
        let url = format!(
            "{}/{}/_apis/distributedtask/serviceendpoints",
            self.account(),
            project_id
        );
        let response = self
            .request(Method::POST, &url, SERVICE_ENDPOINTS_API_VERSION)
            .json(request)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Find the project's Azure service connection for a subscription,
    /// creating it when absent.
    ///
    /// Returns `Ok(None)` without any network call when the subscription
    /// name is empty: the run does not target Azure.
    pub async fn find_or_create_azure_endpoint(
        &self,
        project_id: &str,
        sub: &AzureSubscription,
    ) -> Result<Option<ServiceEndpoint>> {
        if !sub.is_requested() {
            return Ok(None);
        }

        let existing = self.list_service_endpoints(project_id).await?;
        if let Some(endpoint) = existing
            .into_iter()
            .find(|e| e.subscription_name() == Some(sub.name.as_str()))
        {
            info!(endpoint = %endpoint.name, "found Azure service endpoint");
            return Ok(Some(endpoint));
        }

        info!(subscription = %sub.name, "creating Azure service endpoint");
        let created = self
            .create_service_endpoint(project_id, &CreateServiceEndpoint::azure(sub))
            .await?;
        Ok(Some(created))
    }

    /// Find the project's Docker host connection, creating it when absent.
    /// Matches on the endpoint URL; short-circuits when no host URL was
    /// supplied.
    pub async fn find_or_create_docker_host_endpoint(
        &self,
        project_id: &str,
        host: &DockerHost,
    ) -> Result<Option<ServiceEndpoint>> {
        if !host.is_requested() {
            return Ok(None);
        }

        let existing = self.list_service_endpoints(project_id).await?;
        if let Some(endpoint) = existing
            .into_iter()
            .find(|e| e.url.as_deref() == Some(host.url.as_str()))
        {
            info!(endpoint = %endpoint.name, "found Docker host endpoint");
            return Ok(Some(endpoint));
        }

        info!(host = %host.url, "creating Docker host endpoint");
        let created = self
            .create_service_endpoint(project_id, &CreateServiceEndpoint::docker_host(host))
            .await?;
        Ok(Some(created))
    }

    /// Find the project's container registry connection, creating it when
    /// absent. A project holds at most one endpoint of kind
    /// "dockerregistry", so the kind itself is the discriminator.
    pub async fn find_or_create_docker_registry_endpoint(
        &self,
        project_id: &str,
        registry: &DockerRegistry,
    ) -> Result<Option<ServiceEndpoint>> {
        if !registry.is_requested() {
            return Ok(None);
        }

        let existing = self.list_service_endpoints(project_id).await?;
        if let Some(endpoint) = existing.into_iter().find(|e| e.kind == "dockerregistry") {
            info!(endpoint = %endpoint.name, "found Docker registry endpoint");
            return Ok(Some(endpoint));
        }

        info!(registry = %registry.url, "creating Docker registry endpoint");
        let created = self
            .create_service_endpoint(project_id, &CreateServiceEndpoint::docker_registry(registry))
            .await?;
        Ok(Some(created))
    }
}
