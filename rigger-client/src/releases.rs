//! Release definition operations
//!
//! Same shape as build definitions with the release api-version pin. The
//! payload arrives fully rendered; by this point the target branching
//! (Azure endpoint reference vs. Docker host/registry pair plus port
//! mapping) has already been baked into the document.

use crate::TeamServicesClient;
use crate::error::Result;
use reqwest::Method;
use rigger_core::domain::ReleaseDefinition;
use rigger_core::dto::ListEnvelope;
use serde_json::Value;
use tracing::info;

const RELEASE_API_VERSION: &str = "3.0-preview.3";

impl TeamServicesClient {
    // =============================================================================
    // Release Definitions
    // =============================================================================

    /// Look up a release definition by its exact name. 404 on the list
    /// route counts as "absent".
    pub async fn try_find_release_definition(
        &self,
        project_id: &str,
        name: &str,
    ) -> Result<Option<ReleaseDefinition>> {
        let url = format!(
            "{}/{}/_apis/release/definitions",
            self.account(),
            project_id
        );
        let response = self
            .request(Method::GET, &url, RELEASE_API_VERSION)
            .send()
            .await?;

        let envelope: Option<ListEnvelope<ReleaseDefinition>> = self.handle_find(response).await?;
        Ok(envelope.and_then(|e| e.value.into_iter().find(|d| d.name == name)))
    }

    /// Create a release definition from a rendered template payload.
    pub async fn create_release_definition(
        &self,
        project_id: &str,
        payload: &Value,
    ) -> Result<ReleaseDefinition> {
        let url = format!(
            "{}/{}/_apis/release/definitions",
            self.account(),
            project_id
        );
        let response = self
            .request(Method::POST, &url, RELEASE_API_VERSION)
            .json(payload)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Find a release definition by name, creating it from `payload` when
    /// absent.
    pub async fn find_or_create_release(
        &self,
        project_id: &str,
        name: &str,
        payload: &Value,
    ) -> Result<ReleaseDefinition> {
        if let Some(definition) = self.try_find_release_definition(project_id, name).await? {
            info!(release = %definition.name, "found release definition");
            return Ok(definition);
        }

        info!(release = %name, "creating release definition");
        self.create_release_definition(project_id, payload).await
    }
}
