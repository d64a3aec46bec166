//! Build definition operations
//!
//! Lookup filters the project's definitions by the exact derived name
//! ("{app}-CI" or "{app}-Docker-CI"). Creation posts an already-rendered
//! template document; template selection and token substitution happen a
//! layer up.

use crate::TeamServicesClient;
use crate::error::Result;
use reqwest::Method;
use rigger_core::domain::BuildDefinition;
use rigger_core::dto::ListEnvelope;
use serde_json::Value;
use tracing::info;

const BUILD_API_VERSION: &str = "2.0";

impl TeamServicesClient {
    // =============================================================================
    // Build Definitions
    // =============================================================================

    /// Look up a build definition by its exact name.
    ///
    /// A 404 on the list route counts as "absent", matching the remote's
    /// behavior for projects that have never had a definition.
    pub async fn try_find_build_definition(
        &self,
        project_id: &str,
        name: &str,
    ) -> Result<Option<BuildDefinition>> {
        let url = format!("{}/{}/_apis/build/definitions", self.account(), project_id);
        let response = self
            .request(Method::GET, &url, BUILD_API_VERSION)
            .send()
            .await?;

        let envelope: Option<ListEnvelope<BuildDefinition>> = self.handle_find(response).await?;
        Ok(envelope.and_then(|e| e.value.into_iter().find(|d| d.name == name)))
    }

    /// Create a build definition from a rendered template payload.
    pub async fn create_build_definition(
        &self,
        project_id: &str,
        payload: &Value,
    ) -> Result<BuildDefinition> {
        let url = format!("{}/{}/_apis/build/definitions", self.account(), project_id);
        let response = self
            .request(Method::POST, &url, BUILD_API_VERSION)
            .json(payload)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Find a build definition by name, creating it from `payload` when
    /// absent. The returned definition carries `authored_by`, which the
    /// release provisioner uses as the default approver.
    pub async fn find_or_create_build(
        &self,
        project_id: &str,
        name: &str,
        payload: &Value,
    ) -> Result<BuildDefinition> {
        if let Some(definition) = self.try_find_build_definition(project_id, name).await? {
            info!(build = %definition.name, "found build definition");
            return Ok(definition);
        }

        info!(build = %name, "creating build definition");
        self.create_build_definition(project_id, payload).await
    }
}
