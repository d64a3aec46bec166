//! Agent pool and queue operations

use crate::TeamServicesClient;
use crate::error::{ClientError, Result};
use reqwest::Method;
use rigger_core::domain::{AgentPool, AgentQueue};
use rigger_core::dto::ListEnvelope;

const DISTRIBUTED_TASK_API_VERSION: &str = "3.0-preview.1";

impl TeamServicesClient {
    // =============================================================================
    // Agent Pools & Queues
    // =============================================================================

    /// List the account's agent pools. Used to offer queue choices before a
    /// provisioning run.
    pub async fn list_pools(&self) -> Result<Vec<AgentPool>> {
        let url = format!("{}/_apis/distributedtask/pools", self.account());
        let response = self
            .request(Method::GET, &url, DISTRIBUTED_TASK_API_VERSION)
            .send()
            .await?;

        let envelope: ListEnvelope<AgentPool> = self.handle_response(response).await?;
        Ok(envelope.value)
    }

    /// List the agent queues of a project.
    pub async fn list_queues(&self, project_id: &str) -> Result<Vec<AgentQueue>> {
        let url = format!(
            "{}/{}/_apis/distributedtask/queues",
            self.account(),
            project_id
        );
        let response = self
            .request(Method::GET, &url, DISTRIBUTED_TASK_API_VERSION)
            .send()
            .await?;

        let envelope: ListEnvelope<AgentQueue> = self.handle_response(response).await?;
        Ok(envelope.value)
    }

    /// Resolve an agent queue name to its numeric id.
    ///
    /// The match is case-sensitive and exact. Build definitions require a
    /// valid queue id, so an absent queue is an error, not a silent
    /// fallback.
    pub async fn find_queue(&self, name: &str, project_id: &str) -> Result<i64> {
        let queues = self.list_queues(project_id).await?;

        queues
            .into_iter()
            .find(|q| q.name == name)
            .map(|q| q.id)
            .ok_or_else(|| ClientError::QueueNotFound(name.to_string()))
    }
}
