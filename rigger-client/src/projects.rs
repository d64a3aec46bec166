//! Team project operations
//!
//! The only resource with a multi-step asynchronous creation flow: POST the
//! project, poll the returned operation URL until it reaches a terminal
//! status, then re-fetch the project by name for its durable id. The poll is
//! bounded by [`PollPolicy`]; exceeding the deadline surfaces a
//! provisioning-timeout error instead of spinning forever.

use crate::TeamServicesClient;
use crate::error::{ClientError, Result};
use reqwest::Method;
use rigger_core::domain::{OperationReference, OperationStatus, TeamProject};
use rigger_core::dto::project::CreateTeamProject;
use std::time::Duration;
use tokio::time::{Instant, sleep};
use tracing::{debug, info};

const PROJECT_API_VERSION: &str = "1.0";

/// Bounds for the project-creation status poll.
#[derive(Debug, Clone)]
pub struct PollPolicy {
    /// Wait between two status checks
    pub interval: Duration,
    /// Give up once this much time has passed without a terminal status
    pub timeout: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            timeout: Duration::from_secs(300),
        }
    }
}

impl TeamServicesClient {
    // =============================================================================
    // Team Projects
    // =============================================================================

    /// Look up a team project by name.
    ///
    /// # Returns
    /// `Ok(None)` when no project of that name exists (the remote answers
    /// 404); authentication-class statuses become
    /// [`ClientError::AuthenticationFailed`].
    pub async fn try_find_project(&self, name: &str) -> Result<Option<TeamProject>> {
        let url = format!("{}/_apis/projects/{}", self.account(), name);
        let response = self
            .request(Method::GET, &url, PROJECT_API_VERSION)
            .send()
            .await?;

        self.handle_find(response).await
    }

    /// Ask the remote to create a team project with Git version control and
    /// the fixed process template.
    ///
    /// # Returns
    /// The operation reference whose `url` must be polled; the project is
    /// not usable until the operation succeeds.
    pub async fn create_project(&self, name: &str) -> Result<OperationReference> {
        let url = format!("{}/_apis/projects", self.account());
        let response = self
            .request(Method::POST, &url, PROJECT_API_VERSION)
            .json(&CreateTeamProject::new(name))
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Poll an operation status URL until the operation is terminal.
    ///
    /// Sleeps `poll.interval` between checks and fails with
    /// [`ClientError::ProvisioningTimeout`] once `poll.timeout` has elapsed.
    pub async fn wait_for_operation(&self, status_url: &str) -> Result<OperationStatus> {
        let started = Instant::now();

        loop {
            let response = self
                .request(Method::GET, status_url, PROJECT_API_VERSION)
                .send()
                .await?;
            let op: OperationReference = self.handle_response(response).await?;

            debug!(status = %op.status, "project operation status");

            if op.status.is_terminal() {
                return Ok(op.status);
            }

            let waited = started.elapsed();
            if waited + self.poll_policy().interval > self.poll_policy().timeout {
                return Err(ClientError::ProvisioningTimeout { waited });
            }

            sleep(self.poll_policy().interval).await;
        }
    }

    /// Find a team project by name, creating it when absent.
    ///
    /// When the project already exists it is returned unchanged and no
    /// create call is issued. Otherwise the project is created, its
    /// operation polled to a terminal status, and the canonical resource
    /// re-fetched by name so the returned project carries its durable id.
    /// Creation is never re-attempted on failure; a duplicate-name conflict
    /// is worse than a clean abort.
    pub async fn find_or_create_project(&self, name: &str) -> Result<TeamProject> {
        if let Some(project) = self.try_find_project(name).await? {
            info!(project = %project.name, "found team project");
            return Ok(project);
        }

        info!(project = %name, "creating team project");
        let operation = self.create_project(name).await?;

        let status = self.wait_for_operation(&operation.url).await?;
        if status != OperationStatus::Succeeded {
            return Err(ClientError::ProvisioningFailed(status));
        }

        // The create response carries no durable id; re-fetch for the
        // canonical representation.
        match self.try_find_project(name).await? {
            Some(project) => Ok(project),
            None => Err(ClientError::Parse(
                "Unable to find newly created project.".to_string(),
            )),
        }
    }
}
