//! Team Services HTTP client
//!
//! A typed client for the ticket-based Team Services REST API that rigger
//! provisions against. Methods are grouped one file per resource family:
//! - Team projects (find, create, status polling)
//! - Service endpoints (Azure, Docker host, container registry)
//! - Agent pools and queues
//! - Build definitions
//! - Release definitions
//!
//! Every method sends `Authorization: Basic <token>` built from a
//! pre-encoded credential handed in at construction; the client never
//! re-encodes it. Find operations report absence as `Ok(None)` rather than
//! an error, which is what makes find-or-create idempotent.
//!
//! # Example
//!
//! ```no_run
//! use rigger_client::TeamServicesClient;
//! use rigger_core::EncodedPat;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), rigger_client::ClientError> {
//!     let client = TeamServicesClient::new(
//!         "http://localhost:8080/tfs/DefaultCollection",
//!         EncodedPat::encode("my-pat"),
//!     );
//!
//!     let project = client.find_or_create_project("e2eDemo").await?;
//!     println!("project id: {}", project.id);
//!     Ok(())
//! }
//! ```

pub mod error;

mod builds;
mod endpoints;
mod projects;
mod queues;
mod releases;

pub use error::{AUTH_FAILED_MESSAGE, ClientError, Result};
pub use projects::PollPolicy;

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use rigger_core::EncodedPat;
use serde::de::DeserializeOwned;

/// HTTP client for the Team Services REST API.
///
/// Holds the account (collection) URL, the already-encoded credential and
/// the polling policy used while waiting for project provisioning.
#[derive(Debug, Clone)]
pub struct TeamServicesClient {
    /// Account URL up to the collection, e.g.
    /// "http://tfs:8080/tfs/DefaultCollection"
    account: String,
    /// Credential encoded once by the caller and forwarded verbatim
    credential: EncodedPat,
    /// HTTP client instance
    http: Client,
    /// Bounds for the project-creation status poll
    poll: PollPolicy,
}

impl TeamServicesClient {
    /// Create a new client for an account.
    ///
    /// # Arguments
    /// * `account` - The collection URL (e.g. "http://tfs:8080/tfs/DefaultCollection")
    /// * `credential` - The PAT, already encoded via [`EncodedPat::encode`]
    pub fn new(account: impl Into<String>, credential: EncodedPat) -> Self {
        let account = account.into();
        Self {
            account: account.trim_end_matches('/').to_string(),
            credential,
            http: Client::new(),
            poll: PollPolicy::default(),
        }
    }

    /// Create a client with a custom `reqwest::Client`.
    ///
    /// This allows configuring timeouts, proxies, TLS settings, etc.
    pub fn with_client(account: impl Into<String>, credential: EncodedPat, http: Client) -> Self {
        let account = account.into();
        Self {
            account: account.trim_end_matches('/').to_string(),
            credential,
            http,
            poll: PollPolicy::default(),
        }
    }

    /// Override the status-polling bounds.
    pub fn with_poll_policy(mut self, poll: PollPolicy) -> Self {
        self.poll = poll;
        self
    }

    /// Get the account URL this client talks to
    pub fn account(&self) -> &str {
        &self.account
    }

    pub(crate) fn poll_policy(&self) -> &PollPolicy {
        &self.poll
    }

    // =============================================================================
    // Request / Response plumbing
    // =============================================================================

    /// Start a request against `url` pinned to `api_version`, with the
    /// authorization header attached.
    pub(crate) fn request(&self, method: Method, url: &str, api_version: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Basic {}", self.credential.as_str()),
            )
            .query(&[("api-version", api_version)])
    }

    /// Statuses the remote uses for bad credentials. TFS answers 203 (a
    /// sign-in page) instead of 401 when the token is rejected.
    fn is_auth_failure(status: StatusCode) -> bool {
        matches!(status.as_u16(), 203 | 401 | 403)
    }

    /// Handle a response where the resource must exist: deserialize on
    /// success, otherwise map the status to an error.
    pub(crate) async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if Self::is_auth_failure(status) {
            return Err(ClientError::AuthenticationFailed);
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::Parse(format!("Failed to parse JSON response: {e}")))
    }

    /// Handle a response for a find operation: 404 is a valid "absent"
    /// signal, not an error.
    pub(crate) async fn handle_find<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<Option<T>> {
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        self.handle_response(response).await.map(Some)
    }
}
