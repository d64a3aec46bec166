//! Team project domain types

use serde::{Deserialize, Serialize};

/// A team project, the container every other provisioned resource lives in.
///
/// Re-fetched by name on every run; never cached across runs. The `id` is
/// server-assigned and is the scope key for endpoints, queues, builds and
/// releases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamProject {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    /// Project lifecycle state as reported by the API (e.g. "wellFormed").
    #[serde(default)]
    pub state: Option<String>,
}

/// What a project-creation POST returns: not the project itself, but a
/// handle on the queued operation plus the URL to poll for its status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationReference {
    #[serde(default)]
    pub id: Option<String>,
    pub status: OperationStatus,
    /// Status-tracking URL, polled until the operation reaches a terminal
    /// status.
    pub url: String,
}

/// Status of a long-running operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OperationStatus {
    NotSet,
    Queued,
    InProgress,
    Succeeded,
    Failed,
    Cancelled,
}

impl OperationStatus {
    /// True once no further state transition can occur.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            OperationStatus::Succeeded | OperationStatus::Failed | OperationStatus::Cancelled
        )
    }
}

impl std::fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OperationStatus::NotSet => "notSet",
            OperationStatus::Queued => "queued",
            OperationStatus::InProgress => "inProgress",
            OperationStatus::Succeeded => "succeeded",
            OperationStatus::Failed => "failed",
            OperationStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}
