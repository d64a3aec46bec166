//! Agent queue and pool domain types

use serde::{Deserialize, Serialize};

/// An agent queue, scoped to a team project.
///
/// Read-only reference data: the queue resolver matches the configured name
/// (case-sensitive) against the project's queue list to obtain the numeric
/// id the build definition needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentQueue {
    pub id: i64,
    pub name: String,
}

/// An agent pool, scoped to the account. Listed so a user can pick a queue
/// name before provisioning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentPool {
    pub id: i64,
    pub name: String,
}
