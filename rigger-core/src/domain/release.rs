//! Release definition domain types

use serde::{Deserialize, Serialize};

/// A release (CD) definition.
///
/// The interesting structure (environments, approvals, endpoint references)
/// lives in the posted payload; what comes back only needs the id and name
/// for idempotency checks and reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseDefinition {
    pub id: i64,
    pub name: String,
}
