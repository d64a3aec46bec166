//! Domain types
//!
//! The Team Services resources rigger resolves or creates. These are the
//! shapes the remote API hands back; the provisioning chain threads them
//! from one stage to the next and never mutates them after creation.

pub mod build;
pub mod endpoint;
pub mod project;
pub mod queue;
pub mod release;

pub use build::{BuildDefinition, Identity};
pub use endpoint::{AzureSubscription, DockerHost, DockerRegistry, ServiceEndpoint};
pub use project::{OperationReference, OperationStatus, TeamProject};
pub use queue::{AgentPool, AgentQueue};
pub use release::ReleaseDefinition;
