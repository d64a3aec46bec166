//! Rigger provisioning engine
//!
//! Sequences the fixed resource chain against a Team Services account:
//! team project, then the service endpoints the deployment target needs,
//! then the agent queue lookup, then the build and release definitions.
//! Every stage is find-or-create, so repeated runs are safe; the first
//! unrecoverable error halts the chain and nothing downstream runs.
//!
//! The run is driven by an immutable [`ProvisionConfig`] built up-front by
//! the caller; no process-wide state is consulted.

pub mod config;
pub mod pipeline;
pub mod templates;

pub use config::ProvisionConfig;
pub use pipeline::{ProvisionSummary, provision, run};
pub use templates::{DirTemplates, TemplateSource, TokenMap, render, render_json};
