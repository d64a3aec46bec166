//! Deployment targets and project types
//!
//! The target decides which service endpoints the release needs and how the
//! build and release definitions are named. The project type selects the
//! pipeline templates and the default container port mapping.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Where the application deploys to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// Azure App Service ("paas" on the command line).
    #[value(name = "paas")]
    #[serde(rename = "paas")]
    AppService,
    /// A Docker host plus a container registry.
    #[value(name = "docker")]
    Docker,
}

impl Target {
    pub fn is_docker(self) -> bool {
        matches!(self, Target::Docker)
    }
}

/// The kind of application being provisioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    /// .NET Core
    Asp,
    /// Node.js
    Node,
    /// Java
    Java,
}

impl ProjectType {
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectType::Asp => "asp",
            ProjectType::Node => "node",
            ProjectType::Java => "java",
        }
    }

    /// Default host:container port mapping for containerized deployments.
    pub fn default_port_mapping(self) -> &'static str {
        match self {
            ProjectType::Asp => "80:80",
            ProjectType::Node => "3000:3000",
            ProjectType::Java => "8080:8080",
        }
    }
}

/// Name of the CI build definition for an application and target.
pub fn build_definition_name(application_name: &str, target: Target) -> String {
    match target {
        Target::AppService => format!("{application_name}-CI"),
        Target::Docker => format!("{application_name}-Docker-CI"),
    }
}

/// Name of the CD release definition for an application and target.
pub fn release_definition_name(application_name: &str, target: Target) -> String {
    match target {
        Target::AppService => format!("{application_name}-CD"),
        Target::Docker => format!("{application_name}-Docker-CD"),
    }
}
