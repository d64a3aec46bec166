//! Team project creation request

use serde::{Deserialize, Serialize};

/// The process template every rigger project is created with.
pub const PROCESS_TEMPLATE_TYPE_ID: &str = "6b724908-ef14-45cf-84f8-768b5384da45";

/// Body for `POST /_apis/projects`.
///
/// Capabilities are fixed: Git version control and the Agile process
/// template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTeamProject {
    pub name: String,
    pub capabilities: Capabilities,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capabilities {
    pub versioncontrol: VersionControl,
    #[serde(rename = "processTemplate")]
    pub process_template: ProcessTemplate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionControl {
    #[serde(rename = "sourceControlType")]
    pub source_control_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessTemplate {
    #[serde(rename = "templateTypeId")]
    pub template_type_id: String,
}

impl CreateTeamProject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            capabilities: Capabilities {
                versioncontrol: VersionControl {
                    source_control_type: "Git".to_string(),
                },
                process_template: ProcessTemplate {
                    template_type_id: PROCESS_TEMPLATE_TYPE_ID.to_string(),
                },
            },
        }
    }
}
