//! Build definition domain types

use serde::{Deserialize, Serialize};

/// An identity reference as Team Services reports it on authored resources.
///
/// The build definition's author doubles as the default release approver.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub unique_name: String,
}

/// A build (CI) definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildDefinition {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub authored_by: Option<Identity>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_definition_deserialize() {
        let def: BuildDefinition = serde_json::from_value(serde_json::json!({
            "id": 7,
            "name": "e2eDemo-CI",
            "authoredBy": {
                "id": "aid",
                "displayName": "Author",
                "uniqueName": "author@example.com"
            }
        }))
        .unwrap();
        assert_eq!(def.id, 7);
        let author = def.authored_by.unwrap();
        assert_eq!(author.id, "aid");
        assert_eq!(author.unique_name, "author@example.com");
    }

    #[test]
    fn test_build_definition_without_author() {
        let def: BuildDefinition =
            serde_json::from_value(serde_json::json!({ "id": 1, "name": "x-CI" })).unwrap();
        assert!(def.authored_by.is_none());
    }
}
