//! Service endpoint domain types
//!
//! A service endpoint is a stored, named connection Team Services uses to
//! reach an external system: an Azure subscription, a Docker host or a
//! container registry. Endpoints are scoped to one team project and looked
//! up by a kind-specific discriminator before ever being created, so at most
//! one endpoint per (project, kind, discriminator) exists.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A provisioned service endpoint as returned by the API.
///
/// `data` stays a loose JSON map because each endpoint kind stores different
/// keys there (the Azure variant keeps `subscriptionName`, the registry
/// variant keeps `registrytype`, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceEndpoint {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub data: Value,
}

impl ServiceEndpoint {
    /// The `subscriptionName` stored in the endpoint data, if any.
    pub fn subscription_name(&self) -> Option<&str> {
        self.data.get("subscriptionName").and_then(Value::as_str)
    }
}

/// Azure subscription connection inputs.
///
/// `name` is the identifying field: when it is empty the caller did not ask
/// for an Azure connection and the provisioner short-circuits.
#[derive(Debug, Clone, Default)]
pub struct AzureSubscription {
    pub name: String,
    pub id: String,
    pub tenant_id: String,
    pub service_principal_id: String,
    pub service_principal_key: String,
}

impl AzureSubscription {
    pub fn is_requested(&self) -> bool {
        !self.name.is_empty()
    }
}

/// Docker host connection inputs; `url` is the identifying field.
#[derive(Debug, Clone, Default)]
pub struct DockerHost {
    pub url: String,
    pub cert_path: Option<String>,
}

impl DockerHost {
    pub fn is_requested(&self) -> bool {
        !self.url.is_empty()
    }
}

/// Container registry connection inputs; `url` is the identifying field.
#[derive(Debug, Clone, Default)]
pub struct DockerRegistry {
    pub url: String,
    pub username: String,
    pub password: String,
    pub email: String,
}

impl DockerRegistry {
    pub fn is_requested(&self) -> bool {
        !self.url.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscription_name_from_data() {
        let ep: ServiceEndpoint = serde_json::from_value(serde_json::json!({
            "id": "1",
            "name": "AzureSub",
            "type": "azurerm",
            "data": { "subscriptionName": "AzureSub" }
        }))
        .unwrap();
        assert_eq!(ep.subscription_name(), Some("AzureSub"));
    }

    #[test]
    fn test_endpoint_without_data() {
        let ep: ServiceEndpoint = serde_json::from_value(serde_json::json!({
            "id": "2",
            "name": "Docker",
            "type": "dockerhost"
        }))
        .unwrap();
        assert_eq!(ep.subscription_name(), None);
    }

    #[test]
    fn test_descriptor_is_requested() {
        assert!(!AzureSubscription::default().is_requested());
        assert!(!DockerHost::default().is_requested());
        assert!(!DockerRegistry::default().is_requested());

        let sub = AzureSubscription {
            name: "AzureSub".into(),
            ..Default::default()
        };
        assert!(sub.is_requested());
    }
}
