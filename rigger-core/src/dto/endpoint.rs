//! Service endpoint creation requests
//!
//! One request shape, three constructors. Each endpoint kind carries its own
//! authorization scheme and parameter set; the discriminating attribute used
//! for idempotent lookup is baked in here (subscription name, host url,
//! endpoint type respectively).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::domain::{AzureSubscription, DockerHost, DockerRegistry};

/// Azure Resource Manager management endpoint every azurerm connection
/// points at.
pub const AZURE_MANAGEMENT_URL: &str = "https://management.core.windows.net/";

/// Body for `POST /{project}/_apis/distributedtask/serviceendpoints`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateServiceEndpoint {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    pub authorization: EndpointAuthorization,
    #[serde(skip_serializing_if = "Map::is_empty", default)]
    pub data: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointAuthorization {
    pub scheme: String,
    pub parameters: Map<String, Value>,
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

impl CreateServiceEndpoint {
    /// Azure service connection: service-principal authorization against the
    /// subscription, named after the subscription.
    pub fn azure(sub: &AzureSubscription) -> Self {
        Self {
            name: sub.name.clone(),
            kind: "azurerm".to_string(),
            url: AZURE_MANAGEMENT_URL.to_string(),
            authorization: EndpointAuthorization {
                scheme: "ServicePrincipal".to_string(),
                parameters: object(json!({
                    "serviceprincipalid": sub.service_principal_id,
                    "serviceprincipalkey": sub.service_principal_key,
                    "tenantid": sub.tenant_id,
                })),
            },
            data: object(json!({
                "subscriptionId": sub.id,
                "subscriptionName": sub.name,
                "creationMode": "Manual",
            })),
        }
    }

    /// Docker host connection. The certificate path travels as an
    /// authorization parameter when supplied; reading the certificate
    /// material itself is the caller's concern.
    pub fn docker_host(host: &DockerHost) -> Self {
        let mut parameters = Map::new();
        if let Some(path) = &host.cert_path {
            parameters.insert("certificatepath".to_string(), json!(path));
        }
        Self {
            name: "Docker".to_string(),
            kind: "dockerhost".to_string(),
            url: host.url.clone(),
            authorization: EndpointAuthorization {
                scheme: "Certificate".to_string(),
                parameters,
            },
            data: Map::new(),
        }
    }

    /// Container registry connection with username/password authorization.
    pub fn docker_registry(registry: &DockerRegistry) -> Self {
        Self {
            name: "Docker Registry".to_string(),
            kind: "dockerregistry".to_string(),
            url: registry.url.clone(),
            authorization: EndpointAuthorization {
                scheme: "UsernamePassword".to_string(),
                parameters: object(json!({
                    "registry": registry.url,
                    "username": registry.username,
                    "password": registry.password,
                    "email": registry.email,
                })),
            },
            data: object(json!({ "registrytype": "Others" })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_azure_endpoint_payload() {
        let sub = AzureSubscription {
            name: "AzureSub".into(),
            id: "sub-id".into(),
            tenant_id: "tenant".into(),
            service_principal_id: "sp-id".into(),
            service_principal_key: "sp-key".into(),
        };
        let body = serde_json::to_value(CreateServiceEndpoint::azure(&sub)).unwrap();
        assert_eq!(body["name"], "AzureSub");
        assert_eq!(body["type"], "azurerm");
        assert_eq!(body["url"], AZURE_MANAGEMENT_URL);
        assert_eq!(body["authorization"]["scheme"], "ServicePrincipal");
        assert_eq!(body["authorization"]["parameters"]["tenantid"], "tenant");
        assert_eq!(body["data"]["subscriptionName"], "AzureSub");
        assert_eq!(body["data"]["creationMode"], "Manual");
    }

    #[test]
    fn test_docker_host_payload() {
        let host = DockerHost {
            url: "tcp://docker:2376".into(),
            cert_path: Some("/certs".into()),
        };
        let body = serde_json::to_value(CreateServiceEndpoint::docker_host(&host)).unwrap();
        assert_eq!(body["name"], "Docker");
        assert_eq!(body["type"], "dockerhost");
        assert_eq!(body["url"], "tcp://docker:2376");
        assert_eq!(body["authorization"]["scheme"], "Certificate");
        assert_eq!(body["authorization"]["parameters"]["certificatepath"], "/certs");
    }

    #[test]
    fn test_docker_host_payload_without_certs() {
        let host = DockerHost {
            url: "tcp://docker:2376".into(),
            cert_path: None,
        };
        let body = serde_json::to_value(CreateServiceEndpoint::docker_host(&host)).unwrap();
        assert!(
            body["authorization"]["parameters"]
                .as_object()
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_docker_registry_payload() {
        let registry = DockerRegistry {
            url: "https://index.docker.io/v1/".into(),
            username: "user".into(),
            password: "secret".into(),
            email: "user@example.com".into(),
        };
        let body = serde_json::to_value(CreateServiceEndpoint::docker_registry(&registry)).unwrap();
        assert_eq!(body["name"], "Docker Registry");
        assert_eq!(body["type"], "dockerregistry");
        assert_eq!(body["authorization"]["scheme"], "UsernamePassword");
        assert_eq!(
            body["authorization"]["parameters"]["registry"],
            "https://index.docker.io/v1/"
        );
        assert_eq!(body["data"]["registrytype"], "Others");
    }
}
