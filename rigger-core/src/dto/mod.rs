//! Request and envelope shapes for the Team Services REST API
//!
//! List routes answer with a `{ "value": [...] }` envelope; single-resource
//! GETs return the bare resource. Create requests live here so the client
//! crate stays a thin transport layer.

pub mod endpoint;
pub mod project;

use serde::{Deserialize, Serialize};

/// The `{value: [...]}` envelope every list endpoint returns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListEnvelope<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AgentQueue;

    #[test]
    fn test_list_envelope() {
        let env: ListEnvelope<AgentQueue> =
            serde_json::from_str(r#"{"value":[{"id":420,"name":"Default"},{"id":311,"name":"Hosted"}]}"#)
                .unwrap();
        assert_eq!(env.value.len(), 2);
        assert_eq!(env.value[0].id, 420);
    }

    #[test]
    fn test_list_envelope_missing_value() {
        let env: ListEnvelope<AgentQueue> = serde_json::from_str("{}").unwrap();
        assert!(env.value.is_empty());
    }
}
