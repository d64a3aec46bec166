//! Error types for the Team Services client

use std::time::Duration;
use thiserror::Error;

/// Fixed message surfaced whenever the remote answers with an
/// authentication-class status, regardless of response body.
pub const AUTH_FAILED_MESSAGE: &str =
    "Unable to authenticate with Team Services. Check account name and personal access token.";

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to Team Services.
///
/// "Not found" is deliberately not here: find operations report absence as
/// `Ok(None)`, not as an error.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or connection failure; never retried, surfaced as-is.
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The remote answered with a non-success status outside the
    /// authentication range.
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the API, when it sent one
        message: String,
    },

    /// 203/401/403-class response. TFS answers 203 (a sign-in page) rather
    /// than 401 when credentials are bad, so that status is in the set.
    #[error("{AUTH_FAILED_MESSAGE}")]
    AuthenticationFailed,

    /// A 2xx response whose body could not be understood.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Project provisioning never reached a terminal status within the
    /// configured deadline.
    #[error("provisioning timed out after {waited:?}")]
    ProvisioningTimeout { waited: Duration },

    /// Project provisioning reached a terminal status other than succeeded.
    #[error("project provisioning ended with status '{0}'")]
    ProvisioningFailed(rigger_core::domain::OperationStatus),

    /// The configured agent queue does not exist in the project.
    #[error("agent queue not found: {0}")]
    QueueNotFound(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is an authentication failure
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::AuthenticationFailed)
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Api { status, .. } if *status >= 400 && *status < 500)
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Api { status, .. } if *status >= 500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_fixed_message() {
        assert_eq!(
            ClientError::AuthenticationFailed.to_string(),
            AUTH_FAILED_MESSAGE
        );
    }

    #[test]
    fn test_api_error_display() {
        let err = ClientError::api_error(400, "bad request");
        let display = err.to_string();
        assert!(display.contains("400"));
        assert!(display.contains("bad request"));
    }

    #[test]
    fn test_error_predicates() {
        assert!(ClientError::api_error(404, "").is_client_error());
        assert!(ClientError::api_error(500, "").is_server_error());
        assert!(ClientError::AuthenticationFailed.is_auth());
        assert!(!ClientError::api_error(500, "").is_auth());
    }
}
