//! Error types for the DDNS bridge
//!
//! Every failure an update can hit is one of three kinds: a missing input
//! detected before any remote call, a zone the provider does not know, or a
//! remote call that did not succeed. The latter two carry whatever response
//! body the provider returned so it can be forwarded to the caller verbatim.

use serde_json::Value;
use thiserror::Error;

/// Result type alias for bridge operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the DDNS bridge
#[derive(Error, Debug)]
pub enum Error {
    /// A required request input was absent or empty
    #[error("Missing {0}")]
    Missing(&'static str),

    /// The provider has no zone for the derived registrable domain
    #[error("Zone not found: {domain}")]
    ZoneNotFound {
        /// Domain the zone lookup was filtered by
        domain: String,
        /// Raw zone-lookup response
        payload: Value,
    },

    /// A remote call failed, or its response did not indicate success
    #[error("Provider error ({operation}): {message}")]
    Remote {
        /// Upstream operation that failed (e.g. "zone lookup")
        operation: &'static str,
        /// Error message
        message: String,
        /// Response body, if one was received and parsed
        payload: Option<Value>,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a missing-input error
    pub fn missing(field: &'static str) -> Self {
        Self::Missing(field)
    }

    /// Create a zone-not-found error
    pub fn zone_not_found(domain: impl Into<String>, payload: Value) -> Self {
        Self::ZoneNotFound {
            domain: domain.into(),
            payload,
        }
    }

    /// Create a remote-call error
    pub fn remote(
        operation: &'static str,
        message: impl Into<String>,
        payload: Option<Value>,
    ) -> Self {
        Self::Remote {
            operation,
            message: message.into(),
            payload,
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// The provider response attached to this error, if any
    ///
    /// `None` means the failure happened before a response body could be
    /// obtained (transport failure, unreadable or non-JSON body).
    pub fn payload(&self) -> Option<&Value> {
        match self {
            Self::ZoneNotFound { payload, .. } => Some(payload),
            Self::Remote { payload, .. } => payload.as_ref(),
            Self::Missing(_) | Self::Config(_) => None,
        }
    }

    /// Whether this error was raised by input validation
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Missing(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_renders_handler_message() {
        assert_eq!(Error::missing("token").to_string(), "Missing token");
        assert_eq!(Error::missing("hostname").to_string(), "Missing hostname");
        assert!(Error::missing("token").is_validation());
    }

    #[test]
    fn zone_not_found_always_carries_payload() {
        let body = json!({"success": true, "result": []});
        let err = Error::zone_not_found("example.com", body.clone());

        assert_eq!(err.payload(), Some(&body));
        assert!(!err.is_validation());
    }

    #[test]
    fn remote_payload_is_optional() {
        let transport = Error::remote("zone lookup", "connection refused", None);
        assert!(transport.payload().is_none());

        let body = json!({"success": false, "errors": [{"code": 9109}]});
        let rejected = Error::remote("record write", "400 Bad Request", Some(body.clone()));
        assert_eq!(rejected.payload(), Some(&body));
        assert_eq!(
            rejected.to_string(),
            "Provider error (record write): 400 Bad Request"
        );
    }
}
