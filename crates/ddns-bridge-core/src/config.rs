//! Configuration types for the DDNS bridge
//!
//! The daemon assembles these from environment variables; library users can
//! build or deserialize them directly.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Default Cloudflare API base URL
pub const DEFAULT_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Default listen address for the HTTP endpoint
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:9909";

/// Main bridge configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream provider settings
    #[serde(default)]
    pub provider: ProviderConfig,
}

impl BridgeConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.server.validate()?;
        self.provider.validate()?;
        Ok(())
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the endpoint listens on
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Take the caller address from `X-Forwarded-For` / `X-Real-IP`
    ///
    /// Only enable this behind a reverse proxy that sets these headers.
    #[serde(default)]
    pub trust_forwarded_headers: bool,
}

impl ServerConfig {
    /// Validate the server configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.socket_addr().map(|_| ())
    }

    /// Parse the listen address
    pub fn socket_addr(&self) -> Result<SocketAddr, crate::Error> {
        self.listen_addr.parse().map_err(|e| {
            crate::Error::config(format!("Invalid listen address '{}': {}", self.listen_addr, e))
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            trust_forwarded_headers: false,
        }
    }
}

/// Cloudflare provider configuration
///
/// Holds no credential: the token arrives with each request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API base URL, without a trailing slash
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Per-call timeout in seconds (unset: transport default)
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Perform lookups but skip the create/replace call
    #[serde(default)]
    pub dry_run: bool,
}

impl ProviderConfig {
    /// Validate the provider configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if !self.api_base.starts_with("https://") && !self.api_base.starts_with("http://") {
            return Err(crate::Error::config(format!(
                "API base must use HTTP or HTTPS scheme. Got: {}",
                self.api_base
            )));
        }

        if let Some(timeout) = self.timeout_secs
            && !(1..=300).contains(&timeout)
        {
            return Err(crate::Error::config(format!(
                "Timeout must be between 1 and 300 seconds. Got: {}",
                timeout
            )));
        }

        Ok(())
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            timeout_secs: None,
            dry_run: false,
        }
    }
}

fn default_listen_addr() -> String {
    DEFAULT_LISTEN_ADDR.to_string()
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}
