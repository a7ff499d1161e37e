//! Request-scoped inputs of a single update

use crate::error::{Error, Result};
use std::fmt;

/// Bearer credential for the caller's provider account
///
/// The Debug implementation intentionally does NOT expose the token.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a token, rejecting an empty one
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.is_empty() {
            return Err(Error::missing("token"));
        }
        Ok(Self(token))
    }

    /// The raw token, for building the upstream `Authorization` header
    ///
    /// ⚠️ NEVER log this value
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&"<REDACTED>").finish()
    }
}

/// A hostname and the address it should resolve to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRequest {
    hostname: String,
    target_ip: String,
}

impl UpdateRequest {
    /// Create an update request
    ///
    /// Both fields must be non-empty. The address is kept as the literal
    /// the caller supplied; the provider is the one to reject it.
    pub fn new(hostname: impl Into<String>, target_ip: impl Into<String>) -> Result<Self> {
        let hostname = hostname.into();
        if hostname.is_empty() {
            return Err(Error::missing("hostname"));
        }

        let target_ip = target_ip.into();
        if target_ip.is_empty() {
            return Err(Error::missing("ip"));
        }

        Ok(Self {
            hostname,
            target_ip,
        })
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn target_ip(&self) -> &str {
        &self.target_ip
    }
}
