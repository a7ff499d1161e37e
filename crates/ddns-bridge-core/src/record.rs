//! Provider-side data model: zones and DNS records
//!
//! Lookup types carry only the fields the update sequence reads; anything
//! else the provider returns is ignored. The write body is the full record.

use serde::{Deserialize, Serialize};
use std::fmt;

/// TTL value the provider interprets as "automatic"
pub const AUTOMATIC_TTL: u32 = 1;

/// DNS record type
///
/// Only address records are written by the bridge, but an existing record is
/// reused with whatever type the provider reports, so unknown types are kept
/// verbatim instead of being rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecordType {
    /// A record (IPv4)
    A,
    /// AAAA record (IPv6)
    Aaaa,
    /// Any other type reported by the provider
    Other(String),
}

impl RecordType {
    /// Select the type for a new record from the target address literal
    ///
    /// `AAAA` iff the literal contains a colon, otherwise `A`.
    pub fn for_address(target_ip: &str) -> Self {
        if target_ip.contains(':') {
            RecordType::Aaaa
        } else {
            RecordType::A
        }
    }

    /// Resolve the type to submit for an update
    ///
    /// An existing record keeps its stored type even when the target
    /// address belongs to the other family.
    pub fn resolve(existing: Option<&ExistingRecord>, target_ip: &str) -> Self {
        match existing {
            Some(record) => {
                let derived = Self::for_address(target_ip);
                if record.record_type != derived {
                    tracing::debug!(
                        "Keeping existing record type {} for record {} (address implies {})",
                        record.record_type,
                        record.id,
                        derived
                    );
                }
                record.record_type.clone()
            }
            None => Self::for_address(target_ip),
        }
    }

    /// Wire representation of this type
    pub fn as_str(&self) -> &str {
        match self {
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
            RecordType::Other(other) => other,
        }
    }
}

impl From<String> for RecordType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "A" => RecordType::A,
            "AAAA" => RecordType::Aaaa,
            _ => RecordType::Other(value),
        }
    }
}

impl From<RecordType> for String {
    fn from(value: RecordType) -> Self {
        match value {
            RecordType::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A provider zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// Zone ID (provider-assigned)
    pub id: String,
    /// Zone name (e.g., "example.com"), when the provider reports it
    #[serde(default)]
    pub name: Option<String>,
}

/// An existing DNS record found by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingRecord {
    /// The record ID (provider-assigned)
    pub id: String,
    /// The stored record type
    #[serde(rename = "type")]
    pub record_type: RecordType,
}

/// Body submitted to create or replace a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordPayload {
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    pub proxied: bool,
}

impl RecordPayload {
    /// Build the desired record for `hostname` pointing at `target_ip`
    pub fn new(record_type: RecordType, hostname: &str, target_ip: &str) -> Self {
        Self {
            record_type,
            name: hostname.to_string(),
            content: target_ip.to_string(),
            ttl: AUTOMATIC_TTL,
            proxied: false,
        }
    }
}

/// Derive the registrable domain owning `hostname`
///
/// Takes the last two dot-separated labels: "home.example.com" gives
/// "example.com". A single-label hostname is returned unchanged.
pub fn zone_name_for(hostname: &str) -> &str {
    match hostname.rmatch_indices('.').nth(1) {
        Some((idx, _)) => &hostname[idx + 1..],
        None => hostname,
    }
}
