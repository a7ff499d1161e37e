//! Typed Cloudflare API v4 responses
//!
//! Every endpoint answers with the same envelope:
//!
//! ```json
//! { "success": true, "errors": [], "messages": [], "result": ... }
//! ```
//!
//! Only `success` and `result` are interpreted. The rest of the body is
//! opaque and travels with errors untouched.

use ddns_bridge_core::{Error, ExistingRecord, Result, Zone};
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Cloudflare response envelope
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub result: Option<T>,
}

/// A successful call: the typed result plus the body it came from
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub result: T,
    pub raw: Value,
}

/// `GET /zones?name=...`
pub type ZoneList = ApiResponse<Vec<Zone>>;

/// `GET /zones/:zone_id/dns_records?name=...`
pub type RecordList = ApiResponse<Vec<ExistingRecord>>;

/// Interpret a raw response for `operation` by its envelope alone
///
/// - Body that is not JSON: error without payload
/// - Non-2xx status or `success != true`: error carrying the body
///
/// Anything else is success and the body is returned as-is, whatever
/// `result` holds. Writes are judged this way.
pub fn parse_envelope(
    operation: &'static str,
    status: StatusCode,
    body: &[u8],
) -> Result<Value> {
    let raw: Value = serde_json::from_slice(body).map_err(|e| {
        Error::remote(
            operation,
            format!("Failed to parse response ({}): {}", status, e),
            None,
        )
    })?;

    let success = raw.get("success").and_then(Value::as_bool) == Some(true);
    if !status.is_success() || !success {
        return Err(Error::remote(
            operation,
            format!("Request was not successful: {}", status),
            Some(raw),
        ));
    }

    Ok(raw)
}

/// Interpret a raw response for `operation` and extract a typed `result`
///
/// Same rules as [`parse_envelope`], plus: a `result` that is missing or
/// does not match `T` is an error carrying the body.
pub fn parse_response<T: DeserializeOwned>(
    operation: &'static str,
    status: StatusCode,
    body: &[u8],
) -> Result<ApiResponse<T>> {
    let raw = parse_envelope(operation, status, body)?;

    let envelope: ApiEnvelope<T> = match serde_json::from_value(raw.clone()) {
        Ok(envelope) => envelope,
        Err(e) => {
            return Err(Error::remote(
                operation,
                format!("Invalid response format: {}", e),
                Some(raw),
            ));
        }
    };

    match envelope.result {
        Some(result) => Ok(ApiResponse { result, raw }),
        None => Err(Error::remote(
            operation,
            "Invalid response format: result is missing",
            Some(raw),
        )),
    }
}
