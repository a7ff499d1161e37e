//! Request handlers
//!
//! Responses always use the same JSON shape:
//!
//! | outcome | status | body |
//! |---|---|---|
//! | updated | 200 | `{"success":true,"message":"DNS updated successfully"}` |
//! | missing input | 400 | `{"success":false,"message":"Missing token"}` (or hostname, ip) |
//! | provider rejected | 400 | `{"success":false,"message":"Update failed","error":<body>}` |
//! | no provider body | 500 | `{"success":false,"message":"Update failed"}` |

use axum::Json;
use axum::extract::{ConnectInfo, Query, State};
use axum::http::{Extensions, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use ddns_bridge_core::{Error, UpdateRequest};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::net::SocketAddr;

use crate::{AppState, client_ip, credential};

const GREETING: &str = "DDNS bridge is running. Use GET /update?token=<token>&hostname=<hostname>&ip=<ip>\n";

/// Query parameters of `GET /update`
#[derive(Debug, Default, PartialEq, Eq)]
pub struct UpdateParams {
    pub token: Option<String>,
    pub hostname: Option<String>,
    pub ip: Option<String>,
}

impl UpdateParams {
    /// Collect the parameters from decoded query pairs
    ///
    /// A repeated key keeps its first value. Unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "token" => &mut params.token,
                "hostname" => &mut params.hostname,
                "ip" => &mut params.ip,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }
}

/// JSON body of every `/update` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl ApiResponse {
    fn updated() -> Self {
        Self {
            success: true,
            message: "DNS updated successfully".to_string(),
            error: None,
        }
    }

    fn failed(message: impl Into<String>, error: Option<Value>) -> Self {
        Self {
            success: false,
            message: message.into(),
            error,
        }
    }
}

/// `GET /`
pub async fn root() -> &'static str {
    GREETING
}

/// `GET /update`
pub async fn update(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
    headers: HeaderMap,
    extensions: Extensions,
) -> Response {
    let params = UpdateParams::from_pairs(pairs);

    let Some(credential) = credential::extract(&headers, params.token.as_deref()) else {
        return error_response(&Error::missing("token"));
    };

    let hostname = params.hostname.unwrap_or_default();
    if hostname.is_empty() {
        return error_response(&Error::missing("hostname"));
    }

    let target_ip = params
        .ip
        .filter(|ip| !ip.is_empty())
        .or_else(|| {
            let peer = extensions
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| *addr);
            client_ip::resolve(&headers, peer, state.trust_forwarded_headers)
                .map(|ip| ip.to_string())
        })
        .unwrap_or_default();

    let request = match UpdateRequest::new(hostname, target_ip) {
        Ok(request) => request,
        Err(e) => return error_response(&e),
    };

    tracing::info!(
        "Update request: {} -> {} (provider: {})",
        request.hostname(),
        request.target_ip(),
        state.updater.provider_name()
    );

    match state.updater.update_dns(&credential, &request).await {
        Ok(result) => {
            tracing::debug!("Update result for {}: {:?}", request.hostname(), result);
            (StatusCode::OK, Json(ApiResponse::updated())).into_response()
        }
        Err(e) => {
            tracing::warn!("Update failed for {}: {}", request.hostname(), e);
            error_response(&e)
        }
    }
}

/// Map an error onto the endpoint's status and body
///
/// Validation errors are 400 with their own message. Anything else is
/// "Update failed": 400 with the provider's body when one exists, 500 when
/// the failure happened before a body was received.
pub fn error_response(err: &Error) -> Response {
    if err.is_validation() {
        let body = ApiResponse::failed(err.to_string(), None);
        return (StatusCode::BAD_REQUEST, Json(body)).into_response();
    }

    let (status, payload) = match err.payload() {
        Some(payload) => (StatusCode::BAD_REQUEST, Some(payload.clone())),
        None => (StatusCode::INTERNAL_SERVER_ERROR, None),
    };

    (status, Json(ApiResponse::failed("Update failed", payload))).into_response()
}
