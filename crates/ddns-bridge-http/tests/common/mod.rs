//! Test doubles and helpers for endpoint tests

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{Request, StatusCode};
use ddns_bridge_core::error::Result;
use ddns_bridge_core::traits::{DnsUpdater, UpdateResult};
use ddns_bridge_core::{Credential, Error, UpdateRequest};
use ddns_bridge_http::{ApiResponse, AppState, router};
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// What the mock updater answers with
#[derive(Debug, Clone)]
pub enum Outcome {
    Created,
    ProviderRejected(Value),
    TransportFailed,
}

/// An update seen by the mock
#[derive(Debug, Clone, PartialEq)]
pub struct SeenUpdate {
    pub token: String,
    pub hostname: String,
    pub target_ip: String,
}

/// A mock DnsUpdater that records calls
pub struct MockUpdater {
    outcome: Outcome,
    seen: Arc<Mutex<Vec<SeenUpdate>>>,
}

impl MockUpdater {
    pub fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Updates received so far
    pub fn seen(&self) -> Vec<SeenUpdate> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl DnsUpdater for MockUpdater {
    async fn update_dns(
        &self,
        credential: &Credential,
        request: &UpdateRequest,
    ) -> Result<UpdateResult> {
        self.seen.lock().unwrap().push(SeenUpdate {
            token: credential.expose().to_string(),
            hostname: request.hostname().to_string(),
            target_ip: request.target_ip().to_string(),
        });

        match &self.outcome {
            Outcome::Created => Ok(UpdateResult::Created {
                response: json!({"success": true}),
            }),
            Outcome::ProviderRejected(body) => Err(Error::remote(
                "record write",
                "Request was not successful: 400 Bad Request",
                Some(body.clone()),
            )),
            Outcome::TransportFailed => Err(Error::remote(
                "zone lookup",
                "HTTP request failed: connection refused",
                None,
            )),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Router wired to `updater`
pub fn app(updater: Arc<MockUpdater>, trust_forwarded_headers: bool) -> Router {
    router(AppState::new(updater, trust_forwarded_headers))
}

/// Caller address injected as connect-info
pub fn peer() -> SocketAddr {
    SocketAddr::from(([192, 0, 2, 10], 50123))
}

/// Start a GET request builder
pub fn get(uri: &str) -> axum::http::request::Builder {
    Request::builder().method("GET").uri(uri)
}

/// Send `request` through `app` with the connect-info a real listener
/// would add, and decode the JSON body
pub async fn send(
    app: Router,
    request: axum::http::request::Builder,
) -> (StatusCode, ApiResponse) {
    let mut request = request.body(Body::empty()).expect("valid request");
    request.extensions_mut().insert(ConnectInfo(peer()));

    let response = app.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    let body = serde_json::from_slice(&bytes).expect("JSON body");

    (status, body)
}
