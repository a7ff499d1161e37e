//! In-process stand-in for the Cloudflare API v4
//!
//! Serves canned replies for the three endpoints the update sequence uses
//! and records every call it receives, so tests can assert on the exact
//! requests the orchestrator made.

#![allow(dead_code)]

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

/// A canned reply
#[derive(Debug, Clone)]
pub struct Reply {
    status: StatusCode,
    content_type: &'static str,
    body: String,
}

impl Reply {
    pub fn json(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: body.to_string(),
        }
    }

    pub fn ok(body: Value) -> Self {
        Self::json(StatusCode::OK, body)
    }

    pub fn text(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            content_type: "text/html",
            body: body.to_string(),
        }
    }
}

/// A request received by the mock
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

struct MockState {
    zones: Reply,
    records: Reply,
    write: Reply,
    calls: Vec<RecordedCall>,
}

/// Running mock upstream
pub struct MockCloudflare {
    pub base_url: String,
    state: Arc<Mutex<MockState>>,
}

impl MockCloudflare {
    /// Start a mock answering with the given replies
    pub async fn start(zones: Reply, records: Reply, write: Reply) -> Self {
        let state = Arc::new(Mutex::new(MockState {
            zones,
            records,
            write,
            calls: Vec::new(),
        }));

        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock upstream");
        let addr = listener.local_addr().expect("mock upstream address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock upstream serves");
        });

        Self {
            base_url: format!("http://{}/client/v4", addr),
            state,
        }
    }

    /// All calls received so far, in order
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Calls that tried to create or replace a record
    pub fn writes(&self) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.method == Method::POST || call.method == Method::PUT)
            .collect()
    }
}

/// A base URL nothing is listening on
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    format!("http://{}/client/v4", addr)
}

async fn handle(
    State(state): State<Arc<Mutex<MockState>>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let mut state = state.lock().unwrap();

    state.calls.push(RecordedCall {
        method: method.clone(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).ok(),
    });

    let reply = if method == Method::GET && uri.path().ends_with("/zones") {
        state.zones.clone()
    } else if method == Method::GET && uri.path().ends_with("/dns_records") {
        state.records.clone()
    } else if method == Method::POST || method == Method::PUT {
        state.write.clone()
    } else {
        Reply::json(StatusCode::NOT_FOUND, json!({"success": false}))
    };

    (
        reply.status,
        [(header::CONTENT_TYPE, reply.content_type)],
        reply.body,
    )
        .into_response()
}

/// Zone lookup reply listing one zone
pub fn zone_found(id: &str, name: &str) -> Reply {
    Reply::ok(json!({
        "success": true,
        "errors": [],
        "messages": [],
        "result": [{"id": id, "name": name, "status": "active"}]
    }))
}

/// Lookup reply with an empty result set
pub fn empty_list() -> Reply {
    Reply::ok(json!({
        "success": true,
        "errors": [],
        "messages": [],
        "result": [],
        "result_info": {"page": 1, "per_page": 20, "count": 0, "total_count": 0}
    }))
}

/// Record lookup reply listing one record
pub fn record_found(id: &str, record_type: &str, name: &str, content: &str) -> Reply {
    Reply::ok(json!({
        "success": true,
        "errors": [],
        "messages": [],
        "result": [{
            "id": id,
            "type": record_type,
            "name": name,
            "content": content,
            "ttl": 1,
            "proxied": false
        }]
    }))
}

/// Successful create/replace reply echoing the written record
pub fn write_ok(id: &str, record_type: &str, name: &str, content: &str) -> Reply {
    Reply::ok(json!({
        "success": true,
        "errors": [],
        "messages": [],
        "result": {
            "id": id,
            "type": record_type,
            "name": name,
            "content": content,
            "ttl": 1,
            "proxied": false
        }
    }))
}

/// Provider-side rejection
pub fn rejected(status: StatusCode, code: u32, message: &str) -> Reply {
    Reply::json(
        status,
        json!({
            "success": false,
            "errors": [{"code": code, "message": message}],
            "messages": [],
            "result": null
        }),
    )
}
