// # HTTP Update Endpoint
//
// This crate terminates the HTTP-facing contract of the bridge:
//
// - `GET /update?token=...&hostname=...&ip=...` validates its inputs, hands
//   them to a [`DnsUpdater`], and shapes the outcome into a JSON response
// - `GET /` returns a static greeting
//
// It holds no business logic of its own. Everything it knows about DNS is
// behind the `DnsUpdater` trait.
//
// ## Usage
//
// ```rust,ignore
// use std::sync::Arc;
// use ddns_bridge_http::{AppState, router};
//
// let state = AppState::new(Arc::new(updater), false);
// let app = router(state);
//
// let listener = tokio::net::TcpListener::bind("0.0.0.0:9909").await?;
// axum::serve(
//     listener,
//     app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
// )
// .await?;
// ```
//
// The connect-info make-service is what lets the handler fall back to the
// caller's socket address when no `ip` parameter is given.

pub mod client_ip;
pub mod credential;
pub mod handler;

use axum::Router;
use axum::routing::get;
use ddns_bridge_core::DnsUpdater;
use std::sync::Arc;

pub use handler::{ApiResponse, UpdateParams};

/// Shared handler state
///
/// Cloned per request; holds only immutable configuration and the updater.
#[derive(Clone)]
pub struct AppState {
    pub updater: Arc<dyn DnsUpdater>,
    pub trust_forwarded_headers: bool,
}

impl AppState {
    pub fn new(updater: Arc<dyn DnsUpdater>, trust_forwarded_headers: bool) -> Self {
        Self {
            updater,
            trust_forwarded_headers,
        }
    }
}

/// Build the bridge's router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handler::root))
        .route("/update", get(handler::update))
        .with_state(state)
}
