// # ddns-bridge-core
//
// Core library for the DDNS HTTP bridge.
//
// The bridge accepts a hostname and an address over HTTP and converges a
// single DNS address record at the upstream provider to that address.
//
// ## Architecture Overview
//
// - **DnsUpdater**: Trait for the update orchestration against a provider API
// - **Credential / UpdateRequest**: Request-scoped inputs of one update
// - **Zone / ExistingRecord / RecordPayload**: Provider-side data model
// - **BridgeConfig**: Server and provider settings assembled by the daemon
//
// ## Design Principles
//
// 1. **Stateless**: Nothing outlives a single update request
// 2. **Single-shot**: Every remote call is made once, failures are surfaced as-is
// 3. **Pass-through errors**: Upstream payloads are forwarded, never masked
// 4. **Library-First**: The daemon is a thin wiring layer over these crates

pub mod config;
pub mod error;
pub mod record;
pub mod request;
pub mod traits;

// Re-export core types for convenience
pub use config::{BridgeConfig, ProviderConfig, ServerConfig};
pub use error::{Error, Result};
pub use record::{ExistingRecord, RecordPayload, RecordType, Zone};
pub use request::{Credential, UpdateRequest};
pub use traits::{DnsUpdater, UpdateResult};
