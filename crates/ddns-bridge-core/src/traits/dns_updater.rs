// # DNS Updater Trait
//
// Defines the interface between the HTTP request handler and the provider
// orchestration that performs the update.
//
// ## Implementations
//
// - Cloudflare: `ddns-bridge-cloudflare` crate
//
// ## Usage
//
// ```rust,ignore
// use ddns_bridge_core::{Credential, DnsUpdater, UpdateRequest};
//
// async fn sync(updater: &dyn DnsUpdater) -> ddns_bridge_core::Result<()> {
//     let credential = Credential::new("token")?;
//     let request = UpdateRequest::new("home.example.com", "203.0.113.5")?;
//
//     updater.update_dns(&credential, &request).await?;
//     Ok(())
// }
// ```

use async_trait::async_trait;
use serde_json::Value;

use crate::record::RecordPayload;
use crate::request::{Credential, UpdateRequest};

/// Result of a successful update
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateResult {
    /// No record existed; a new one was created
    Created {
        /// Provider response to the create call
        response: Value,
    },
    /// An existing record was replaced
    Updated {
        /// ID of the replaced record
        record_id: String,
        /// Provider response to the replace call
        response: Value,
    },
    /// Lookups ran, the write was skipped (dry-run mode)
    DryRun {
        /// ID of the record that would have been replaced, if any
        record_id: Option<String>,
        /// Body that would have been submitted
        payload: RecordPayload,
    },
}

impl UpdateResult {
    /// The provider's response to the write call, if one was made
    pub fn response(&self) -> Option<&Value> {
        match self {
            UpdateResult::Created { response } | UpdateResult::Updated { response, .. } => {
                Some(response)
            }
            UpdateResult::DryRun { .. } => None,
        }
    }
}

/// Trait for the update orchestration against a DNS provider
///
/// # Thread Safety
///
/// Implementations are shared across request handlers and must be usable
/// from any async task. They hold configuration only; every piece of state
/// an update needs lives for the duration of one `update_dns` call.
///
/// # Failure Semantics
///
/// - Every remote call is single-shot: no retry, no backoff
/// - The first call that does not succeed aborts the sequence
/// - Any response body obtained from the provider travels with the error
#[async_trait]
pub trait DnsUpdater: Send + Sync {
    /// Converge the record for `request.hostname()` to `request.target_ip()`
    ///
    /// # Returns
    ///
    /// - `Ok(UpdateResult)`: The record was created or replaced
    /// - `Err(Error)`: The update failed; see [`crate::Error::payload`]
    async fn update_dns(
        &self,
        credential: &Credential,
        request: &UpdateRequest,
    ) -> Result<UpdateResult, crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}
