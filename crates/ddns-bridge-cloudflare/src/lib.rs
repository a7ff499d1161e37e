// # Cloudflare Update Orchestration
//
// This crate converges a single DNS address record on Cloudflare to a target
// address, authenticated with the credential supplied by the caller.
//
// ## Sequence
//
// 1. Resolve the owning zone from the last two labels of the hostname
// 2. Look up an existing record with the exact hostname
// 3. Replace that record, or create one if none exists
//
// Each step depends on the previous one; the first call that does not
// succeed aborts the sequence and nothing downstream executes.
//
// ## Constraints
//
// - ❌ NO retry logic, NO backoff: every call is single-shot
// - ❌ NO shared connection pool: each update builds its own client
// - ❌ NO caching of zone or record IDs between updates
// - ✅ Upstream response bodies are forwarded with errors, never masked
//
// ## Security Requirements
//
// - API token NEVER appears in logs
// - API token is provided per request, never stored
//
// ## API Reference
//
// - Cloudflare API v4: https://developers.cloudflare.com/api/
// - List Zones: GET `/zones?name=...`
// - List DNS Records: GET `/zones/:zone_id/dns_records?name=...`
// - Create DNS Record: POST `/zones/:zone_id/dns_records`
// - Update DNS Record: PUT `/zones/:zone_id/dns_records/:record_id`

pub mod api;

use api::{RecordList, ZoneList, parse_envelope, parse_response};
use async_trait::async_trait;
use ddns_bridge_core::record::zone_name_for;
use ddns_bridge_core::traits::{DnsUpdater, UpdateResult};
use ddns_bridge_core::{
    Credential, Error, ExistingRecord, ProviderConfig, RecordPayload, RecordType, Result,
    UpdateRequest, Zone,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// Cloudflare update orchestrator
///
/// Holds configuration only. The credential arrives with each update and is
/// dropped when the update returns.
///
/// # Dry-Run Mode
///
/// When `dry_run` is true, the orchestrator will:
/// - Perform the zone and record lookups
/// - Log the intended create/replace payload
/// - **NOT** actually modify DNS records
#[derive(Debug, Clone)]
pub struct CloudflareUpdater {
    /// API base URL, without a trailing slash
    api_base: String,

    /// Per-call timeout (None: transport default)
    timeout: Option<Duration>,

    /// Dry-run mode: if true, perform lookups but skip the write
    dry_run: bool,
}

impl CloudflareUpdater {
    /// Create a new orchestrator from provider configuration
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            api_base: config.api_base.trim_end_matches('/').to_string(),
            timeout: config.timeout_secs.map(Duration::from_secs),
            dry_run: config.dry_run,
        }
    }

    /// Whether writes are skipped
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path)
    }

    /// Build the transport for one update
    fn client(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        builder.build().map_err(|e| {
            Error::remote(
                "client setup",
                format!("Failed to build HTTP client: {}", e),
                None,
            )
        })
    }

    /// Send one authenticated request and return its raw body and status
    async fn send(
        &self,
        operation: &'static str,
        request: reqwest::RequestBuilder,
        credential: &Credential,
    ) -> Result<(reqwest::StatusCode, Vec<u8>)> {
        let response = request
            .bearer_auth(credential.expose())
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| Error::remote(operation, format!("HTTP request failed: {}", e), None))?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            Error::remote(
                operation,
                format!("Failed to read response ({}): {}", status, e),
                None,
            )
        })?;

        Ok((status, body.to_vec()))
    }

    /// Send one authenticated request and extract its typed `result`
    async fn call<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: reqwest::RequestBuilder,
        credential: &Credential,
    ) -> Result<api::ApiResponse<T>> {
        let (status, body) = self.send(operation, request, credential).await?;

        let parsed = parse_response(operation, status, &body);
        if let Err(ref e) = parsed {
            tracing::warn!("Cloudflare {} failed: {}", operation, e);
        }
        parsed
    }

    /// Find the zone owning `hostname`
    ///
    /// # API Call
    ///
    /// ```http
    /// GET /zones?name=example.com
    /// Authorization: Bearer <token>
    /// ```
    async fn find_zone(
        &self,
        client: &reqwest::Client,
        credential: &Credential,
        hostname: &str,
    ) -> Result<Zone> {
        let zone_name = zone_name_for(hostname);
        tracing::debug!("Looking up zone for domain: {}", zone_name);

        let request = client.get(self.url("zones")).query(&[("name", zone_name)]);
        let ZoneList { result, raw } = self.call("zone lookup", request, credential).await?;

        let zone = result
            .into_iter()
            .next()
            .ok_or_else(|| Error::zone_not_found(zone_name, raw))?;

        tracing::debug!("Found zone ID: {}", zone.id);
        Ok(zone)
    }

    /// Find an existing record named exactly `hostname`
    ///
    /// # API Call
    ///
    /// ```http
    /// GET /zones/:zone_id/dns_records?name=home.example.com
    /// Authorization: Bearer <token>
    /// ```
    async fn find_record(
        &self,
        client: &reqwest::Client,
        credential: &Credential,
        zone_id: &str,
        hostname: &str,
    ) -> Result<Option<ExistingRecord>> {
        tracing::debug!("Looking up record: {}", hostname);

        let request = client
            .get(self.url(&format!("zones/{}/dns_records", zone_id)))
            .query(&[("name", hostname)]);
        let RecordList { result, .. } = self.call("record lookup", request, credential).await?;

        let record = result.into_iter().next();
        match record {
            Some(ref record) => tracing::debug!(
                "Found record ID: {} (type: {})",
                record.id,
                record.record_type
            ),
            None => tracing::debug!("No existing record for {}", hostname),
        }
        Ok(record)
    }

    /// Replace record `record_id`, or create a new record when it is None
    ///
    /// Success is decided by the envelope alone; the body is returned
    /// verbatim whatever its `result` holds.
    ///
    /// # API Call
    ///
    /// ```http
    /// PUT /zones/:zone_id/dns_records/:record_id
    /// POST /zones/:zone_id/dns_records
    /// {
    ///   "type": "A", "name": "home.example.com", "content": "203.0.113.5",
    ///   "ttl": 1, "proxied": false
    /// }
    /// ```
    async fn write_record(
        &self,
        client: &reqwest::Client,
        credential: &Credential,
        zone_id: &str,
        record_id: Option<&str>,
        payload: &RecordPayload,
    ) -> Result<Value> {
        let request = match record_id {
            Some(record_id) => client
                .put(self.url(&format!("zones/{}/dns_records/{}", zone_id, record_id)))
                .json(payload),
            None => client
                .post(self.url(&format!("zones/{}/dns_records", zone_id)))
                .json(payload),
        };

        let (status, body) = self.send("record write", request, credential).await?;

        let parsed = parse_envelope("record write", status, &body);
        if let Err(ref e) = parsed {
            tracing::warn!("Cloudflare record write failed: {}", e);
        }
        parsed
    }
}

#[async_trait]
impl DnsUpdater for CloudflareUpdater {
    async fn update_dns(
        &self,
        credential: &Credential,
        request: &UpdateRequest,
    ) -> Result<UpdateResult> {
        let hostname = request.hostname();
        let target_ip = request.target_ip();

        tracing::info!(
            "Updating Cloudflare DNS record: {} -> {} [mode: {}]",
            hostname,
            target_ip,
            if self.dry_run { "DRY-RUN" } else { "LIVE" }
        );

        let client = self.client()?;

        // Step 1: Resolve the owning zone
        let zone = self.find_zone(&client, credential, hostname).await?;

        // Step 2: Look up an existing record
        let existing = self
            .find_record(&client, credential, &zone.id, hostname)
            .await?;

        // Step 3: Create or replace
        let record_type = RecordType::resolve(existing.as_ref(), target_ip);
        let payload = RecordPayload::new(record_type, hostname, target_ip);
        let record_id = existing.map(|record| record.id);

        if self.dry_run {
            tracing::info!(
                "[DRY-RUN] Would {} record {} in zone {} with payload: {}",
                if record_id.is_some() { "replace" } else { "create" },
                hostname,
                zone.name.as_deref().unwrap_or(&zone.id),
                serde_json::to_string(&payload).unwrap_or_default()
            );
            return Ok(UpdateResult::DryRun { record_id, payload });
        }

        let response = self
            .write_record(&client, credential, &zone.id, record_id.as_deref(), &payload)
            .await?;

        match record_id {
            Some(record_id) => {
                tracing::info!(
                    "DNS record updated successfully: {} -> {} ({})",
                    hostname,
                    payload.content,
                    payload.record_type
                );
                Ok(UpdateResult::Updated { record_id, response })
            }
            None => {
                tracing::info!(
                    "DNS record created successfully: {} -> {} ({})",
                    hostname,
                    payload.content,
                    payload.record_type
                );
                Ok(UpdateResult::Created { response })
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "cloudflare"
    }
}
