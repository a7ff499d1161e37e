// # ddns-bridged - DDNS Bridge Daemon
//
// This is a THIN integration layer: it reads configuration, initializes
// logging and the runtime, and serves the endpoint from `ddns-bridge-http`
// backed by the Cloudflare orchestrator from `ddns-bridge-cloudflare`.
// No DNS logic lives here.
//
// ## Configuration
//
// All configuration is done via environment variables. The Cloudflare API
// token is NOT configured here: every caller supplies its own.
//
// - `DDNS_LISTEN_ADDR`: Address to listen on (default: 0.0.0.0:9909)
// - `DDNS_LOG_LEVEL`: trace, debug, info, warn, error (default: info)
// - `DDNS_CLOUDFLARE_API_BASE`: Cloudflare API base URL
// - `DDNS_HTTP_TIMEOUT_SECS`: Per-call upstream timeout (default: none)
// - `DDNS_MODE`: "live" or "dry-run" (default: live)
// - `DDNS_TRUST_FORWARDED_HEADERS`: Use X-Forwarded-For / X-Real-IP (default: false)
//
// ## Example
//
// ```bash
// export DDNS_LISTEN_ADDR=0.0.0.0:9909
// export DDNS_LOG_LEVEL=debug
//
// ddns-bridged
//
// curl 'http://localhost:9909/update?token=your_token&hostname=home.example.com'
// ```

use anyhow::Result;
use ddns_bridge_cloudflare::CloudflareUpdater;
use ddns_bridge_core::config::{DEFAULT_API_BASE, DEFAULT_LISTEN_ADDR};
use ddns_bridge_core::{BridgeConfig, ProviderConfig, ServerConfig};
use ddns_bridge_http::{AppState, router};
use std::env;
use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// Exit codes for different termination scenarios
///
/// These codes follow systemd conventions:
/// - 0: Clean shutdown
/// - 1: Configuration or startup error
/// - 2: Runtime error (unexpected)
#[derive(Debug, Clone, Copy)]
enum BridgeExitCode {
    /// Clean shutdown (normal exit)
    CleanShutdown = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error (unexpected failure)
    RuntimeError = 2,
}

impl From<BridgeExitCode> for ExitCode {
    fn from(code: BridgeExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Application configuration
#[derive(Debug)]
struct Config {
    listen_addr: String,
    log_level: String,
    api_base: String,
    http_timeout_secs: Option<String>,
    mode: String,
    trust_forwarded_headers: String,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            listen_addr: lookup("DDNS_LISTEN_ADDR")
                .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string()),
            log_level: lookup("DDNS_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            api_base: lookup("DDNS_CLOUDFLARE_API_BASE")
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            http_timeout_secs: lookup("DDNS_HTTP_TIMEOUT_SECS").filter(|s| !s.is_empty()),
            mode: lookup("DDNS_MODE").unwrap_or_else(|| "live".to_string()),
            trust_forwarded_headers: lookup("DDNS_TRUST_FORWARDED_HEADERS")
                .unwrap_or_else(|| "false".to_string()),
        }
    }

    /// Validate the configuration and build the bridge settings
    fn validate(&self) -> Result<BridgeConfig> {
        let timeout_secs = match self.http_timeout_secs {
            Some(ref raw) => Some(raw.parse::<u64>().map_err(|_| {
                anyhow::anyhow!(
                    "DDNS_HTTP_TIMEOUT_SECS must be a whole number of seconds. Got: {}",
                    raw
                )
            })?),
            None => None,
        };

        let dry_run = match self.mode.to_lowercase().as_str() {
            "live" => false,
            "dry-run" => true,
            _ => anyhow::bail!(
                "DDNS_MODE '{}' is not valid. Valid modes: live, dry-run",
                self.mode
            ),
        };

        let trust_forwarded_headers = match self.trust_forwarded_headers.to_lowercase().as_str() {
            "1" | "true" | "yes" => true,
            "0" | "false" | "no" | "" => false,
            _ => anyhow::bail!(
                "DDNS_TRUST_FORWARDED_HEADERS '{}' is not valid. Use true or false",
                self.trust_forwarded_headers
            ),
        };

        self.max_level()?;

        let config = BridgeConfig {
            server: ServerConfig {
                listen_addr: self.listen_addr.clone(),
                trust_forwarded_headers,
            },
            provider: ProviderConfig {
                api_base: self.api_base.clone(),
                timeout_secs,
                dry_run,
            },
        };
        config.validate()?;

        Ok(config)
    }

    /// Tracing level from `DDNS_LOG_LEVEL`
    fn max_level(&self) -> Result<Level> {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Ok(Level::TRACE),
            "debug" => Ok(Level::DEBUG),
            "info" => Ok(Level::INFO),
            "warn" => Ok(Level::WARN),
            "error" => Ok(Level::ERROR),
            _ => anyhow::bail!(
                "DDNS_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }
    }
}

fn main() -> ExitCode {
    let config = Config::from_env();

    // Validate configuration
    let bridge_config = match config.validate() {
        Ok(bridge_config) => bridge_config,
        Err(e) => {
            eprintln!("Configuration validation error: {}", e);
            return BridgeExitCode::ConfigError.into();
        }
    };

    // Initialize tracing
    let log_level = config.max_level().unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return BridgeExitCode::ConfigError.into();
    }

    info!("Starting ddns-bridged");

    // Enter tokio runtime
    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return BridgeExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(async {
        match run_server(bridge_config).await {
            Ok(()) => BridgeExitCode::CleanShutdown,
            Err(e) => {
                error!("Server error: {}", e);
                BridgeExitCode::RuntimeError
            }
        }
    });

    result.into()
}

/// Serve the update endpoint until a shutdown signal arrives
async fn run_server(config: BridgeConfig) -> Result<()> {
    let addr = config.server.socket_addr()?;

    let updater = CloudflareUpdater::new(&config.provider);
    if updater.is_dry_run() {
        warn!("Cloudflare updater running in DRY-RUN mode - no changes will be made");
    }
    info!("Cloudflare API base: {}", config.provider.api_base);
    if config.server.trust_forwarded_headers {
        info!("Caller address taken from X-Forwarded-For / X-Real-IP when present");
    }

    let app = router(AppState::new(
        Arc::new(updater),
        config.server.trust_forwarded_headers,
    ));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind {}: {}", addr, e))?;
    info!("Listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async {
        match wait_for_shutdown().await {
            Ok(signal) => info!("Received shutdown signal: {}", signal),
            Err(e) => error!("Shutdown signal error: {}", e),
        }
    })
    .await?;

    info!("Server stopped");
    Ok(())
}

/// Wait for shutdown signals (SIGTERM, SIGINT)
///
/// # Returns
///
/// Returns the name of the signal received.
#[cfg(unix)]
async fn wait_for_shutdown() -> Result<&'static str> {
    let mut sigterm = signal(SignalKind::terminate())
        .map_err(|e| anyhow::anyhow!("Failed to setup SIGTERM handler: {}", e))?;
    let mut sigint = signal(SignalKind::interrupt())
        .map_err(|e| anyhow::anyhow!("Failed to setup SIGINT handler: {}", e))?;

    let signal = tokio::select! {
        _ = sigterm.recv() => "SIGTERM",
        _ = sigint.recv() => "SIGINT",
    };
    Ok(signal)
}

/// Wait for shutdown signals (SIGINT only)
///
/// Fallback implementation for non-Unix platforms.
#[cfg(not(unix))]
async fn wait_for_shutdown() -> Result<&'static str> {
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to wait for CTRL-C: {}", e))?;
    Ok("SIGINT")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let bridge = config_from(&[]).validate().unwrap();

        assert_eq!(bridge.server.listen_addr, "0.0.0.0:9909");
        assert!(!bridge.server.trust_forwarded_headers);
        assert_eq!(bridge.provider.api_base, DEFAULT_API_BASE);
        assert_eq!(bridge.provider.timeout_secs, None);
        assert!(!bridge.provider.dry_run);
    }

    #[test]
    fn test_overrides() {
        let bridge = config_from(&[
            ("DDNS_LISTEN_ADDR", "127.0.0.1:8080"),
            ("DDNS_CLOUDFLARE_API_BASE", "http://127.0.0.1:9000/client/v4"),
            ("DDNS_HTTP_TIMEOUT_SECS", "15"),
            ("DDNS_MODE", "dry-run"),
            ("DDNS_TRUST_FORWARDED_HEADERS", "true"),
            ("DDNS_LOG_LEVEL", "DEBUG"),
        ])
        .validate()
        .unwrap();

        assert_eq!(bridge.server.listen_addr, "127.0.0.1:8080");
        assert!(bridge.server.trust_forwarded_headers);
        assert_eq!(bridge.provider.timeout_secs, Some(15));
        assert!(bridge.provider.dry_run);
    }

    #[test]
    fn test_invalid_values() {
        assert!(config_from(&[("DDNS_MODE", "sometimes")]).validate().is_err());
        assert!(config_from(&[("DDNS_LOG_LEVEL", "loud")]).validate().is_err());
        assert!(config_from(&[("DDNS_HTTP_TIMEOUT_SECS", "soon")]).validate().is_err());
        assert!(config_from(&[("DDNS_HTTP_TIMEOUT_SECS", "0")]).validate().is_err());
        assert!(config_from(&[("DDNS_LISTEN_ADDR", "nowhere")]).validate().is_err());
        assert!(
            config_from(&[("DDNS_TRUST_FORWARDED_HEADERS", "maybe")])
                .validate()
                .is_err()
        );
    }
}
