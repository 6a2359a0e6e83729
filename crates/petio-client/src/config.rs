//! # Client Configuration
//!
//! Configuration values for the HTTP adapters. Each config carries the
//! endpoint plus a per-request timeout; adapters validate the endpoint at
//! construction time.

use petio_core::OwnerAddress;
use thiserror::Error;

/// Errors from adapter configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Endpoint is not a valid URL.
    #[error("invalid endpoint URL {url:?}: {reason}")]
    InvalidUrl {
        /// The rejected URL string.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),
}

/// Configuration for the content gateway adapter.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Origin of the gateway (e.g. `https://ar-io.net`). Content is
    /// served at `{base_url}/{external_id}`.
    pub base_url: String,
    /// Per-request timeout in seconds (default: 30).
    pub timeout_secs: u64,
}

impl GatewayConfig {
    /// Create a gateway configuration with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 30,
        }
    }
}

/// Configuration for the JSON-RPC event-log provider.
#[derive(Debug, Clone)]
pub struct LogProviderConfig {
    /// JSON-RPC endpoint of the ledger node or provider.
    pub rpc_url: String,
    /// Address of the petition contract whose events are scanned.
    pub contract_address: OwnerAddress,
    /// Per-request timeout in seconds (default: 30).
    pub timeout_secs: u64,
}

impl LogProviderConfig {
    /// Create a log provider configuration with the default timeout.
    pub fn new(rpc_url: impl Into<String>, contract_address: OwnerAddress) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            contract_address,
            timeout_secs: 30,
        }
    }
}

pub(crate) fn validate_url(raw: &str) -> Result<String, ConfigError> {
    let parsed = url::Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme {:?}", parsed.scheme()),
        });
    }
    Ok(raw.trim_end_matches('/').to_string())
}
