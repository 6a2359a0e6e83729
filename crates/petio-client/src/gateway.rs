//! # Content Gateway Adapter
//!
//! Fetches content-addressed bytes from the object store's HTTP gateway.
//! The gateway serves `GET {origin}/{external_id}`; a non-success status
//! is a fatal fetch error for the call (the caller may retry the whole
//! operation — the pointer record is unaffected).
//!
//! Transient transport failures are retried with exponential backoff via
//! the crate's retry policy before surfacing as [`GatewayError::Http`].

use async_trait::async_trait;
use std::time::Duration;

use crate::config::{validate_url, ConfigError, GatewayConfig};
use crate::retry::retry_send;

/// Errors from gateway fetches.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Transport-level failure after retries.
    #[error("HTTP error fetching {id}: {source}")]
    Http {
        /// External identifier that was requested.
        id: String,
        /// Underlying transport error.
        source: reqwest::Error,
    },

    /// Gateway answered with a non-success status (404 for unknown ids).
    #[error("gateway returned {status} for {id}")]
    Status {
        /// External identifier that was requested.
        id: String,
        /// HTTP status code.
        status: u16,
    },

    /// The configured per-request timeout elapsed.
    #[error("gateway fetch for {id} timed out after {elapsed_ms}ms")]
    Timeout {
        /// External identifier that was requested.
        id: String,
        /// Configured timeout in milliseconds.
        elapsed_ms: u64,
    },
}

/// Object store gateway: content-addressed byte retrieval.
///
/// The store itself is an external collaborator; this trait is its
/// consumed read surface.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Fetch the raw bytes stored under the given external identifier.
    async fn fetch(&self, id: &str) -> Result<Vec<u8>, GatewayError>;
}

/// HTTP gateway client.
///
/// Wraps a `reqwest::Client` with the gateway origin and a per-request
/// timeout. `Send + Sync`, designed to be shared via `Arc` across async
/// tasks.
#[derive(Debug)]
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
    timeout_ms: u64,
}

impl HttpGateway {
    /// Create a new gateway adapter from configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, ConfigError> {
        let base_url = validate_url(&config.base_url)?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ConfigError::ClientBuild(e.to_string()))?;
        Ok(Self {
            client,
            base_url,
            timeout_ms: config.timeout_secs * 1000,
        })
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn fetch(&self, id: &str) -> Result<Vec<u8>, GatewayError> {
        let url = format!("{}/{}", self.base_url, id);
        let resp = retry_send(|| self.client.get(&url).send())
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Timeout {
                        id: id.to_string(),
                        elapsed_ms: self.timeout_ms,
                    }
                } else {
                    GatewayError::Http {
                        id: id.to_string(),
                        source: e,
                    }
                }
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(GatewayError::Status {
                id: id.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = resp.bytes().await.map_err(|e| GatewayError::Http {
            id: id.to_string(),
            source: e,
        })?;
        tracing::debug!(id, len = bytes.len(), "gateway fetch complete");
        Ok(bytes.to_vec())
    }
}
