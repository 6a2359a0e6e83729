//! # petio-client — Ledger and Object-Store Clients
//!
//! HTTP client adapters and the event-log scan algorithm for the
//! signature-asset core:
//!
//! - [`gateway`] — fetching content-addressed bytes from the object store
//!   gateway over HTTP, with transient-error retry.
//! - [`logquery`] — the event-log query abstraction and its failure
//!   classes, including the recoverable provider range limit.
//! - [`rpc`] — the JSON-RPC `eth_getLogs` adapter that decodes
//!   `SignatureAddedLight` events into provenance events.
//! - [`locator`] — the adaptive windowed scan that rediscovers the
//!   transaction behind a pointer within provider range limits.
//! - [`contract`] — consumed read/write surfaces of the petition and
//!   profile contracts. The ledger itself is out of scope; tests use
//!   in-crate fakes.
//!
//! All adapters wrap a `reqwest::Client` with per-request timeouts from
//! their config and are `Send + Sync` for sharing via `Arc` across async
//! tasks.

pub mod config;
pub mod contract;
pub mod gateway;
pub mod locator;
pub mod logquery;
pub mod rpc;

mod retry;

// Re-export primary types.
pub use config::{ConfigError, GatewayConfig, LogProviderConfig};
pub use contract::{CampaignContract, ContractError, PointerWriter, ProfileContract};
pub use gateway::{Gateway, GatewayError, HttpGateway};
pub use locator::{EventLocator, LocateError, ScanDirection, ScanOutcome, ScanStrategy};
pub use logquery::{LogFilter, LogQuery, LogQueryError, LogRange};
pub use rpc::JsonRpcLogProvider;
