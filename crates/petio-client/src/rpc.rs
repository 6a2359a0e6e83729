//! # JSON-RPC Event-Log Provider
//!
//! [`JsonRpcLogProvider`] implements [`LogQuery`] against a ledger node's
//! JSON-RPC endpoint using `eth_getLogs`. It builds the topic filter for
//! the petition contract's signature event,
//!
//! ```text
//! SignatureAddedLight(uint256 indexed campaignId, address indexed signer, string message)
//! ```
//!
//! decodes matching entries into [`ProvenanceEvent`]s, and classifies
//! provider "window too large" rejections — which differ across hosted
//! providers in both error code and wording — into the recoverable
//! [`LogQueryError::RangeLimit`] class.

use async_trait::async_trait;
use petio_core::{keccak_digest, CampaignId, OwnerAddress, ProvenanceEvent, TxHash};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use crate::config::{validate_url, ConfigError, LogProviderConfig};
use crate::logquery::{LogFilter, LogQuery, LogQueryError, LogRange};

/// Event signature whose Keccak-256 digest is the log's first topic.
const EVENT_SIGNATURE: &str = "SignatureAddedLight(uint256,address,string)";

/// JSON-RPC error codes hosted providers use for oversized ranges.
const RANGE_LIMIT_CODES: [i64; 2] = [-32005, -32602];

/// JSON-RPC client for `eth_getLogs`.
#[derive(Debug)]
pub struct JsonRpcLogProvider {
    client: reqwest::Client,
    rpc_url: String,
    contract_address: OwnerAddress,
    topic0: String,
}

impl JsonRpcLogProvider {
    /// Create a new log provider from configuration.
    pub fn new(config: LogProviderConfig) -> Result<Self, ConfigError> {
        let rpc_url = validate_url(&config.rpc_url)?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ConfigError::ClientBuild(e.to_string()))?;
        let topic0 = format!("0x{}", keccak_digest(EVENT_SIGNATURE.as_bytes()).to_hex());
        Ok(Self {
            client,
            rpc_url,
            contract_address: config.contract_address,
            topic0,
        })
    }

    fn topics(&self, filter: &LogFilter) -> Vec<serde_json::Value> {
        let mut topics = vec![json!(self.topic0)];
        topics.push(json!(format!("0x{:064x}", filter.campaign.value())));
        if let Some(owner) = &filter.owner {
            topics.push(json!(pad_address_topic(owner)));
        }
        topics
    }
}

#[async_trait]
impl LogQuery for JsonRpcLogProvider {
    async fn get_logs(
        &self,
        filter: &LogFilter,
        range: LogRange,
    ) -> Result<Vec<ProvenanceEvent>, LogQueryError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "eth_getLogs",
            "params": [{
                "address": self.contract_address.to_string(),
                "topics": self.topics(filter),
                "fromBlock": format!("0x{:x}", range.from),
                "toBlock": format!("0x{:x}", range.to),
            }],
        });

        let resp = self.client.post(&self.rpc_url).json(&body).send().await?;
        let parsed: RpcResponse = resp.json().await?;

        if let Some(err) = parsed.error {
            return Err(classify_rpc_error(err, range));
        }

        let raw = parsed.result.unwrap_or_default();
        tracing::debug!(
            from = range.from,
            to = range.to,
            entries = raw.len(),
            "eth_getLogs window complete"
        );
        raw.into_iter().map(decode_log).collect()
    }
}

// ---------------------------------------------------------------------------
// Wire types and decoding
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct RpcResponse {
    result: Option<Vec<RawLog>>,
    error: Option<RpcErrorBody>,
}

#[derive(Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

#[derive(Deserialize)]
struct RawLog {
    topics: Vec<String>,
    data: String,
    #[serde(rename = "blockNumber")]
    block_number: String,
    #[serde(rename = "transactionHash")]
    transaction_hash: String,
}

/// Classify a provider error: range-limit rejections become the
/// recoverable class, everything else propagates as an RPC error.
fn classify_rpc_error(err: RpcErrorBody, range: LogRange) -> LogQueryError {
    let msg = err.message.to_lowercase();
    let sounds_like_range = msg.contains("range") || msg.contains("too many") || msg.contains("exceed");
    if RANGE_LIMIT_CODES.contains(&err.code) || sounds_like_range {
        LogQueryError::RangeLimit {
            from: range.from,
            to: range.to,
            message: err.message,
        }
    } else {
        LogQueryError::Rpc {
            code: err.code,
            message: err.message,
        }
    }
}

fn decode_log(raw: RawLog) -> Result<ProvenanceEvent, LogQueryError> {
    if raw.topics.len() < 3 {
        return Err(LogQueryError::Decode(format!(
            "expected 3 topics, got {}",
            raw.topics.len()
        )));
    }
    let campaign = CampaignId::new(u64_from_topic(&raw.topics[1])?);
    let owner = address_from_topic(&raw.topics[2])?;
    let block_ordinal = u64_from_quantity(&raw.block_number)?;
    let tx_reference = TxHash::new(&raw.transaction_hash)
        .map_err(|e| LogQueryError::Decode(format!("bad transaction hash: {e}")))?;
    let message = decode_abi_string(&raw.data)?;
    Ok(ProvenanceEvent {
        owner,
        campaign,
        tx_reference,
        block_ordinal,
        message,
    })
}

fn hex_to_bytes(hex: &str) -> Result<Vec<u8>, LogQueryError> {
    if !hex.is_ascii() {
        return Err(LogQueryError::Decode("non-ASCII hex input".into()));
    }
    if hex.len() % 2 != 0 {
        return Err(LogQueryError::Decode(format!(
            "odd-length hex string ({} chars)",
            hex.len()
        )));
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| LogQueryError::Decode(format!("non-hex pair {:?}", &hex[i..i + 2])))
        })
        .collect()
}

/// Parse a 32-byte topic word into a u64, rejecting values that overflow.
fn u64_from_topic(topic: &str) -> Result<u64, LogQueryError> {
    let bytes = hex_to_bytes(topic.strip_prefix("0x").unwrap_or(topic))?;
    if bytes.len() != 32 {
        return Err(LogQueryError::Decode(format!(
            "topic is {} bytes, expected 32",
            bytes.len()
        )));
    }
    if bytes[..24].iter().any(|b| *b != 0) {
        return Err(LogQueryError::Decode("topic value exceeds u64".into()));
    }
    let mut out = [0u8; 8];
    out.copy_from_slice(&bytes[24..]);
    Ok(u64::from_be_bytes(out))
}

/// Parse an address from a left-padded 32-byte topic word.
fn address_from_topic(topic: &str) -> Result<OwnerAddress, LogQueryError> {
    let bytes = hex_to_bytes(topic.strip_prefix("0x").unwrap_or(topic))?;
    if bytes.len() != 32 {
        return Err(LogQueryError::Decode(format!(
            "topic is {} bytes, expected 32",
            bytes.len()
        )));
    }
    let mut addr = [0u8; 20];
    addr.copy_from_slice(&bytes[12..]);
    Ok(OwnerAddress::from_bytes(addr))
}

/// Parse a `0x`-prefixed quantity (block number) into a u64.
fn u64_from_quantity(quantity: &str) -> Result<u64, LogQueryError> {
    let hex = quantity.strip_prefix("0x").unwrap_or(quantity);
    u64::from_str_radix(hex, 16)
        .map_err(|_| LogQueryError::Decode(format!("bad quantity {quantity:?}")))
}

/// Left-pad an address to a 32-byte topic word.
fn pad_address_topic(owner: &OwnerAddress) -> String {
    let mut s = String::with_capacity(66);
    s.push_str("0x");
    s.push_str(&"00".repeat(12));
    for b in owner.as_bytes() {
        s.push_str(&format!("{b:02x}"));
    }
    s
}

/// Decode the ABI encoding of a single dynamic `string` from log data.
fn decode_abi_string(data: &str) -> Result<String, LogQueryError> {
    let hex = data.strip_prefix("0x").unwrap_or(data);
    if hex.is_empty() {
        return Ok(String::new());
    }
    let bytes = hex_to_bytes(hex)?;
    if bytes.len() < 64 {
        return Err(LogQueryError::Decode(format!(
            "ABI data too short: {} bytes",
            bytes.len()
        )));
    }
    let offset = abi_word_to_usize(&bytes[0..32])?;
    if bytes.len() < offset + 32 {
        return Err(LogQueryError::Decode("ABI offset out of bounds".into()));
    }
    let len = abi_word_to_usize(&bytes[offset..offset + 32])?;
    let start = offset + 32;
    if bytes.len() < start + len {
        return Err(LogQueryError::Decode("ABI string length out of bounds".into()));
    }
    String::from_utf8(bytes[start..start + len].to_vec())
        .map_err(|e| LogQueryError::Decode(format!("message is not UTF-8: {e}")))
}

fn abi_word_to_usize(word: &[u8]) -> Result<usize, LogQueryError> {
    if word[..24].iter().any(|b| *b != 0) {
        return Err(LogQueryError::Decode("ABI word exceeds usize".into()));
    }
    let mut out = [0u8; 8];
    out.copy_from_slice(&word[24..]);
    Ok(u64::from_be_bytes(out) as usize)
}
