//! # Integration Tests for the HTTP Adapters
//!
//! Tests `HttpGateway` and `JsonRpcLogProvider` against wiremock servers
//! to verify request construction, response parsing, and error
//! classification without live infrastructure.

use petio_client::{
    EventLocator, Gateway, GatewayConfig, GatewayError, HttpGateway, JsonRpcLogProvider,
    LogFilter, LogProviderConfig, LogQuery, LogQueryError, LogRange, ScanOutcome, ScanStrategy,
};
use petio_core::{CampaignId, OwnerAddress};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate, Respond};

const EXTERNAL_ID: &str = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaA";

fn contract() -> OwnerAddress {
    OwnerAddress::new("0x1f9090aae28b8a3dceadf281b0f12828e676c326").unwrap()
}

fn signer_topic() -> String {
    "0x0000000000000000000000001f9090aae28b8a3dceadf281b0f12828e676c326".into()
}

/// ABI encoding of the string "hello": offset, length, padded bytes.
fn abi_hello() -> String {
    format!(
        "0x{:064x}{:064x}68656c6c6f{}",
        0x20,
        5,
        "0".repeat(54)
    )
}

fn log_entry(block: u64) -> serde_json::Value {
    json!({
        "address": contract().to_string(),
        "topics": [
            "0x0000000000000000000000000000000000000000000000000000000000000000",
            format!("0x{:064x}", 1),
            signer_topic(),
        ],
        "data": abi_hello(),
        "blockNumber": format!("0x{block:x}"),
        "transactionHash": format!("0x{}", "cd".repeat(32)),
    })
}

// ── Gateway ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn gateway_fetch_returns_body_bytes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/{EXTERNAL_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"signature bytes".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = HttpGateway::new(GatewayConfig::new(server.uri())).unwrap();
    let bytes = gateway.fetch(EXTERNAL_ID).await.unwrap();
    assert_eq!(bytes, b"signature bytes");
}

#[tokio::test]
async fn gateway_not_found_is_a_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let gateway = HttpGateway::new(GatewayConfig::new(server.uri())).unwrap();
    let err = gateway.fetch(EXTERNAL_ID).await.unwrap_err();
    assert!(matches!(err, GatewayError::Status { status: 404, .. }));
}

#[tokio::test]
async fn gateway_server_error_is_a_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let gateway = HttpGateway::new(GatewayConfig::new(server.uri())).unwrap();
    let err = gateway.fetch(EXTERNAL_ID).await.unwrap_err();
    assert!(matches!(err, GatewayError::Status { status: 502, .. }));
}

// ── Log provider ─────────────────────────────────────────────────────────

#[tokio::test]
async fn provider_decodes_matching_logs() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"method": "eth_getLogs"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": [log_entry(1005)],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider =
        JsonRpcLogProvider::new(LogProviderConfig::new(server.uri(), contract())).unwrap();
    let events = provider
        .get_logs(
            &LogFilter::for_campaign(CampaignId::new(1)),
            LogRange::new(1000, 2000),
        )
        .await
        .unwrap();

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].block_ordinal, 1005);
    assert_eq!(events[0].campaign, CampaignId::new(1));
    assert_eq!(events[0].owner, contract());
    assert_eq!(events[0].message, "hello");
}

#[tokio::test]
async fn provider_range_rejection_maps_to_range_limit() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": {"code": -32005, "message": "query returned more than 10000 results"},
        })))
        .mount(&server)
        .await;

    let provider =
        JsonRpcLogProvider::new(LogProviderConfig::new(server.uri(), contract())).unwrap();
    let err = provider
        .get_logs(
            &LogFilter::for_campaign(CampaignId::new(1)),
            LogRange::new(0, 100_000),
        )
        .await
        .unwrap_err();
    assert!(err.is_range_limit());
}

#[tokio::test]
async fn provider_other_rpc_errors_stay_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": {"code": -32601, "message": "method not found"},
        })))
        .mount(&server)
        .await;

    let provider =
        JsonRpcLogProvider::new(LogProviderConfig::new(server.uri(), contract())).unwrap();
    let err = provider
        .get_logs(
            &LogFilter::for_campaign(CampaignId::new(1)),
            LogRange::new(0, 10),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, LogQueryError::Rpc { code: -32601, .. }));
}

// ── Locator against an HTTP provider ─────────────────────────────────────

/// Responder emulating a provider with a 10-block range cap: wide windows
/// get the documented rejection, narrow windows containing block 1005
/// return the event.
struct CappedProvider;

impl Respond for CappedProvider {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
        let params = &body["params"][0];
        let from = u64::from_str_radix(
            params["fromBlock"].as_str().unwrap().trim_start_matches("0x"),
            16,
        )
        .unwrap();
        let to = u64::from_str_radix(
            params["toBlock"].as_str().unwrap().trim_start_matches("0x"),
            16,
        )
        .unwrap();

        if to - from + 1 > 10 {
            return ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "error": {"code": -32005, "message": "block range too wide"},
            }));
        }
        let result = if (from..=to).contains(&1005) {
            json!([log_entry(1005)])
        } else {
            json!([])
        };
        ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": result,
        }))
    }
}

#[tokio::test]
async fn locator_shrinks_against_live_range_caps() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(CappedProvider)
        .mount(&server)
        .await;

    let provider =
        JsonRpcLogProvider::new(LogProviderConfig::new(server.uri(), contract())).unwrap();
    let locator = EventLocator::new(provider, ScanStrategy::newest_first().with_window(3000));
    let outcome = locator
        .locate(
            &LogFilter::for_campaign(CampaignId::new(1)),
            1000,
            2000,
            None,
        )
        .await
        .unwrap();

    match outcome {
        ScanOutcome::Found(ev) => assert_eq!(ev.block_ordinal, 1005),
        ScanOutcome::Exhausted => panic!("expected the event at block 1005"),
    }
}
