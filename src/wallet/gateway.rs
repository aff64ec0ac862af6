//! JSON-RPC gateway to the blockchain node.
//!
//! # Responsibilities
//! - Issue exactly three remote calls: balance query, latest-blockhash
//!   query, transaction submission
//! - Classify failures: transport vs. node-reported vs. malformed shape
//! - Nothing else: no retries, no caching, no state between calls
//!
//! The gateway is a trait so the facade takes a constructor-injected
//! implementation and tests can substitute a double.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::{json, Value};
use std::time::Duration;
use url::Url;

use crate::wallet::types::{Blockhash, Pubkey, WalletError, WalletResult};

/// Narrow interface over the remote node.
#[allow(async_fn_in_trait)]
pub trait RpcGateway: Send + Sync {
    /// Balance of an address, in lamports.
    async fn fetch_balance(&self, address: &Pubkey) -> WalletResult<u64>;

    /// Recent blockhash used as the replay-protection freshness token.
    async fn latest_blockhash(&self) -> WalletResult<Blockhash>;

    /// Submit a signed, serialized transaction; returns its signature.
    async fn send_transaction(&self, payload: &[u8]) -> WalletResult<String>;
}

/// HTTP JSON-RPC implementation of [`RpcGateway`].
#[derive(Clone)]
pub struct HttpRpcGateway {
    http: reqwest::Client,
    endpoint: Url,
}

impl HttpRpcGateway {
    /// Create a gateway against a node endpoint with a per-request timeout.
    pub fn new(endpoint: Url, timeout: Duration) -> WalletResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WalletError::RpcUnavailable(format!("HTTP client init: {}", e)))?;

        Ok(Self { http, endpoint })
    }

    /// POST one JSON-RPC request and return the raw response envelope.
    async fn request(&self, method: &str, params: Value) -> WalletResult<Value> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| WalletError::RpcUnavailable(format!("{}: {}", method, e)))?;

        response
            .json::<Value>()
            .await
            .map_err(|e| WalletError::RpcMalformedResponse(format!("{}: {}", method, e)))
    }
}

impl RpcGateway for HttpRpcGateway {
    async fn fetch_balance(&self, address: &Pubkey) -> WalletResult<u64> {
        let body = self
            .request("getBalance", json!([address.to_string()]))
            .await?;
        parse_balance_response(&body)
    }

    async fn latest_blockhash(&self) -> WalletResult<Blockhash> {
        let body = self.request("getLatestBlockhash", json!([])).await?;
        parse_blockhash_response(&body)
    }

    async fn send_transaction(&self, payload: &[u8]) -> WalletResult<String> {
        let encoded = BASE64.encode(payload);
        let body = self
            .request(
                "sendTransaction",
                json!([encoded, { "encoding": "base64", "skipPreflight": true }]),
            )
            .await?;
        parse_send_response(&body)
    }
}

impl std::fmt::Debug for HttpRpcGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRpcGateway")
            .field("endpoint", &self.endpoint.as_str())
            .finish()
    }
}

/// Node-reported error, if the envelope carries one.
fn node_error(body: &Value) -> Option<(i64, String)> {
    let error = body.get("error")?;
    let code = error.get("code").and_then(Value::as_i64).unwrap_or(0);
    let message = error
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("unknown error")
        .to_string();
    Some((code, message))
}

fn parse_balance_response(body: &Value) -> WalletResult<u64> {
    if let Some((code, message)) = node_error(body) {
        // Domain convention: an address with no on-chain account has a
        // zero balance, not an error.
        if message.to_ascii_lowercase().contains("could not find account") {
            tracing::debug!(code, "Account not found, reporting zero balance");
            return Ok(0);
        }
        return Err(WalletError::RpcError { code, message });
    }

    body.pointer("/result/value")
        .and_then(Value::as_u64)
        .ok_or_else(|| {
            WalletError::RpcMalformedResponse("getBalance: missing result.value".to_string())
        })
}

fn parse_blockhash_response(body: &Value) -> WalletResult<Blockhash> {
    if let Some((code, message)) = node_error(body) {
        return Err(WalletError::RpcError { code, message });
    }

    body.pointer("/result/value/blockhash")
        .and_then(Value::as_str)
        .and_then(Blockhash::from_base58)
        .ok_or_else(|| {
            WalletError::RpcMalformedResponse(
                "getLatestBlockhash: missing or undecodable blockhash".to_string(),
            )
        })
}

fn parse_send_response(body: &Value) -> WalletResult<String> {
    if let Some((code, message)) = node_error(body) {
        return Err(WalletError::RpcRejected(format!("{} (code {})", message, code)));
    }

    body.get("result")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            WalletError::RpcMalformedResponse(
                "sendTransaction: missing result signature".to_string(),
            )
        })
}
