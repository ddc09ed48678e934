use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::errors::RpcClientError;

/// Minimal Solana JSON-RPC client for `getBlock`.
#[derive(Debug, Clone)]
pub struct SolanaRpcClient {
    /// The JSON-RPC endpoint.
    pub rpc_url: Url,
    /// The inner reqwest client.
    pub inner: Client,
    timeout: Duration,
}

impl SolanaRpcClient {
    pub fn new(rpc_url: Url, timeout: Duration) -> Self {
        Self {
            rpc_url,
            inner: Client::new(),
            timeout,
        }
    }

    /// Request body for a full `getBlock` with JSON-encoded transactions and no rewards.
    pub fn get_block_request(slot: u64) -> Value {
        json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "getBlock",
            "params": [
                slot,
                {
                    "encoding": "json",
                    "transactionDetails": "full",
                    "maxSupportedTransactionVersion": 0,
                    "rewards": false
                }
            ]
        })
    }

    /// Fetch the raw JSON-RPC response for a slot.
    ///
    /// The envelope is returned untouched; a skipped slot comes back with an
    /// `error` member and no `result`.
    pub async fn get_block(&self, slot: u64) -> Result<Value, RpcClientError> {
        debug!("🌐 Fetching block {} from {}", slot, self.rpc_url);

        let res = self
            .inner
            .post(self.rpc_url.clone())
            .json(&Self::get_block_request(slot))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|source| RpcClientError::Transport { slot, source })?;

        if !res.status().is_success() {
            return Err(RpcClientError::Status {
                slot,
                status: res.status(),
            });
        }

        res.json::<Value>()
            .await
            .map_err(|source| RpcClientError::Decode { slot, source })
    }
}
