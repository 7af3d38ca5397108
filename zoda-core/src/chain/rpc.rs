// ========================================================
// File: zoda-core/src/chain/rpc.rs
// ========================================================

use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::{json, Value};
use tracing::debug;
use zoda_common::Error;

use super::abi::decode_uint;

/// Minimal JSON-RPC 2.0 client covering the handful of `eth_` methods the
/// mint flow needs.
pub struct JsonRpcClient {
    url: String,
    client: reqwest::Client,
    next_id: AtomicU64,
}

impl JsonRpcClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Sends one request and unwraps the JSON-RPC envelope.
    pub async fn call(&self, method: &str, params: Value) -> Result<Value, Error> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let payload = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });
        debug!("rpc -> {} (id {})", method, id);
        let response = self.client.post(&self.url).json(&payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Chain(format!(
                "RPC endpoint returned status {}",
                status
            )));
        }
        let body: Value = response.json().await?;
        if let Some(error) = body.get("error") {
            let code = error.get("code").and_then(Value::as_i64).unwrap_or(0);
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error");
            return Err(Error::Chain(format!("RPC error {}: {}", code, message)));
        }
        body.get("result")
            .cloned()
            .ok_or_else(|| Error::Chain("RPC response missing result".to_string()))
    }

    pub async fn chain_id(&self) -> Result<u64, Error> {
        quantity_u64(&self.call("eth_chainId", json!([])).await?)
    }

    /// Next nonce for an account, including transactions still in the
    /// mempool.
    pub async fn transaction_count(&self, address: &str) -> Result<u64, Error> {
        quantity_u64(
            &self
                .call("eth_getTransactionCount", json!([address, "pending"]))
                .await?,
        )
    }

    pub async fn gas_price(&self) -> Result<u128, Error> {
        quantity_u128(&self.call("eth_gasPrice", json!([])).await?)
    }

    /// Read-only contract call against the latest block.
    pub async fn eth_call(&self, to: &str, data: &[u8]) -> Result<String, Error> {
        let result = self
            .call(
                "eth_call",
                json!([{ "to": to, "data": format!("0x{}", hex::encode(data)) }, "latest"]),
            )
            .await?;
        result
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| Error::Chain("eth_call result is not a string".to_string()))
    }

    pub async fn send_raw_transaction(&self, raw: &[u8]) -> Result<String, Error> {
        let result = self
            .call(
                "eth_sendRawTransaction",
                json!([format!("0x{}", hex::encode(raw))]),
            )
            .await?;
        result
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| Error::Chain("transaction hash missing from response".to_string()))
    }

    /// `None` while the transaction is still pending.
    pub async fn transaction_receipt(&self, tx_hash: &str) -> Result<Option<Value>, Error> {
        let result = self
            .call("eth_getTransactionReceipt", json!([tx_hash]))
            .await?;
        if result.is_null() {
            Ok(None)
        } else {
            Ok(Some(result))
        }
    }
}

fn quantity_u64(value: &Value) -> Result<u64, Error> {
    let parsed = quantity_u128(value)?;
    u64::try_from(parsed).map_err(|_| Error::Parse(format!("quantity out of range: {}", parsed)))
}

fn quantity_u128(value: &Value) -> Result<u128, Error> {
    let text = value
        .as_str()
        .ok_or_else(|| Error::Parse(format!("expected a hex quantity, got {}", value)))?;
    decode_uint(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_parsing() {
        assert_eq!(quantity_u64(&json!("0x0")).unwrap(), 0);
        assert_eq!(quantity_u64(&json!("0x14a34")).unwrap(), 84532);
        assert_eq!(quantity_u128(&json!("0x3b9aca00")).unwrap(), 1_000_000_000);
        assert!(quantity_u64(&json!(12)).is_err());
        assert!(quantity_u64(&json!("0xffffffffffffffffff")).is_err());
    }
}
