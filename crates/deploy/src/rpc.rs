//! JSON-RPC chain client for EVM endpoints.

use std::time::Duration;

use alloy_core::primitives::{Address, Bytes};
use anyhow::Context;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::{ChainClient, DeployError};

/// Default timeout for RPC requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Create an HTTP client configured for JSON-RPC requests.
pub fn create_client(timeout: Duration) -> Result<reqwest::Client, anyhow::Error> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .context("Failed to create HTTP client")
}

/// [`ChainClient`] backed by an Ethereum JSON-RPC endpoint.
#[derive(Debug, Clone)]
pub struct RpcChainClient {
    client: reqwest::Client,
    url: Url,
}

impl RpcChainClient {
    pub fn new(url: Url, timeout: Duration) -> Result<Self, anyhow::Error> {
        Ok(Self {
            client: create_client(timeout)?,
            url,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Make a JSON-RPC call and deserialize the result.
    ///
    /// Transport failures map to [`DeployError::Transient`], node error
    /// responses are classified by their message.
    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<T, DeployError> {
        let response = self
            .client
            .post(self.url.clone())
            .json(&serde_json::json!({
                "jsonrpc": "2.0",
                "method": method,
                "params": params,
                "id": 1
            }))
            .send()
            .await?;

        let body: Value = response.json().await?;

        tracing::trace!(method, response = %body, "RPC response");

        parse_response(method, body)
    }
}

/// Extract the `result` of a JSON-RPC response body.
fn parse_response<T: DeserializeOwned>(method: &str, body: Value) -> Result<T, DeployError> {
    if let Some(error) = body.get("error") {
        let message = error
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("unknown RPC error");
        return Err(DeployError::from_rpc_message(message));
    }

    let result = body
        .get("result")
        .cloned()
        .ok_or_else(|| DeployError::unknown(format!("No result in {} response", method)))?;

    serde_json::from_value(result).map_err(|e| {
        DeployError::unknown(format!("Failed to deserialize {} result: {}", method, e))
    })
}

/// Parse a `0x`-prefixed hex quantity.
fn parse_quantity(method: &str, raw: &str) -> Result<u128, DeployError> {
    u128::from_str_radix(raw.trim_start_matches("0x"), 16).map_err(|e| {
        DeployError::unknown(format!("Invalid quantity '{}' in {} result: {}", raw, method, e))
    })
}

impl ChainClient for RpcChainClient {
    async fn nonce(&self, address: Address) -> Result<u64, DeployError> {
        let raw: String = self
            .call(
                "eth_getTransactionCount",
                vec![serde_json::json!(address), serde_json::json!("pending")],
            )
            .await?;

        let nonce = parse_quantity("eth_getTransactionCount", &raw)?;
        u64::try_from(nonce).map_err(|_| DeployError::unknown(format!("Nonce out of range: {}", raw)))
    }

    async fn gas_price(&self) -> Result<u128, DeployError> {
        let raw: String = self.call("eth_gasPrice", vec![]).await?;
        parse_quantity("eth_gasPrice", &raw)
    }

    async fn broadcast(&self, signed_tx: Bytes) -> Result<String, DeployError> {
        self.call("eth_sendRawTransaction", vec![serde_json::json!(signed_tx)])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_parse_response_result() {
        let body = serde_json::json!({"jsonrpc": "2.0", "id": 1, "result": "0x2a"});
        let raw: String = parse_response("eth_gasPrice", body).unwrap();
        assert_eq!(parse_quantity("eth_gasPrice", &raw).unwrap(), 42);
    }

    #[test]
    fn test_parse_response_classifies_errors() {
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": {"code": -32000, "message": "insufficient funds for gas * price + value"}
        });
        let err = parse_response::<String>("eth_sendRawTransaction", body).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Permanent);
        assert_eq!(err.to_string(), "insufficient funds for gas * price + value");

        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": {"code": -32000, "message": "replacement transaction underpriced"}
        });
        let err = parse_response::<String>("eth_sendRawTransaction", body).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transient);
    }

    #[test]
    fn test_parse_response_missing_result() {
        let body = serde_json::json!({"jsonrpc": "2.0", "id": 1});
        let err = parse_response::<String>("eth_gasPrice", body).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unknown);
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("m", "0x0").unwrap(), 0);
        assert_eq!(parse_quantity("m", "0x3b9aca00").unwrap(), 1_000_000_000);
        assert!(parse_quantity("m", "0xzz").is_err());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transient() {
        let url = Url::parse("http://127.0.0.1:9").unwrap();
        let client = RpcChainClient::new(url, Duration::from_secs(2)).unwrap();

        let err = client.gas_price().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transient);
    }
}
