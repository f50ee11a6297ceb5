// src/rpc.rs
//! JSON-RPC client for the XRPL EVM endpoint.

use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

/// Receipt fields the widget cares about
#[derive(Debug, Clone, PartialEq)]
pub struct TxReceipt {
    pub transaction_hash: String,
    pub block_number: u64,
    pub succeeded: bool,
}

pub struct EvmRpc {
    client: Client,
    url: String,
}

impl EvmRpc {
    pub fn new(url: &str) -> Self {
        Self {
            client: Client::new(),
            url: url.to_string(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send one JSON-RPC request and extract its result member
    pub async fn request(&self, method: &str, params: Value) -> Result<Value, String> {
        let request = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| format!("Failed to send request: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("RPC error: {}", response.status()));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))?;

        if let Some(error) = json.get("error") {
            return Err(format!("RPC error: {:?}", error));
        }

        json.get("result")
            .cloned()
            .ok_or_else(|| format!("Missing result in response: {:?}", json))
    }

    /// Read-only contract call against the latest block
    pub async fn call(&self, to: &str, data: &str) -> Result<String, String> {
        let result = self
            .request("eth_call", json!([{ "to": to, "data": data }, "latest"]))
            .await?;
        result
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| format!("Unexpected eth_call result: {:?}", result))
    }

    /// Chain id, used as a connectivity check for provider endpoints
    pub async fn chain_id(&self) -> Result<u64, String> {
        let result = self.request("eth_chainId", json!([])).await?;
        let text = result
            .as_str()
            .ok_or_else(|| format!("Unexpected eth_chainId result: {:?}", result))?;
        parse_hex_u64(text)
    }

    pub async fn transaction_receipt(&self, hash: &str) -> Result<Option<TxReceipt>, String> {
        let result = self
            .request("eth_getTransactionReceipt", json!([hash]))
            .await?;
        if result.is_null() {
            return Ok(None);
        }
        parse_receipt(&result).map(Some)
    }

    /// Poll until the transaction lands or the attempt limit runs out.
    ///
    /// XRPL EVM blocks arrive every few seconds; 2 s polling over 90
    /// attempts gives the network three minutes before giving up.
    pub async fn wait_for_receipt(&self, hash: &str) -> Result<TxReceipt, String> {
        const ATTEMPTS: u32 = 90;
        for _ in 0..ATTEMPTS {
            if let Some(receipt) = self.transaction_receipt(hash).await? {
                return Ok(receipt);
            }
            tokio::time::sleep(Duration::from_secs(2)).await;
        }
        Err(format!("Transaction {} not confirmed in time", hash))
    }
}

fn parse_hex_u64(text: &str) -> Result<u64, String> {
    let stripped = text.strip_prefix("0x").unwrap_or(text);
    u64::from_str_radix(stripped, 16).map_err(|e| format!("Invalid hex quantity {}: {}", text, e))
}

fn parse_receipt(value: &Value) -> Result<TxReceipt, String> {
    let transaction_hash = value["transactionHash"]
        .as_str()
        .ok_or_else(|| format!("Receipt missing transactionHash: {:?}", value))?
        .to_string();
    let block_number = parse_hex_u64(
        value["blockNumber"]
            .as_str()
            .ok_or_else(|| format!("Receipt missing blockNumber: {:?}", value))?,
    )?;
    let status = value["status"]
        .as_str()
        .ok_or_else(|| format!("Receipt missing status: {:?}", value))?;
    Ok(TxReceipt {
        transaction_hash,
        block_number,
        succeeded: status == "0x1",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_hex_u64() {
        assert_eq!(parse_hex_u64("0x15f900").unwrap(), 1_440_000);
        assert_eq!(parse_hex_u64("0x0").unwrap(), 0);
        assert!(parse_hex_u64("0xzz").is_err());
    }

    #[test]
    fn test_parse_receipt_success() {
        let value = json!({
            "transactionHash": "0xabc123",
            "blockNumber": "0x7a120",
            "status": "0x1",
            "gasUsed": "0xb411"
        });
        let receipt = parse_receipt(&value).unwrap();
        assert_eq!(receipt.transaction_hash, "0xabc123");
        assert_eq!(receipt.block_number, 500_000);
        assert!(receipt.succeeded);
    }

    #[test]
    fn test_parse_receipt_revert() {
        let value = json!({
            "transactionHash": "0xdef",
            "blockNumber": "0x1",
            "status": "0x0"
        });
        assert!(!parse_receipt(&value).unwrap().succeeded);
    }

    #[test]
    fn test_parse_receipt_missing_fields() {
        assert!(parse_receipt(&json!({})).is_err());
    }
}
