// src/wallet.rs
//! Wallet session plumbing.
//!
//! The app never holds keys. A connected session is an account address
//! plus the JSON-RPC endpoint of the wallet provider that owns it; write
//! calls go out as eth_sendTransaction and the provider prompts the user
//! to sign. Reads never touch the provider.

use crate::abi;
use crate::rpc::EvmRpc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// A connected wallet session. Absence of one disables every action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WalletInfo {
    pub address: String,
    pub provider_url: String,
}

impl WalletInfo {
    pub fn new(address: &str, provider_url: &str) -> Result<Self, String> {
        let parsed = abi::parse_address(address)?;
        if provider_url.trim().is_empty() {
            return Err("Wallet provider URL is required".to_string());
        }
        Ok(Self {
            address: abi::format_address(&parsed),
            provider_url: provider_url.trim().to_string(),
        })
    }

    /// Shortened address for the navbar button
    pub fn short_address(&self) -> String {
        if self.address.len() <= 12 {
            return self.address.clone();
        }
        format!(
            "{}…{}",
            &self.address[..6],
            &self.address[self.address.len() - 4..]
        )
    }
}

/// Trait for submitting write calls through whatever holds the keys.
/// Keeps the contract client independent of how the session signs.
#[async_trait]
pub trait TransactionSender: Send + Sync {
    /// The account the transaction is sent from
    fn address(&self) -> &str;

    /// Submit a contract call; resolves with the tx hash once the wallet
    /// has confirmed and broadcast it
    async fn send_transaction(&self, to: &str, data: &str) -> Result<String, String>;
}

/// Sender backed by the wallet provider's own JSON-RPC endpoint
pub struct ProviderWallet {
    address: String,
    provider: EvmRpc,
}

impl ProviderWallet {
    pub fn from_wallet_info(info: &WalletInfo) -> Self {
        Self {
            address: info.address.clone(),
            provider: EvmRpc::new(&info.provider_url),
        }
    }
}

#[async_trait]
impl TransactionSender for ProviderWallet {
    fn address(&self) -> &str {
        &self.address
    }

    async fn send_transaction(&self, to: &str, data: &str) -> Result<String, String> {
        let result = self
            .provider
            .request(
                "eth_sendTransaction",
                json!([{ "from": self.address, "to": to, "data": data }]),
            )
            .await?;
        result
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| format!("Unexpected eth_sendTransaction result: {:?}", result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wallet_info_normalizes_address() {
        let info = WalletInfo::new(
            "0x082C329Ae8637bc89FD480B3d87484b5db441d6d",
            "http://localhost:8545",
        )
        .unwrap();
        assert_eq!(info.address, "0x082c329ae8637bc89fd480b3d87484b5db441d6d");
    }

    #[test]
    fn test_wallet_info_rejects_bad_input() {
        assert!(WalletInfo::new("0x1234", "http://localhost:8545").is_err());
        assert!(WalletInfo::new("0x082c329ae8637bc89fd480b3d87484b5db441d6d", "  ").is_err());
    }

    #[test]
    fn test_short_address() {
        let info = WalletInfo::new(
            "0x082c329ae8637bc89fd480b3d87484b5db441d6d",
            "http://localhost:8545",
        )
        .unwrap();
        assert_eq!(info.short_address(), "0x082c…1d6d");
    }
}
