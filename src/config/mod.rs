use serde::{Deserialize, Serialize};

/// XRPL EVM mainnet defaults for the DGOLD deployment
pub const DEFAULT_RPC_URL: &str = "https://rpc.xrplevm.org";
pub const DEFAULT_CHAIN_ID: u64 = 1_440_000;
pub const DEFAULT_EXPLORER_URL: &str = "https://explorer.xrplevm.org";
pub const DGOLD_TOKEN: &str = "0x082C329Ae8637bc89FD480B3d87484b5db441d6d";
pub const DVOTE_TOKEN: &str = "0xb7A4e5D8C2f91a3846BD20E6F13C57b9a0e4D21C";
pub const STAKING_VAULT: &str = "0x8cb1174ed0bDFF74cd99CcBD690eEaa7288993cB";

/// Chain and contract configuration, passed explicitly into the views
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChainConfig {
    /// Read endpoint for balance/allowance/lock queries
    pub rpc_url: String,
    pub chain_id: u64,
    pub explorer_url: String,
    /// Stakeable ERC-20
    pub token: String,
    /// Voting ERC-20 minted against staked principal
    pub voting_token: String,
    /// Vault contract holding deposits and lock state
    pub vault: String,
    /// Seconds between lock-countdown refreshes
    pub lock_poll_secs: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            chain_id: DEFAULT_CHAIN_ID,
            explorer_url: DEFAULT_EXPLORER_URL.to_string(),
            token: DGOLD_TOKEN.to_string(),
            voting_token: DVOTE_TOKEN.to_string(),
            vault: STAKING_VAULT.to_string(),
            lock_poll_secs: 10,
        }
    }
}

impl ChainConfig {
    /// Load configuration, letting environment variables override the
    /// mainnet defaults (useful against testnet or a local fork)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            rpc_url: std::env::var("CHAIN_RPC_URL").unwrap_or(defaults.rpc_url),
            chain_id: std::env::var("CHAIN_ID")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.chain_id),
            explorer_url: std::env::var("CHAIN_EXPLORER_URL").unwrap_or(defaults.explorer_url),
            token: std::env::var("DGOLD_TOKEN_ADDRESS").unwrap_or(defaults.token),
            voting_token: std::env::var("DVOTE_TOKEN_ADDRESS").unwrap_or(defaults.voting_token),
            vault: std::env::var("STAKING_VAULT_ADDRESS").unwrap_or(defaults.vault),
            lock_poll_secs: std::env::var("LOCK_POLL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.lock_poll_secs),
        }
    }

    /// Explorer link for a transaction hash
    pub fn tx_url(&self, hash: &str) -> String {
        format!("{}/tx/{}", self.explorer_url.trim_end_matches('/'), hash)
    }
}
