// src/staking/client.rs
//! Contract-call client for the DGOLD token, DVOTE token, and vault.
//!
//! Reads are plain eth_call queries against the chain RPC. Writes build
//! calldata locally, hand it to the wallet session for signing and
//! broadcast, then poll for the receipt. Amounts cross this boundary as
//! 18-decimal base units only.

use crate::abi;
use crate::config::ChainConfig;
use crate::rpc::EvmRpc;
use crate::staking::types::{StakePosition, TxOutcome};
use crate::wallet::TransactionSender;

pub struct StakingClient {
    rpc: EvmRpc,
    token: String,
    voting_token: String,
    vault: String,
}

impl StakingClient {
    pub fn new(config: &ChainConfig) -> Self {
        Self {
            rpc: EvmRpc::new(&config.rpc_url),
            token: config.token.clone(),
            voting_token: config.voting_token.clone(),
            vault: config.vault.clone(),
        }
    }

    /// DGOLD balance of the wallet
    pub async fn token_balance(&self, owner: &str) -> Result<u128, String> {
        let data = balance_of_calldata(owner)?;
        self.read_uint(&self.token, &data).await
    }

    /// DVOTE balance of the wallet
    pub async fn voting_balance(&self, owner: &str) -> Result<u128, String> {
        let data = balance_of_calldata(owner)?;
        self.read_uint(&self.voting_token, &data).await
    }

    /// How much DGOLD the vault may currently pull from the wallet
    pub async fn allowance(&self, owner: &str) -> Result<u128, String> {
        let data = allowance_calldata(owner, &self.vault)?;
        self.read_uint(&self.token, &data).await
    }

    /// Principal the vault holds for the wallet
    pub async fn staked_amount(&self, owner: &str) -> Result<u128, String> {
        let data = staked_calldata(owner)?;
        self.read_uint(&self.vault, &data).await
    }

    /// Seconds until the wallet's stake unlocks; zero means withdrawable
    pub async fn time_until_unlock(&self, owner: &str) -> Result<u64, String> {
        let data = time_until_unlock_calldata(owner)?;
        let seconds = self.read_uint(&self.vault, &data).await?;
        u64::try_from(seconds).map_err(|_| format!("Unreasonable lock duration: {}", seconds))
    }

    /// Both vault reads together, for callers that want the position
    pub async fn stake_position(&self, owner: &str) -> Result<StakePosition, String> {
        let staked_amount = self.staked_amount(owner).await?;
        let lock_seconds_remaining = self.time_until_unlock(owner).await?;
        Ok(StakePosition { staked_amount, lock_seconds_remaining })
    }

    /// Approve the vault to pull exactly `amount` of DGOLD
    pub async fn approve(
        &self,
        wallet: &dyn TransactionSender,
        amount: u128,
    ) -> Result<TxOutcome, String> {
        let data = approve_calldata(&self.vault, amount)?;
        self.submit(wallet, &self.token, &data, "approve").await
    }

    /// Deposit `amount` of DGOLD into the vault
    pub async fn stake(
        &self,
        wallet: &dyn TransactionSender,
        amount: u128,
    ) -> Result<TxOutcome, String> {
        let data = stake_calldata(amount);
        self.submit(wallet, &self.vault, &data, "stake").await
    }

    /// Withdraw `amount` of principal from the vault
    pub async fn unstake(
        &self,
        wallet: &dyn TransactionSender,
        amount: u128,
    ) -> Result<TxOutcome, String> {
        let data = unstake_calldata(amount);
        self.submit(wallet, &self.vault, &data, "unstake").await
    }

    async fn read_uint(&self, to: &str, data: &str) -> Result<u128, String> {
        let result = self.rpc.call(to, data).await?;
        abi::decode_uint(&result)
    }

    /// Send through the wallet, then wait for inclusion. Both phases
    /// surface as errors with no retry: the wallet refusing (or the user
    /// rejecting), and the receipt coming back reverted.
    async fn submit(
        &self,
        wallet: &dyn TransactionSender,
        to: &str,
        data: &str,
        what: &str,
    ) -> Result<TxOutcome, String> {
        log::info!("Submitting {} from {} to {}", what, wallet.address(), to);
        let hash = wallet
            .send_transaction(to, data)
            .await
            .map_err(|e| format!("Wallet did not confirm {}: {}", what, e))?;

        log::info!("{} broadcast as {}", what, hash);
        let receipt = self.rpc.wait_for_receipt(&hash).await?;
        if !receipt.succeeded {
            log::error!("{} {} reverted in block {}", what, hash, receipt.block_number);
            return Err(format!("Transaction reverted: {}", hash));
        }

        log::info!("{} {} confirmed in block {}", what, hash, receipt.block_number);
        Ok(TxOutcome {
            hash: receipt.transaction_hash,
            block_number: receipt.block_number,
        })
    }
}

fn balance_of_calldata(owner: &str) -> Result<String, String> {
    let owner = abi::parse_address(owner)?;
    Ok(abi::encode_call(
        "balanceOf(address)",
        &[abi::word_from_address(&owner)],
    ))
}

fn allowance_calldata(owner: &str, spender: &str) -> Result<String, String> {
    let owner = abi::parse_address(owner)?;
    let spender = abi::parse_address(spender)?;
    Ok(abi::encode_call(
        "allowance(address,address)",
        &[abi::word_from_address(&owner), abi::word_from_address(&spender)],
    ))
}

fn staked_calldata(owner: &str) -> Result<String, String> {
    let owner = abi::parse_address(owner)?;
    Ok(abi::encode_call(
        "staked(address)",
        &[abi::word_from_address(&owner)],
    ))
}

fn time_until_unlock_calldata(owner: &str) -> Result<String, String> {
    let owner = abi::parse_address(owner)?;
    Ok(abi::encode_call(
        "timeUntilUnlock(address)",
        &[abi::word_from_address(&owner)],
    ))
}

fn approve_calldata(spender: &str, amount: u128) -> Result<String, String> {
    let spender = abi::parse_address(spender)?;
    Ok(abi::encode_call(
        "approve(address,uint256)",
        &[abi::word_from_address(&spender), abi::word_from_uint(amount)],
    ))
}

fn stake_calldata(amount: u128) -> String {
    abi::encode_call("stake(uint256)", &[abi::word_from_uint(amount)])
}

fn unstake_calldata(amount: u128) -> String {
    abi::encode_call("unstake(uint256)", &[abi::word_from_uint(amount)])
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: &str = "0x1111111111111111111111111111111111111111";
    const VAULT: &str = "0x8cb1174ed0bdff74cd99ccbd690eeaa7288993cb";

    #[test]
    fn test_balance_of_calldata() {
        let data = balance_of_calldata(OWNER).unwrap();
        assert_eq!(
            data,
            "0x70a082310000000000000000000000001111111111111111111111111111111111111111"
        );
    }

    #[test]
    fn test_allowance_calldata_argument_order() {
        let data = allowance_calldata(OWNER, VAULT).unwrap();
        assert!(data.starts_with("0xdd62ed3e"));
        // owner word precedes spender word
        assert_eq!(
            &data[10..74],
            "0000000000000000000000001111111111111111111111111111111111111111"
        );
        assert_eq!(
            &data[74..],
            "0000000000000000000000008cb1174ed0bdff74cd99ccbd690eeaa7288993cb"
        );
    }

    #[test]
    fn test_approve_calldata_exact_amount() {
        // approval is for the requested amount, never max-uint
        let data = approve_calldata(VAULT, 3_000_000_000_000_000_000).unwrap();
        assert!(data.starts_with("0x095ea7b3"));
        assert!(data.ends_with("29a2241af62c0000"));
        assert_eq!(data.len(), 2 + 8 + 64 + 64);
    }

    #[test]
    fn test_stake_and_unstake_calldata_differ_only_in_selector() {
        let amount = 5_000_000_000_000_000_000u128;
        let stake = stake_calldata(amount);
        let unstake = unstake_calldata(amount);
        assert_ne!(&stake[..10], &unstake[..10]);
        assert_eq!(&stake[10..], &unstake[10..]);
        assert_eq!(stake.len(), 2 + 8 + 64);
    }

    #[test]
    fn test_calldata_rejects_bad_owner() {
        assert!(balance_of_calldata("not-an-address").is_err());
        assert!(staked_calldata("0x12").is_err());
    }
}
