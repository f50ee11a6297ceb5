// src/staking/mod.rs
//! Client and types for the DGOLD staking vault

pub mod client;
pub mod types;

pub use client::StakingClient;
pub use types::{OfferedAction, PendingAction, StakePosition, TxOutcome};
