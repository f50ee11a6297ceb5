// src/staking/types.rs
use serde::{Deserialize, Serialize};

/// On-chain stake state for one account.
///
/// The lock field is a countdown reported by the vault, not a client
/// timestamp; zero seconds remaining means the position is withdrawable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StakePosition {
    pub staked_amount: u128,
    pub lock_seconds_remaining: u64,
}

impl StakePosition {
    pub fn is_locked(&self) -> bool {
        self.lock_seconds_remaining > 0
    }
}

/// The one transaction the widget may have in flight.
///
/// Wallet signing is serial per session, so the card disables the other
/// two controls while any action is pending; settlement (success or
/// failure) always returns to Idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    Idle,
    Approving,
    Staking,
    Unstaking,
}

impl PendingAction {
    pub fn is_idle(&self) -> bool {
        *self == PendingAction::Idle
    }
}

/// Which single action the stake tab offers for the current input.
/// Approve and Stake are never shown together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferedAction {
    Approve,
    Stake,
}

/// A settled write call
#[derive(Debug, Clone, PartialEq)]
pub struct TxOutcome {
    pub hash: String,
    pub block_number: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_lock_state() {
        let locked = StakePosition { staked_amount: 1, lock_seconds_remaining: 90_000 };
        let unlocked = StakePosition { staked_amount: 1, lock_seconds_remaining: 0 };
        assert!(locked.is_locked());
        assert!(!unlocked.is_locked());
    }

    #[test]
    fn test_pending_action_idle() {
        assert!(PendingAction::Idle.is_idle());
        assert!(!PendingAction::Approving.is_idle());
        assert!(!PendingAction::Staking.is_idle());
        assert!(!PendingAction::Unstaking.is_idle());
    }
}
