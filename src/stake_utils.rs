// src/stake_utils.rs
//! Derived state for the staking card.
//!
//! Everything here is a pure function over already-fetched chain reads:
//! the card fetches, these decide what the controls show and whether a
//! submission is allowed. Amounts are u128 base units throughout; a
//! `None` amount is a failed parse of the input text.

use crate::staking::types::OfferedAction;

/// Label for the lock-status row.
///
/// "Unlocked" if and only if the countdown reached zero. While locked,
/// the two largest non-zero units of days/hours/minutes are shown; a
/// sub-minute remainder reads "1m" so seconds never appear.
pub fn remaining_lock_label(seconds_remaining: u64, is_loading: bool) -> String {
    if is_loading {
        return "Loading...".to_string();
    }
    if seconds_remaining == 0 {
        return "Unlocked".to_string();
    }

    let days = seconds_remaining / 86_400;
    let hours = (seconds_remaining % 86_400) / 3_600;
    let minutes = (seconds_remaining % 3_600) / 60;

    let units = [(days, "d"), (hours, "h"), (minutes, "m")];
    let parts: Vec<String> = units
        .iter()
        .filter(|(value, _)| *value > 0)
        .take(2)
        .map(|(value, suffix)| format!("{}{}", value, suffix))
        .collect();

    if parts.is_empty() {
        "1m".to_string()
    } else {
        parts.join(" ")
    }
}

/// Ceiling for the stake input's Max button: the full wallet balance
pub fn max_stake_input(wallet_balance: u128) -> u128 {
    wallet_balance
}

/// Ceiling for the unstake input's Max button.
///
/// The vault's staked mapping is the authoritative principal; the DVOTE
/// balance only stands in while that read has not resolved.
pub fn max_unstake_input(staked_amount: Option<u128>, voting_balance: u128) -> u128 {
    staked_amount.unwrap_or(voting_balance)
}

/// Which single action the stake tab offers.
///
/// Sufficient allowance offers Stake, anything less offers Approve; an
/// unresolved allowance read counts as zero so the two are never shown
/// together.
pub fn offered_action(allowance: Option<u128>, requested_amount: u128) -> OfferedAction {
    if allowance.unwrap_or(0) >= requested_amount {
        OfferedAction::Stake
    } else {
        OfferedAction::Approve
    }
}

/// Whether a stake submission is allowed. Never clamps: an over-balance
/// amount disables the control rather than staking less.
pub fn validate_stake_request(amount: Option<u128>, wallet_balance: u128) -> bool {
    matches!(amount, Some(a) if a > 0 && a <= wallet_balance)
}

/// Whether an unstake submission is allowed
pub fn validate_unstake_request(amount: Option<u128>, available: u128, is_locked: bool) -> bool {
    !is_locked && matches!(amount, Some(a) if a > 0 && a <= available)
}

/// Unstake button text. The lock message overrides the amount-based
/// label whenever the countdown is still running.
pub fn unstake_button_label(is_locked: bool) -> &'static str {
    if is_locked {
        "Tokens Locked"
    } else {
        "Unstake DGOLD"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::{parse_base_units, BASE_UNITS_PER_TOKEN};

    #[test]
    fn test_lock_label_loading_placeholder() {
        assert_eq!(remaining_lock_label(0, true), "Loading...");
        assert_eq!(remaining_lock_label(90_000, true), "Loading...");
    }

    #[test]
    fn test_lock_label_unlocked_iff_zero() {
        assert_eq!(remaining_lock_label(0, false), "Unlocked");
        assert_ne!(remaining_lock_label(1, false), "Unlocked");
        assert_ne!(remaining_lock_label(59, false), "Unlocked");
    }

    #[test]
    fn test_lock_label_two_largest_units() {
        assert_eq!(remaining_lock_label(90_000, false), "1d 1h");
        assert_eq!(remaining_lock_label(2 * 86_400 + 3 * 3_600, false), "2d 3h");
        assert_eq!(remaining_lock_label(5 * 3_600 + 12 * 60, false), "5h 12m");
        assert_eq!(remaining_lock_label(40 * 60, false), "40m");
        // zero middle unit drops out
        assert_eq!(remaining_lock_label(2 * 86_400, false), "2d");
        assert_eq!(remaining_lock_label(2 * 86_400 + 40 * 60, false), "2d 40m");
        // no seconds precision
        assert_eq!(remaining_lock_label(45, false), "1m");
        assert_eq!(remaining_lock_label(61, false), "1m");
    }

    #[test]
    fn test_max_stake_is_wallet_balance() {
        assert_eq!(max_stake_input(0), 0);
        assert_eq!(max_stake_input(5 * BASE_UNITS_PER_TOKEN), 5 * BASE_UNITS_PER_TOKEN);
    }

    #[test]
    fn test_max_unstake_prefers_staked_amount() {
        assert_eq!(max_unstake_input(Some(7), 100), 7);
        assert_eq!(max_unstake_input(Some(0), 100), 0);
        assert_eq!(max_unstake_input(None, 100), 100);
    }

    #[test]
    fn test_offered_action_exclusive() {
        let amount = 3 * BASE_UNITS_PER_TOKEN;
        assert_eq!(offered_action(Some(0), amount), OfferedAction::Approve);
        assert_eq!(offered_action(Some(amount - 1), amount), OfferedAction::Approve);
        assert_eq!(offered_action(Some(amount), amount), OfferedAction::Stake);
        assert_eq!(offered_action(Some(amount + 1), amount), OfferedAction::Stake);
        // unresolved read behaves like zero allowance
        assert_eq!(offered_action(None, amount), OfferedAction::Approve);
        assert_eq!(offered_action(None, 0), OfferedAction::Stake);
    }

    #[test]
    fn test_approve_then_stake_scenario() {
        // allowance 0, input "3" -> Approve; after approving 3 tokens the
        // same input offers Stake
        let requested = parse_base_units("3").unwrap();
        assert_eq!(offered_action(Some(0), requested), OfferedAction::Approve);
        assert_eq!(
            offered_action(Some(3 * BASE_UNITS_PER_TOKEN), requested),
            OfferedAction::Stake
        );
    }

    #[test]
    fn test_validate_stake_bounds() {
        let balance = 5 * BASE_UNITS_PER_TOKEN;
        assert!(validate_stake_request(parse_base_units("5"), balance));
        assert!(validate_stake_request(Some(1), balance));
        assert!(!validate_stake_request(Some(0), balance));
        assert!(!validate_stake_request(Some(balance + 1), balance));
        assert!(!validate_stake_request(None, balance));
        assert!(!validate_stake_request(parse_base_units("not a number"), balance));
    }

    #[test]
    fn test_validate_unstake_lock_precedence() {
        let available = 2 * BASE_UNITS_PER_TOKEN;
        assert!(validate_unstake_request(Some(available), available, false));
        assert!(!validate_unstake_request(Some(available), available, true));
        assert!(!validate_unstake_request(Some(0), available, false));
        assert!(!validate_unstake_request(Some(available + 1), available, false));
        assert!(!validate_unstake_request(None, available, false));
    }

    #[test]
    fn test_unstake_label() {
        assert_eq!(unstake_button_label(true), "Tokens Locked");
        assert_eq!(unstake_button_label(false), "Unstake DGOLD");
    }

    #[test]
    fn test_wallet_balance_scenario() {
        // wallet balance 5 * 10^18, input "5"
        let balance = 5 * BASE_UNITS_PER_TOKEN;
        let input = parse_base_units("5");
        assert!(validate_stake_request(input, balance));
        assert_eq!(max_stake_input(balance), balance);
    }
}
