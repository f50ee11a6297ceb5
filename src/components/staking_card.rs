// src/components/staking_card.rs
use dioxus::prelude::*;
use crate::amount::{display_base_units, format_base_units, parse_base_units};
use crate::config::ChainConfig;
use crate::stake_utils::{
    max_stake_input, max_unstake_input, offered_action, remaining_lock_label,
    unstake_button_label, validate_stake_request, validate_unstake_request,
};
use crate::staking::types::{OfferedAction, PendingAction};
use crate::staking::{StakingClient, TxOutcome};
use crate::wallet::{ProviderWallet, WalletInfo};

#[derive(Clone, PartialEq)]
struct TxSuccess {
    operation: String,
    amount: u128,
    outcome: TxOutcome,
}

#[component]
fn TransactionSuccessModal(
    success: TxSuccess,
    explorer_url: String,
    onclose: EventHandler<()>,
) -> Element {
    let amount_label = format_base_units(success.amount);
    rsx! {
        div {
            class: "modal-backdrop",
            onclick: move |_| onclose.call(()),
            div {
                class: "modal-content",
                onclick: move |e| e.stop_propagation(),
                h2 { class: "modal-title", "{success.operation} Successful!" }
                div { class: "success-message", "{success.operation} confirmed in block {success.outcome.block_number}" }
                div {
                    class: "stake-success-details",
                    div { class: "stake-detail-card",
                        div { class: "stake-detail-label", "Amount:" }
                        div { class: "stake-detail-value", "{amount_label} DGOLD" }
                    }
                    div { class: "stake-detail-card",
                        div { class: "stake-detail-label", "Status:" }
                        div { class: "stake-detail-value", "Confirmed" }
                    }
                }
                div {
                    class: "transaction-details",
                    div { class: "wallet-field",
                        label { "Transaction Hash:" }
                        div { class: "address-display", "{success.outcome.hash}" }
                    }
                    div {
                        class: "explorer-links",
                        a { class: "button-standard ghost", href: "{explorer_url}", target: "_blank", "View on Blockscout" }
                    }
                }
                div { class: "modal-buttons",
                    button { class: "button-standard primary", onclick: move |_| onclose.call(()), "Close" }
                }
            }
        }
    }
}

#[component]
pub fn StakingCard(
    wallet: Signal<Option<WalletInfo>>,
    config: ChainConfig,
    onconnect: EventHandler<()>,
) -> Element {
    let mut active_tab = use_signal(|| "stake".to_string());
    let mut stake_amount_text = use_signal(|| "".to_string());
    let mut unstake_amount_text = use_signal(|| "".to_string());
    let mut pending = use_signal(|| PendingAction::Idle);
    let mut error_message = use_signal(|| None::<String>);
    let mut success = use_signal(|| None::<TxSuccess>);

    // Each read gates only its own UI element, so every fetch gets its
    // own slot and resolves independently.
    let mut token_balance = use_signal(|| None::<u128>);
    let mut voting_balance = use_signal(|| None::<u128>);
    let mut staked_amount = use_signal(|| None::<u128>);
    let mut allowance = use_signal(|| None::<u128>);
    let mut lock_seconds = use_signal(|| None::<u64>);
    let mut refresh_nonce = use_signal(|| 0u32);

    // Fetch balances and allowance when the session changes or after a
    // settled transaction bumps the nonce.
    let config_for_reads = config.clone();
    use_effect(move || {
        let _ = refresh_nonce();
        let Some(info) = wallet() else {
            token_balance.set(None);
            voting_balance.set(None);
            staked_amount.set(None);
            allowance.set(None);
            lock_seconds.set(None);
            return;
        };

        let address = info.address.clone();
        let config = config_for_reads.clone();
        spawn(async move {
            let client = StakingClient::new(&config);
            match client.token_balance(&address).await {
                Ok(balance) => token_balance.set(Some(balance)),
                Err(e) => {
                    log::error!("DGOLD balance fetch failed: {}", e);
                    error_message.set(Some(format!("Failed to fetch DGOLD balance: {}", e)));
                }
            }
        });

        let address = info.address.clone();
        let config = config_for_reads.clone();
        spawn(async move {
            let client = StakingClient::new(&config);
            match client.voting_balance(&address).await {
                Ok(balance) => voting_balance.set(Some(balance)),
                Err(e) => log::error!("DVOTE balance fetch failed: {}", e),
            }
        });

        let address = info.address.clone();
        let config = config_for_reads.clone();
        spawn(async move {
            let client = StakingClient::new(&config);
            match client.allowance(&address).await {
                Ok(value) => allowance.set(Some(value)),
                Err(e) => log::error!("Allowance fetch failed: {}", e),
            }
        });

        let address = info.address.clone();
        let config = config_for_reads.clone();
        spawn(async move {
            let client = StakingClient::new(&config);
            match client.stake_position(&address).await {
                Ok(position) => {
                    staked_amount.set(Some(position.staked_amount));
                    lock_seconds.set(Some(position.lock_seconds_remaining));
                }
                Err(e) => log::error!("Stake position fetch failed: {}", e),
            }
        });
    });

    // Lock countdown poll, tied to the card's lifetime: the task is
    // dropped with the component, which stops the timer.
    let config_for_poll = config.clone();
    use_effect(move || {
        let config = config_for_poll.clone();
        spawn(async move {
            let client = StakingClient::new(&config);
            loop {
                tokio::time::sleep(std::time::Duration::from_secs(config.lock_poll_secs)).await;
                let address = wallet.read().as_ref().map(|w| w.address.clone());
                if let Some(address) = address {
                    match client.stake_position(&address).await {
                        Ok(position) => {
                            staked_amount.set(Some(position.staked_amount));
                            lock_seconds.set(Some(position.lock_seconds_remaining));
                        }
                        Err(e) => log::warn!("Lock status refresh failed: {}", e),
                    }
                }
            }
        });
    });

    let connected = wallet.read().is_some();

    // Stake tab derived state
    let stake_parsed = parse_base_units(&stake_amount_text());
    let stake_valid = validate_stake_request(stake_parsed, token_balance().unwrap_or(0));
    let offered = offered_action(allowance(), stake_parsed.unwrap_or(0));
    let balance_label = match token_balance() {
        Some(balance) => format!("Balance: {} DGOLD", display_base_units(balance)),
        None => "Balance: ...".to_string(),
    };

    // Unstake tab derived state
    let unstake_parsed = parse_base_units(&unstake_amount_text());
    let locked = lock_seconds().map_or(true, |s| s > 0);
    let unstake_ceiling = max_unstake_input(staked_amount(), voting_balance().unwrap_or(0));
    let unstake_valid = validate_unstake_request(unstake_parsed, unstake_ceiling, locked);
    let staked_label = match staked_amount() {
        Some(balance) => format!("Staked: {} DVOTE", display_base_units(balance)),
        None => "Staked: ...".to_string(),
    };
    let lock_label = remaining_lock_label(lock_seconds().unwrap_or(0), lock_seconds().is_none());

    let stake_receive = if stake_amount_text().is_empty() { "0".to_string() } else { stake_amount_text() };
    let unstake_receive = if unstake_amount_text().is_empty() { "0".to_string() } else { unstake_amount_text() };

    if let Some(done) = success() {
        let explorer_url = config.tx_url(&done.outcome.hash);
        return rsx! {
            TransactionSuccessModal {
                success: done,
                explorer_url,
                onclose: move |_| success.set(None),
            }
        };
    }

    let config_for_approve = config.clone();
    let on_approve = move |_| {
        let Some(info) = wallet.read().clone() else { return };
        let Some(amount) = parse_base_units(&stake_amount_text.read()) else {
            error_message.set(Some("Please enter a valid amount".to_string()));
            return;
        };
        pending.set(PendingAction::Approving);
        error_message.set(None);

        let config = config_for_approve.clone();
        spawn(async move {
            let client = StakingClient::new(&config);
            let sender = ProviderWallet::from_wallet_info(&info);
            match client.approve(&sender, amount).await {
                Ok(outcome) => {
                    success.set(Some(TxSuccess { operation: "Approve".to_string(), amount, outcome }));
                    refresh_nonce.set(refresh_nonce() + 1);
                }
                Err(e) => error_message.set(Some(format!("Approve failed: {}", e))),
            }
            pending.set(PendingAction::Idle);
        });
    };

    let config_for_stake = config.clone();
    let on_stake = move |_| {
        let Some(info) = wallet.read().clone() else { return };
        let Some(amount) = parse_base_units(&stake_amount_text.read()) else {
            error_message.set(Some("Please enter a valid amount".to_string()));
            return;
        };
        pending.set(PendingAction::Staking);
        error_message.set(None);

        let config = config_for_stake.clone();
        spawn(async move {
            let client = StakingClient::new(&config);
            let sender = ProviderWallet::from_wallet_info(&info);
            match client.stake(&sender, amount).await {
                Ok(outcome) => {
                    // Cleared on success only; a failure keeps the text
                    // so the user can retry without retyping.
                    stake_amount_text.set("".to_string());
                    success.set(Some(TxSuccess { operation: "Stake".to_string(), amount, outcome }));
                    refresh_nonce.set(refresh_nonce() + 1);
                }
                Err(e) => error_message.set(Some(format!("Stake failed: {}", e))),
            }
            pending.set(PendingAction::Idle);
        });
    };

    let config_for_unstake = config.clone();
    let on_unstake = move |_| {
        let Some(info) = wallet.read().clone() else { return };
        let Some(amount) = parse_base_units(&unstake_amount_text.read()) else {
            error_message.set(Some("Please enter a valid amount".to_string()));
            return;
        };
        pending.set(PendingAction::Unstaking);
        error_message.set(None);

        let config = config_for_unstake.clone();
        spawn(async move {
            let client = StakingClient::new(&config);
            let sender = ProviderWallet::from_wallet_info(&info);
            match client.unstake(&sender, amount).await {
                Ok(outcome) => {
                    unstake_amount_text.set("".to_string());
                    success.set(Some(TxSuccess { operation: "Unstake".to_string(), amount, outcome }));
                    refresh_nonce.set(refresh_nonce() + 1);
                }
                Err(e) => error_message.set(Some(format!("Unstake failed: {}", e))),
            }
            pending.set(PendingAction::Idle);
        });
    };

    rsx! {
        div {
            class: "staking-card",

            div {
                class: "tab-list",
                button {
                    class: if active_tab() == "stake" { "tab-button active" } else { "tab-button" },
                    onclick: move |_| active_tab.set("stake".to_string()),
                    "Stake"
                }
                button {
                    class: if active_tab() == "unstake" { "tab-button active" } else { "tab-button" },
                    onclick: move |_| active_tab.set("unstake".to_string()),
                    "Unstake"
                }
            }

            if let Some(error) = error_message() {
                div { class: "error-message", "{error}" }
            }

            if active_tab() == "stake" {
                div {
                    class: "tab-panel",
                    div {
                        class: "amount-row",
                        label { class: "field-label", "Amount" }
                        span { class: "field-hint", "{balance_label}" }
                    }
                    div {
                        class: "input-row",
                        input {
                            class: "amount-input",
                            r#type: "text",
                            placeholder: "0.0",
                            value: "{stake_amount_text}",
                            oninput: move |evt| {
                                stake_amount_text.set(evt.value());
                                error_message.set(None);
                            }
                        }
                        button {
                            class: "button-standard secondary",
                            onclick: move |_| {
                                let ceiling = max_stake_input(token_balance().unwrap_or(0));
                                stake_amount_text.set(format_base_units(ceiling));
                            },
                            "Max"
                        }
                    }

                    div {
                        class: "detail-row",
                        span { class: "field-hint", "Lock Duration" }
                        span { class: "field-value", "90 days" }
                    }
                    div {
                        class: "detail-row",
                        span { class: "field-hint", "You will receive" }
                        span { class: "field-value", "{stake_receive} DVOTE" }
                    }

                    if connected {
                        if offered == OfferedAction::Stake {
                            button {
                                class: "button-standard primary action-button",
                                disabled: !stake_valid || !pending().is_idle(),
                                onclick: on_stake,
                                if pending() == PendingAction::Staking { "Staking..." } else { "Stake DGOLD" }
                            }
                        } else {
                            button {
                                class: "button-standard primary action-button",
                                disabled: !stake_valid || !pending().is_idle(),
                                onclick: on_approve,
                                if pending() == PendingAction::Approving { "Approving..." } else { "Approve DGOLD" }
                            }
                        }
                    } else {
                        button {
                            class: "button-standard primary action-button",
                            onclick: move |_| onconnect.call(()),
                            "Connect Wallet"
                        }
                    }
                }
            }

            if active_tab() == "unstake" {
                div {
                    class: "tab-panel",
                    div {
                        class: "amount-row",
                        label { class: "field-label", "Amount" }
                        span { class: "field-hint", "{staked_label}" }
                    }
                    div {
                        class: "input-row",
                        input {
                            class: "amount-input",
                            r#type: "text",
                            placeholder: "0.0",
                            value: "{unstake_amount_text}",
                            oninput: move |evt| {
                                unstake_amount_text.set(evt.value());
                                error_message.set(None);
                            }
                        }
                        button {
                            class: "button-standard secondary",
                            onclick: move |_| {
                                let ceiling = max_unstake_input(staked_amount(), voting_balance().unwrap_or(0));
                                unstake_amount_text.set(format_base_units(ceiling));
                            },
                            "Max"
                        }
                    }

                    div {
                        class: "detail-row",
                        span { class: "field-hint", "Lock Status" }
                        span { class: "field-value", "{lock_label}" }
                    }
                    div {
                        class: "detail-row",
                        span { class: "field-hint", "You will receive" }
                        span { class: "field-value", "{unstake_receive} DGOLD" }
                    }

                    if connected {
                        button {
                            class: "button-standard primary action-button",
                            disabled: !unstake_valid || !pending().is_idle(),
                            onclick: on_unstake,
                            if pending() == PendingAction::Unstaking {
                                "Unstaking..."
                            } else {
                                {unstake_button_label(locked)}
                            }
                        }
                    } else {
                        button {
                            class: "button-standard primary action-button",
                            onclick: move |_| onconnect.call(()),
                            "Connect Wallet"
                        }
                    }
                }
            }
        }
    }
}
