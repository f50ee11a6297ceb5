// src/components/modals/connect_modal.rs
use dioxus::prelude::*;
use crate::rpc::EvmRpc;
use crate::wallet::WalletInfo;

/// Wallet session entry: the provider endpoint that holds the keys and
/// the account address to act as. Test pings the provider's eth_chainId
/// and checks it is the chain the contracts live on.
#[component]
pub fn ConnectModal(
    current: Option<WalletInfo>,
    expected_chain_id: u64,
    onclose: EventHandler<()>,
    onconnect: EventHandler<WalletInfo>,
) -> Element {
    let mut address = use_signal(|| current.as_ref().map(|w| w.address.clone()).unwrap_or_default());
    let mut provider_url = use_signal(|| {
        current
            .as_ref()
            .map(|w| w.provider_url.clone())
            .unwrap_or_default()
    });
    let mut error_message = use_signal(|| None::<String>);
    let mut info_message = use_signal(|| None::<String>);
    let mut testing = use_signal(|| false);

    rsx! {
        div {
            class: "modal-backdrop",
            onclick: move |_| onclose.call(()),

            div {
                class: "modal-content",
                onclick: move |e| e.stop_propagation(),

                h2 { class: "modal-title", "Connect Wallet" }

                if let Some(error) = error_message() {
                    div { class: "error-message", "{error}" }
                }
                if let Some(info) = info_message() {
                    div { class: "info-message", "{info}" }
                }

                div {
                    class: "wallet-field",
                    label { "Wallet provider URL:" }
                    input {
                        value: "{provider_url}",
                        oninput: move |e| provider_url.set(e.value()),
                        placeholder: "http://localhost:8545"
                    }
                    div {
                        class: "help-text",
                        "JSON-RPC endpoint of the wallet that signs for this account"
                    }
                }

                div {
                    class: "wallet-field",
                    label { "Account address:" }
                    input {
                        value: "{address}",
                        oninput: move |e| address.set(e.value()),
                        placeholder: "0x..."
                    }
                }

                div { class: "modal-buttons",
                    button {
                        class: "modal-button cancel",
                        onclick: move |_| onclose.call(()),
                        "Cancel"
                    }
                    button {
                        class: "modal-button secondary",
                        disabled: testing(),
                        onclick: move |_| {
                            testing.set(true);
                            error_message.set(None);
                            info_message.set(None);
                            let url = provider_url();

                            spawn(async move {
                                match EvmRpc::new(&url).chain_id().await {
                                    Ok(id) if id == expected_chain_id => {
                                        info_message.set(Some(format!("Provider reachable on chain {}", id)));
                                    }
                                    Ok(id) => {
                                        error_message.set(Some(format!(
                                            "Provider is on chain {}, expected {}",
                                            id, expected_chain_id
                                        )));
                                    }
                                    Err(e) => error_message.set(Some(format!("Provider test failed: {}", e))),
                                }
                                testing.set(false);
                            });
                        },
                        if testing() { "Testing..." } else { "Test Provider" }
                    }
                    button {
                        class: "modal-button primary",
                        onclick: move |_| {
                            match WalletInfo::new(&address(), &provider_url()) {
                                Ok(info) => onconnect.call(info),
                                Err(e) => error_message.set(Some(e)),
                            }
                        },
                        "Connect"
                    }
                }
            }
        }
    }
}
