// src/components/staking_view.rs
use dioxus::prelude::*;
use crate::components::modals::ConnectModal;
use crate::components::navbar::Navbar;
use crate::components::staking_card::StakingCard;
use crate::config::ChainConfig;
use crate::wallet::WalletInfo;

/// The single routed page. Owns the wallet session and chain config and
/// hands both down explicitly; nothing reads them ambiently.
#[component]
pub fn StakingView() -> Element {
    let config = use_hook(ChainConfig::from_env);
    let mut wallet = use_signal(|| None::<WalletInfo>);
    let mut show_connect_modal = use_signal(|| false);

    rsx! {
        div {
            class: "app-shell",
            Navbar {
                wallet,
                onconnect: move |_| show_connect_modal.set(true),
            }
            main {
                class: "staking-page",
                div {
                    class: "staking-page-inner",
                    StakingCard {
                        wallet,
                        config: config.clone(),
                        onconnect: move |_| show_connect_modal.set(true),
                    }
                }
            }
            if show_connect_modal() {
                ConnectModal {
                    current: wallet(),
                    expected_chain_id: config.chain_id,
                    onclose: move |_| show_connect_modal.set(false),
                    onconnect: move |info: WalletInfo| {
                        log::info!("Wallet connected: {}", info.address);
                        wallet.set(Some(info));
                        show_connect_modal.set(false);
                    },
                }
            }
        }
    }
}
