// src/components/navbar.rs
use dioxus::prelude::*;
use crate::wallet::WalletInfo;

/// Top bar: project mark on the left, session control on the right.
/// A connected session shows its shortened address and reopens the
/// connect modal on click.
#[component]
pub fn Navbar(wallet: Signal<Option<WalletInfo>>, onconnect: EventHandler<()>) -> Element {
    let session_label = match wallet() {
        Some(info) => info.short_address(),
        None => "Connect Wallet".to_string(),
    };

    rsx! {
        nav {
            class: "navbar",
            div {
                class: "navbar-inner",
                div {
                    class: "navbar-brand",
                    span { class: "navbar-mark", "DGOLD" }
                    span { class: "navbar-sub", "Staking" }
                }
                div {
                    class: "navbar-actions",
                    button {
                        class: "button-standard ghost",
                        onclick: move |_| onconnect.call(()),
                        "{session_label}"
                    }
                }
            }
        }
    }
}
