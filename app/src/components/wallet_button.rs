use dioxus::prelude::*;
use donette_api::prelude::short_address;
use futures::StreamExt;

use crate::hooks::connect_wallet;
use crate::WalletState;

#[derive(Clone)]
enum WalletAction {
    Connect,
}

#[component]
pub fn WalletButton() -> Element {
    let mut wallet = use_context::<Signal<WalletState>>();
    let mut error = use_signal(|| None::<String>);

    // Use coroutine for lifecycle-safe async operations
    let wallet_coro = use_coroutine(move |mut rx: UnboundedReceiver<WalletAction>| {
        async move {
            while let Some(action) = rx.next().await {
                match action {
                    WalletAction::Connect => match connect_wallet().await {
                        Ok(account) => {
                            tracing::info!("Connected {}", account);
                            error.set(None);
                            let mut wallet = wallet.write();
                            wallet.connected = true;
                            wallet.account = Some(account);
                        }
                        Err(e) => {
                            tracing::error!("Wallet connection failed: {}", e);
                            error.set(Some(e));
                        }
                    },
                }
            }
        }
    });

    let connect = move |_| {
        wallet_coro.send(WalletAction::Connect);
    };

    let disconnect = move |_| {
        let mut wallet = wallet.write();
        wallet.connected = false;
        wallet.account = None;
    };

    let account = wallet.read().account.filter(|_| wallet.read().connected);

    match account {
        Some(account) => {
            let short = short_address(&account);
            rsx! {
                div { class: "flex items-center space-x-2",
                    span { class: "text-sm text-gray-400 font-mono", "{short}" }
                    button {
                        class: "btn btn-secondary text-sm",
                        onclick: disconnect,
                        "Disconnect"
                    }
                }
            }
        }
        None => rsx! {
            div { class: "flex items-center space-x-2",
                if let Some(e) = error() {
                    span { class: "text-xs text-red-400", title: "{e}", "Connection failed" }
                }
                button {
                    class: "btn btn-primary",
                    onclick: connect,
                    "Connect Wallet"
                }
            }
        },
    }
}
