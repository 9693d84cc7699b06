use alloy_primitives::U256;
use dioxus::prelude::*;
use donette_api::prelude::*;

use crate::components::{Announcement, Figure};
use crate::hooks::{use_miner_name, use_mining};
use crate::WalletState;

#[component]
pub fn Mining() -> Element {
    let wallet = use_context::<Signal<WalletState>>();
    let mining = use_mining();
    let miner_name = use_miner_name(mining);

    let state = mining.read();
    let reads = &state.reads;

    let price = display(reads.price, 4);
    let dps = display(reads.dps, 6);
    let balance = if wallet.read().account.is_some() {
        display(reads.balance, 4)
    } else {
        "-".to_string()
    };
    let epoch = reads
        .epoch()
        .map(|epoch| epoch.to_string())
        .unwrap_or_else(|| "-".to_string());

    let name = miner_name.read().clone().flatten();
    let miner = match (reads.current_miner(), name) {
        (Some(_), Some(name)) => format!("@{name}"),
        (Some(address), None) => short_address(&address),
        (None, _) => "Nobody yet".to_string(),
    };

    rsx! {
        div { class: "space-y-6",
            div { class: "text-center space-y-2",
                h1 { class: "text-3xl font-bold text-donut-400", "Mine Donettes" }
                p { class: "text-sm text-gray-400", "Spend DONUT to mine Donettes." }
            }

            Announcement {}

            if state.loading {
                div { class: "card text-center text-gray-500", "Loading miner..." }
            } else {
                div { class: "card grid grid-cols-2 gap-4 text-sm",
                    Figure { label: "Price (DONUT)", value: price }
                    Figure { label: "Donettes per second", value: dps }
                    Figure { label: "Epoch", value: epoch }
                    Figure { label: "Your DONUT", value: balance }
                    Figure { label: "Current miner", value: miner }
                }
            }
        }
    }
}

fn display(value: Option<U256>, precision: usize) -> String {
    value
        .map(|value| format_amount(value, precision))
        .unwrap_or_else(|| "-".to_string())
}
