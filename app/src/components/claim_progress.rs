use dioxus::prelude::*;
use donette_api::prelude::*;

/// Allocation summary and progress bar for an eligible holder.
#[component]
pub fn ClaimProgress(state: ClaimState, progress: f64) -> Element {
    let total = format_amount(state.total_allocation, 4);
    let claimed = format_amount(state.claimed_so_far, 4);
    let remaining = format_amount(state.remaining_allocation(), 4);
    let balance = format_amount(state.current_balance, 4);
    let percent = progress * 100.0;

    rsx! {
        div { class: "card space-y-4",
            div { class: "grid grid-cols-2 gap-4 text-sm",
                Figure { label: "Allocation", value: total }
                Figure { label: "Claimed", value: claimed }
                Figure { label: "Remaining", value: remaining }
                Figure { label: "Wallet balance", value: balance }
            }
            div {
                div { class: "flex justify-between text-xs text-gray-500 mb-1",
                    span { "Progress" }
                    span { "{percent:.2}%" }
                }
                div { class: "w-full h-2 rounded bg-gray-800",
                    div {
                        class: "h-2 rounded bg-donut-400",
                        style: "width: {percent}%",
                    }
                }
            }
        }
    }
}

#[component]
pub fn Figure(label: &'static str, value: String) -> Element {
    rsx! {
        div {
            p { class: "text-gray-500", "{label}" }
            p { class: "font-mono text-gray-100", "{value}" }
        }
    }
}
