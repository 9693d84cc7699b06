use std::rc::Rc;

use dioxus::prelude::*;
use donette_api::prelude::*;

use crate::components::ClaimProgress;
use crate::hooks::{refresh_claim_reads, use_calls_tracker, use_claim_reads, BrowserWallet};
use crate::{Deployment, WalletState};

#[component]
pub fn Migrate() -> Element {
    let deployment = use_context::<Rc<Deployment>>();
    let wallet = use_context::<Signal<WalletState>>();
    let claim_reads = use_claim_reads();
    let mut input = use_signal(String::new);
    let mut notice = use_signal(|| None::<String>);

    let account = use_memo(move || wallet.read().account);

    let mut submitting = use_signal(|| false);

    // Clear the form and refetch once per confirmed claim
    let on_confirmed = use_callback({
        let deployment = deployment.clone();
        move |_: ()| {
            input.set(String::new());
            notice.set(Some("Claim confirmed".to_string()));
            let deployment = deployment.clone();
            spawn(async move {
                let ctx = WalletContext {
                    account: account(),
                    reads: deployment.rpc(),
                    transport: BrowserWallet::new(deployment.config.chain_id),
                };
                refresh_claim_reads(&ctx, &deployment.config, claim_reads).await;
            });
        }
    });
    let (tracker, mut tracker_state) = use_calls_tracker(on_confirmed);

    let view = use_memo({
        let deployment = deployment.clone();
        move || ClaimView::derive(&deployment.snapshot, account(), &claim_reads.read().reads)
    });

    let submit = {
        let deployment = deployment.clone();
        move |_| {
            if form_locked(submitting(), &tracker_state.read()) {
                return;
            }
            submitting.set(true);
            let deployment = deployment.clone();
            let amount = input();
            notice.set(None);
            spawn(async move {
                let ctx = WalletContext {
                    account: account(),
                    reads: deployment.rpc(),
                    transport: BrowserWallet::new(deployment.config.chain_id),
                };
                match dispatch_claim(&ctx, &deployment.config, &deployment.snapshot, &amount).await {
                    Ok(Dispatch::Submitted(id)) => {
                        // Keep the form locked until the tracker picks the batch up
                        tracker_state.set(TrackerState::Submitted(id.clone()));
                        tracker.send(id);
                    }
                    Ok(Dispatch::Skipped(reason)) => notice.set(Some(reason.to_string())),
                    Err(e) => {
                        tracing::error!("Claim submission failed: {}", e);
                        notice.set(Some(format!("Submission failed: {e}. Try again.")));
                    }
                }
                submitting.set(false);
            });
        }
    };

    let view = view.read();
    let busy = form_locked(submitting(), &tracker_state.read());
    let amount_ok = matches!(parse_amount(&input.read()), Ok(Some(_)));

    let body = if account().is_none() {
        rsx! {
            div { class: "card text-center text-gray-400", "Connect your wallet to check your allocation." }
        }
    } else if claim_reads.read().loading {
        rsx! {
            div { class: "card text-center text-gray-500", "Loading allocation..." }
        }
    } else if !view.is_eligible() {
        rsx! {
            div { class: "card text-center text-red-400", "This address is not in the migration snapshot." }
        }
    } else {
        let max = format_amount(view.max_claimable, 4);
        rsx! {
            if let Some(state) = view.state {
                ClaimProgress { state, progress: view.progress }
            }

            if view.fully_claimed {
                div { class: "card text-center text-green-400", "Your allocation is fully claimed." }
            } else {
                div { class: "card space-y-4",
                    div { class: "flex justify-between text-sm text-gray-400",
                        span { "Claimable now" }
                        span { class: "font-mono", "{max}" }
                    }
                    input {
                        class: "w-full input font-mono",
                        r#type: "text",
                        inputmode: "decimal",
                        placeholder: "0.0",
                        disabled: busy || !view.can_claim(),
                        value: "{input}",
                        oninput: move |e| input.set(e.value()),
                    }
                    div { class: "grid grid-cols-4 gap-2",
                        for (percent, amount) in view.presets {
                            button {
                                key: "{percent}",
                                class: "btn btn-secondary text-sm",
                                disabled: busy || !view.can_claim(),
                                onclick: move |_| input.set(format_amount_exact(amount)),
                                "{percent}%"
                            }
                        }
                    }
                    button {
                        class: "btn btn-primary w-full",
                        disabled: busy || !amount_ok || !view.can_claim(),
                        onclick: submit,
                        if busy { "Confirming..." } else { "Claim" }
                    }
                }
            }
        }
    };

    rsx! {
        div { class: "space-y-6",
            h1 { class: "text-3xl font-bold text-gray-100", "Migrate to the new Donette" }
            p { class: "text-gray-400",
                "Holders in the snapshot can claim the new token 1:1 for their legacy balance."
            }

            {body}

            {match &*tracker_state.read() {
                TrackerState::Failed(id) => rsx! {
                    p { class: "text-sm text-red-400", "Batch {id} failed on chain." }
                },
                TrackerState::TimedOut(id) => rsx! {
                    p { class: "text-sm text-yellow-400", "Batch {id} is still pending." }
                },
                _ => rsx! {},
            }}

            if let Some(notice) = notice() {
                p { class: "text-sm text-gray-400", "{notice}" }
            }
        }
    }
}

/// The claim form is locked from the click until the batch reaches a terminal status, so
/// a second batch cannot be sent while one is with the wallet or on chain.
fn form_locked(submitting: bool, tracker: &TrackerState) -> bool {
    submitting || tracker.is_active()
}
