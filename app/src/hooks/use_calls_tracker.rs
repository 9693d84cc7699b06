use std::rc::Rc;

use dioxus::prelude::*;
use donette_api::prelude::*;
use futures::StreamExt;
use tokio_util::sync::CancellationToken;

use super::{AppTimer, BrowserWallet};
use crate::Deployment;

/// Follow submitted batches one at a time. Send a tracking id to the returned coroutine;
/// `on_confirmed` fires once per confirmed batch.
pub fn use_calls_tracker(on_confirmed: Callback<()>) -> (Coroutine<CallsId>, Signal<TrackerState>) {
    let deployment = use_context::<Rc<Deployment>>();
    let mut state = use_signal(|| TrackerState::Idle);

    let cancel = use_hook(CancellationToken::new);
    use_drop({
        let cancel = cancel.clone();
        move || cancel.cancel()
    });

    let tracker = use_coroutine(move |mut rx: UnboundedReceiver<CallsId>| {
        let transport = BrowserWallet::new(deployment.config.chain_id);
        let cancel = cancel.clone();
        async move {
            while let Some(id) = rx.next().await {
                let outcome = track_calls(
                    &transport,
                    &AppTimer,
                    id,
                    &cancel,
                    Some(CONFIRMATION_DEADLINE),
                    |next: &TrackerState| {
                        // The view is gone once cancelled
                        if !matches!(next, TrackerState::Cancelled(_)) {
                            state.set(next.clone());
                        }
                    },
                    || on_confirmed.call(()),
                )
                .await;
                if outcome == PollOutcome::Cancelled {
                    break;
                }
            }
        }
    });

    (tracker, state)
}
