use std::rc::Rc;

use dioxus::prelude::*;
use donette_api::prelude::*;
use tokio_util::sync::CancellationToken;

use super::{AppTimer, BrowserWallet};
use crate::{Deployment, WalletState};

#[derive(Clone, Debug, PartialEq)]
pub struct MigrationState {
    pub reads: ClaimReads,
    pub loading: bool,
}

impl Default for MigrationState {
    fn default() -> Self {
        Self {
            reads: ClaimReads::default(),
            loading: true,
        }
    }
}

/// Claimed amount and legacy balance of the connected wallet, refreshed every two seconds.
pub fn use_claim_reads() -> Signal<MigrationState> {
    let deployment = use_context::<Rc<Deployment>>();
    let wallet = use_context::<Signal<WalletState>>();
    let state = use_signal(MigrationState::default);

    let account = use_memo(move || wallet.read().account);

    let cancel = use_hook(CancellationToken::new);
    use_drop({
        let cancel = cancel.clone();
        move || cancel.cancel()
    });

    use_future(move || {
        let deployment = deployment.clone();
        let cancel = cancel.clone();
        async move {
            let rpc = deployment.rpc();
            let rpc = &rpc;
            let config = &deployment.config;
            refresh_every(&AppTimer, REFRESH_INTERVAL, &cancel, move || async move {
                let ctx = WalletContext {
                    account: account(),
                    reads: rpc,
                    transport: BrowserWallet::new(config.chain_id),
                };
                refresh_claim_reads(&ctx, config, state).await;
            })
            .await;
        }
    });

    state
}

/// Refetch the claim reads. Safe to call alongside the periodic refresh.
pub async fn refresh_claim_reads<R: ChainReads, T>(
    ctx: &WalletContext<R, T>,
    config: &Config,
    mut state: Signal<MigrationState>,
) {
    let reads = ctx.claim_reads(config).await;
    state.set(MigrationState {
        reads,
        loading: false,
    });
}
