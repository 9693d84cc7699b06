use std::rc::Rc;

use alloy_primitives::Address;
use dioxus::prelude::*;
use donette_api::prelude::*;
use tokio_util::sync::CancellationToken;

use super::AppTimer;
use crate::{Deployment, WalletState};

#[derive(Clone, Debug)]
pub struct MiningState {
    pub reads: MinerSnapshot,
    pub loading: bool,
}

impl Default for MiningState {
    fn default() -> Self {
        Self {
            reads: MinerSnapshot::default(),
            loading: true,
        }
    }
}

/// Mining contract reads, refreshed every two seconds while the page is mounted.
pub fn use_mining() -> Signal<MiningState> {
    let deployment = use_context::<Rc<Deployment>>();
    let wallet = use_context::<Signal<WalletState>>();
    let state = use_signal(MiningState::default);

    // Extract the account as a memo to avoid borrow conflicts
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
            let miner = deployment.config.miner;
            refresh_every(&AppTimer, REFRESH_INTERVAL, &cancel, move || async move {
                refresh_mining(rpc, miner, account(), state).await;
            })
            .await;
        }
    });

    state
}

async fn refresh_mining(
    rpc: &EthRpc,
    miner: Address,
    account: Option<Address>,
    mut state: Signal<MiningState>,
) {
    let reads = fetch_miner_snapshot(rpc, miner, account).await;
    state.set(MiningState {
        reads,
        loading: false,
    });
}

/// Display name of the current miner. Looked up once each time the miner changes; any
/// failure resolves to no name.
pub fn use_miner_name(mining: Signal<MiningState>) -> Resource<Option<String>> {
    let deployment = use_context::<Rc<Deployment>>();
    let miner = use_memo(move || mining.read().reads.current_miner());

    use_resource(move || {
        let identity = deployment.identity();
        let miner = miner();
        async move {
            let address = miner?;
            match identity.lookup_username(address).await {
                Ok(name) => name,
                Err(e) => {
                    tracing::warn!("Failed to resolve miner {}: {}", address, e);
                    None
                }
            }
        }
    })
}
