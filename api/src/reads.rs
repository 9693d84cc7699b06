use alloy_primitives::{Address, Bytes};
use alloy_sol_types::SolCall;

use crate::{
    calls::{IDonutMiner, IMigrationClaim, IERC20},
    error::DonetteError,
    state::{ClaimReads, MinerSnapshot},
};

/// Source of read-only contract calls.
#[allow(async_fn_in_trait)]
pub trait ChainReads {
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, DonetteError>;
}

impl<T: ChainReads> ChainReads for &T {
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, DonetteError> {
        (**self).call(to, data).await
    }
}

/// Encode `call`, run it against `to` and decode its return value.
pub async fn read<R: ChainReads, C: SolCall>(
    reads: &R,
    to: Address,
    call: C,
) -> Result<C::Return, DonetteError> {
    let output = reads.call(to, call.abi_encode().into()).await?;
    Ok(C::abi_decode_returns(&output)?)
}

fn logged<T>(what: &str, result: Result<T, DonetteError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", what, e);
            None
        }
    }
}

/// Fetch every mining-page read. Individual failures are logged and left empty.
pub async fn fetch_miner_snapshot<R: ChainReads>(
    reads: &R,
    miner: Address,
    account: Option<Address>,
) -> MinerSnapshot {
    let donut = logged("donut", read(reads, miner, IDonutMiner::donutCall {}).await);
    let price = logged("price", read(reads, miner, IDonutMiner::getPriceCall {}).await);
    let dps = logged("dps", read(reads, miner, IDonutMiner::getDpsCall {}).await);
    let slot = logged("slot0", read(reads, miner, IDonutMiner::getSlot0Call {}).await);

    let balance = match (donut, account) {
        (Some(donut), Some(account)) => logged(
            "donut balance",
            read(reads, donut, IERC20::balanceOfCall { account }).await,
        ),
        _ => None,
    };

    MinerSnapshot {
        donut,
        price,
        dps,
        slot,
        balance,
    }
}

/// Fetch the claimed amount and legacy-token balance for `account`.
pub async fn fetch_claim_reads<R: ChainReads>(
    reads: &R,
    legacy_token: Address,
    claim: Address,
    account: Address,
) -> ClaimReads {
    let amount_claimed = logged(
        "amount claimed",
        read(reads, claim, IMigrationClaim::amountClaimedCall { account }).await,
    );
    let balance = logged(
        "legacy balance",
        read(reads, legacy_token, IERC20::balanceOfCall { account }).await,
    );
    ClaimReads {
        amount_claimed,
        balance,
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use std::{cell::RefCell, collections::HashMap};

    use super::*;

    /// Canned eth_call results keyed by `(to, selector)`.
    #[derive(Default)]
    pub struct MockReads {
        pub responses: HashMap<(Address, [u8; 4]), Bytes>,
        pub calls: RefCell<Vec<(Address, Bytes)>>,
    }

    impl MockReads {
        pub fn respond<C: SolCall>(&mut self, to: Address, value: Vec<u8>) {
            self.responses.insert((to, C::SELECTOR), value.into());
        }
    }

    impl ChainReads for MockReads {
        async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, DonetteError> {
            self.calls.borrow_mut().push((to, data.clone()));
            let selector: [u8; 4] = data[..4].try_into().unwrap();
            self.responses
                .get(&(to, selector))
                .cloned()
                .ok_or_else(|| DonetteError::Rpc {
                    code: 3,
                    message: "execution reverted".to_string(),
                })
        }
    }
}
