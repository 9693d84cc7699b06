use alloy_primitives::{Address, U256};
use thiserror::Error;

use crate::{
    amount::parse_amount,
    calls::{claim_batch, Call},
    config::Config,
    error::DonetteError,
    reads::{fetch_claim_reads, ChainReads},
    state::{ClaimReads, Snapshot},
    status::{CallsId, CallsStatus},
};

/// Wallet-side batch submission (EIP-5792 `wallet_sendCalls` / `wallet_getCallsStatus`).
#[allow(async_fn_in_trait)]
pub trait CallsTransport {
    /// Submit `calls` atomically from `from` and return the tracking id.
    async fn send_calls(&self, from: Address, calls: &[Call]) -> Result<CallsId, DonetteError>;

    async fn calls_status(&self, id: &CallsId) -> Result<CallsStatus, DonetteError>;
}

impl<T: CallsTransport> CallsTransport for &T {
    async fn send_calls(&self, from: Address, calls: &[Call]) -> Result<CallsId, DonetteError> {
        (**self).send_calls(from, calls).await
    }

    async fn calls_status(&self, id: &CallsId) -> Result<CallsStatus, DonetteError> {
        (**self).calls_status(id).await
    }
}

/// Wallet and chain access handed to the claim logic by the view.
#[derive(Clone, Debug)]
pub struct WalletContext<R, T> {
    pub account: Option<Address>,
    pub reads: R,
    pub transport: T,
}

impl<R: ChainReads, T> WalletContext<R, T> {
    /// Claimed amount and legacy balance of the connected account. Empty while no wallet
    /// is connected.
    pub async fn claim_reads(&self, config: &Config) -> ClaimReads {
        match self.account {
            Some(account) => {
                fetch_claim_reads(&self.reads, config.legacy_token, config.claim, account).await
            }
            None => ClaimReads::default(),
        }
    }
}

/// Why a claim was not submitted. None of these reach the network.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("no wallet connected")]
    NotConnected,

    #[error("address is not in the snapshot")]
    NotEligible,

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("amount must be greater than zero")]
    NothingToClaim,
}

/// A ready-to-submit claim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClaimBatch {
    pub from: Address,
    pub amount: U256,
    pub calls: [Call; 2],
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Dispatch {
    Submitted(CallsId),
    Skipped(SkipReason),
}

/// Validate the claim form and build the approve + claim batch.
pub fn prepare_claim(
    account: Option<Address>,
    snapshot: &Snapshot,
    config: &Config,
    input: &str,
) -> Result<ClaimBatch, SkipReason> {
    let from = account.ok_or(SkipReason::NotConnected)?;
    let entry = snapshot.lookup(&from).ok_or(SkipReason::NotEligible)?;
    let amount = parse_amount(input)
        .map_err(|e| SkipReason::InvalidAmount(e.to_string()))?
        .ok_or(SkipReason::NothingToClaim)?;
    Ok(ClaimBatch {
        from,
        amount,
        calls: claim_batch(config.legacy_token, config.claim, amount, entry),
    })
}

/// Submit a claim for the amount typed into the form.
///
/// Form problems are logged and reported as [`Dispatch::Skipped`]; only transport failures
/// come back as errors.
pub async fn dispatch_claim<R, T: CallsTransport>(
    ctx: &WalletContext<R, T>,
    config: &Config,
    snapshot: &Snapshot,
    input: &str,
) -> Result<Dispatch, DonetteError> {
    let batch = match prepare_claim(ctx.account, snapshot, config, input) {
        Ok(batch) => batch,
        Err(reason) => {
            tracing::warn!("Claim not submitted: {}", reason);
            return Ok(Dispatch::Skipped(reason));
        }
    };

    let id = ctx.transport.send_calls(batch.from, &batch.calls).await?;
    tracing::info!("Claim batch {} submitted for {}", id, batch.amount);
    Ok(Dispatch::Submitted(id))
}


#[cfg(test)]
mod tests {
    use alloy_primitives::address;

    use super::{mock::MockTransport, *};
    use crate::{
        calls::{IMigrationClaim, IERC20},
        reads::mock::MockReads,
        state::SnapshotEntry,
    };
    use alloy_sol_types::{SolCall, SolValue};

    const USER: Address = address!("00000000000000000000000000000000000000aa");

    fn config() -> Config {
        Config {
            rpc_url: "http://localhost:8545".to_string(),
            chain_id: 8453,
            miner: address!("1111111111111111111111111111111111111111"),
            legacy_token: address!("2222222222222222222222222222222222222222"),
            claim: address!("3333333333333333333333333333333333333333"),
            neynar_api_key: None,
        }
    }

    fn snapshot() -> Snapshot {
        Snapshot::from_entries([SnapshotEntry {
            address: USER,
            balance: U256::from(1000u64) * U256::from(10u64).pow(U256::from(18u64)),
            proof: vec![],
        }])
        .unwrap()
    }

    fn ctx(account: Option<Address>) -> WalletContext<(), MockTransport> {
        WalletContext {
            account,
            reads: (),
            transport: MockTransport::default(),
        }
    }

    #[tokio::test]
    async fn submits_approve_then_claim() {
        let ctx = ctx(Some(USER));

        let dispatch = dispatch_claim(&ctx, &config(), &snapshot(), "1.5").await.unwrap();

        assert_eq!(dispatch, Dispatch::Submitted(CallsId("0xbatch1".to_string())));
        let sent = ctx.transport.sent.borrow();
        assert_eq!(sent.len(), 1);
        let (from, calls) = &sent[0];
        assert_eq!(*from, USER);
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].to, config().legacy_token);
        assert_eq!(calls[1].to, config().claim);
        let claim = IMigrationClaim::claimCall::abi_decode(&calls[1].data).unwrap();
        assert_eq!(claim.amount, U256::from(1_500_000_000_000_000_000u128));
    }

    #[tokio::test]
    async fn skips_without_touching_the_transport() {
        let cases = [
            (None, "1", SkipReason::NotConnected),
            (Some(address!("00000000000000000000000000000000000000cc")), "1", SkipReason::NotEligible),
            (Some(USER), "0", SkipReason::NothingToClaim),
            (Some(USER), "-5", SkipReason::NothingToClaim),
            (Some(USER), "", SkipReason::NothingToClaim),
        ];
        for (account, input, reason) in cases {
            let ctx = ctx(account);
            let dispatch = dispatch_claim(&ctx, &config(), &snapshot(), input).await.unwrap();
            assert_eq!(dispatch, Dispatch::Skipped(reason));
            assert!(ctx.transport.sent.borrow().is_empty());
        }
    }

    #[tokio::test]
    async fn unparseable_amount_is_skipped() {
        let ctx = ctx(Some(USER));
        let dispatch = dispatch_claim(&ctx, &config(), &snapshot(), "lots").await.unwrap();
        assert!(matches!(dispatch, Dispatch::Skipped(SkipReason::InvalidAmount(_))));
        assert!(ctx.transport.sent.borrow().is_empty());
    }

    #[tokio::test]
    async fn transport_failure_is_an_error() {
        let mut ctx = ctx(Some(USER));
        ctx.transport.fail_send = true;
        let result = dispatch_claim(&ctx, &config(), &snapshot(), "1").await;
        assert!(matches!(result, Err(DonetteError::Transport(_))));
    }

    #[tokio::test]
    async fn claim_reads_use_the_context_account() {
        let config = config();
        let mut reads = MockReads::default();
        reads.respond::<IMigrationClaim::amountClaimedCall>(
            config.claim,
            U256::from(400u16).abi_encode(),
        );
        reads.respond::<IERC20::balanceOfCall>(config.legacy_token, U256::from(300u16).abi_encode());

        let ctx = WalletContext {
            account: Some(USER),
            reads,
            transport: MockTransport::default(),
        };
        let claim_reads = ctx.claim_reads(&config).await;

        assert_eq!(claim_reads.amount_claimed, Some(U256::from(400u16)));
        assert_eq!(claim_reads.balance, Some(U256::from(300u16)));
        assert_eq!(ctx.reads.calls.borrow().len(), 2);
    }

    #[tokio::test]
    async fn claim_reads_are_empty_while_disconnected() {
        let ctx = WalletContext {
            account: None,
            reads: MockReads::default(),
            transport: MockTransport::default(),
        };
        assert_eq!(ctx.claim_reads(&config()).await, ClaimReads::default());
        assert!(ctx.reads.calls.borrow().is_empty());
    }
}
