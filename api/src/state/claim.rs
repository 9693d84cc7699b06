use alloy_primitives::{Address, U256};

use crate::consts::CLAIM_PRESETS;

use super::{Snapshot, SnapshotEntry};

/// Claim-contract reads for the connected account. `None` means the read has not
/// landed yet or failed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClaimReads {
    pub amount_claimed: Option<U256>,
    pub balance: Option<U256>,
}

/// Allocation bookkeeping for one holder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClaimState {
    pub total_allocation: U256,
    pub claimed_so_far: U256,
    pub current_balance: U256,
}

impl ClaimState {
    pub fn remaining_allocation(&self) -> U256 {
        self.total_allocation.saturating_sub(self.claimed_so_far)
    }
}

/// `min(balance, allocation - claimed)`, never negative.
///
/// Without an entry or a known balance there is nothing to claim. An unknown claimed
/// amount counts as zero.
pub fn max_claimable(
    entry: Option<&SnapshotEntry>,
    current_balance: Option<U256>,
    amount_claimed: Option<U256>,
) -> U256 {
    let (Some(entry), Some(balance)) = (entry, current_balance) else {
        return U256::ZERO;
    };
    let remaining = entry
        .balance
        .saturating_sub(amount_claimed.unwrap_or_default());
    balance.min(remaining)
}

/// `floor(max * percent / 100)`, with 100% returning `max` untouched.
///
/// Percentages above 100 are clamped. The product is split as
/// `(max / 100) * p + (max % 100) * p / 100` so it cannot overflow.
pub fn percentage_amount(max: U256, percent: u8) -> U256 {
    let percent = percent.min(100);
    if percent == 100 {
        return max;
    }
    let hundred = U256::from(100u8);
    let p = U256::from(percent);
    (max / hundred) * p + (max % hundred) * p / hundred
}

pub fn is_fully_claimed(entry: &SnapshotEntry, amount_claimed: Option<U256>) -> bool {
    amount_claimed.unwrap_or_default() >= entry.balance
}

/// Fraction of the allocation already claimed, in `[0, 1]`.
///
/// A zero allocation yields `0`. The result is exactly `1.0` only once the claimed amount
/// reaches the allocation; otherwise it is capped just below one so float rounding of
/// large values can never report a partial claim as complete.
pub fn progress_ratio(entry: &SnapshotEntry, amount_claimed: Option<U256>) -> f64 {
    if entry.balance.is_zero() {
        return 0.0;
    }
    let claimed = amount_claimed.unwrap_or_default();
    if claimed >= entry.balance {
        return 1.0;
    }
    let ratio = u256_to_f64(claimed) / u256_to_f64(entry.balance);
    ratio.min(below_one())
}

fn below_one() -> f64 {
    f64::from_bits(1.0f64.to_bits() - 1)
}

pub(crate) fn u256_to_f64(value: U256) -> f64 {
    value
        .as_limbs()
        .iter()
        .rev()
        .fold(0.0, |acc, limb| acc * 18_446_744_073_709_551_616.0 + *limb as f64)
}

/// Everything the claim form renders, derived from the snapshot and the latest reads.
#[derive(Clone, Debug, PartialEq)]
pub struct ClaimView {
    pub entry: Option<SnapshotEntry>,
    pub state: Option<ClaimState>,
    pub max_claimable: U256,
    pub presets: [(u8, U256); 4],
    pub progress: f64,
    pub fully_claimed: bool,
}

impl ClaimView {
    pub fn derive(snapshot: &Snapshot, account: Option<Address>, reads: &ClaimReads) -> Self {
        let entry = account.and_then(|account| snapshot.lookup(&account)).cloned();
        let max = max_claimable(entry.as_ref(), reads.balance, reads.amount_claimed);
        let presets = CLAIM_PRESETS.map(|percent| (percent, percentage_amount(max, percent)));
        let state = entry.as_ref().map(|entry| ClaimState {
            total_allocation: entry.balance,
            claimed_so_far: reads.amount_claimed.unwrap_or_default(),
            current_balance: reads.balance.unwrap_or_default(),
        });
        let (progress, fully_claimed) = match &entry {
            Some(entry) => (
                progress_ratio(entry, reads.amount_claimed),
                is_fully_claimed(entry, reads.amount_claimed),
            ),
            None => (0.0, false),
        };
        Self {
            entry,
            state,
            max_claimable: max,
            presets,
            progress,
            fully_claimed,
        }
    }

    pub fn is_eligible(&self) -> bool {
        self.entry.is_some()
    }

    /// The form accepts input only for an eligible holder with something left to claim.
    pub fn can_claim(&self) -> bool {
        self.is_eligible() && !self.fully_claimed && !self.max_claimable.is_zero()
    }
}
