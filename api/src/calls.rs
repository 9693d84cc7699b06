use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::{sol, SolCall};
use serde::{Deserialize, Serialize};

use crate::state::SnapshotEntry;

sol! {
    /// Donette mining contract (legacy page).
    #[sol(all_derives)]
    interface IDonutMiner {
        struct Slot0 {
            uint8 locked;
            uint16 epochId;
            uint192 initPrice;
            uint40 startTime;
            uint256 dps;
            address miner;
            string uri;
        }

        function donut() external view returns (address);
        function getPrice() external view returns (uint256);
        function getDps() external view returns (uint256);
        function getSlot0() external view returns (Slot0 memory);
    }

    #[sol(all_derives)]
    interface IERC20 {
        function balanceOf(address account) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
    }

    /// Snapshot claim contract for the migrated token.
    #[sol(all_derives)]
    interface IMigrationClaim {
        function amountClaimed(address account) external view returns (uint256);
        function claim(uint256 amount, uint256 totalAllocation, bytes32[] proof) external;
    }
}

/// One entry of an atomic call batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
    pub to: Address,
    pub data: Bytes,
}

impl Call {
    pub fn new<C: SolCall>(to: Address, call: C) -> Self {
        Self {
            to,
            data: call.abi_encode().into(),
        }
    }
}

/// Build the approve + claim batch. The claim contract pulls `amount` of the legacy
/// token, so the approval must come first within the same batch.
pub fn claim_batch(
    legacy_token: Address,
    claim_contract: Address,
    amount: U256,
    entry: &SnapshotEntry,
) -> [Call; 2] {
    [
        Call::new(
            legacy_token,
            IERC20::approveCall {
                spender: claim_contract,
                amount,
            },
        ),
        Call::new(
            claim_contract,
            IMigrationClaim::claimCall {
                amount,
                totalAllocation: entry.balance,
                proof: entry.proof.clone(),
            },
        ),
    ]
}
