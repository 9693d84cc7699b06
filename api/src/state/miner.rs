use alloy_primitives::{Address, U256};

use crate::calls::IDonutMiner::Slot0;

/// One refresh worth of mining-page reads. Each field is independent; a failed read
/// leaves its field empty without discarding the others.
#[derive(Clone, Debug, Default)]
pub struct MinerSnapshot {
    /// The DONUT token spent to mine.
    pub donut: Option<Address>,

    /// Current price to take the mining slot, in DONUT base units.
    pub price: Option<U256>,

    /// Donettes emitted per second to the current miner.
    pub dps: Option<U256>,

    pub slot: Option<Slot0>,

    /// The connected wallet's DONUT balance.
    pub balance: Option<U256>,
}

impl MinerSnapshot {
    /// The address currently holding the mining slot. The zero address means the slot
    /// has never been taken.
    pub fn current_miner(&self) -> Option<Address> {
        self.slot
            .as_ref()
            .map(|slot| slot.miner)
            .filter(|miner| !miner.is_zero())
    }

    pub fn epoch(&self) -> Option<u16> {
        self.slot.as_ref().map(|slot| slot.epochId)
    }
}

/// Shorten an address for display: `0x1234…abcd`.
pub fn short_address(address: &Address) -> String {
    let full = address.to_string();
    format!("{}…{}", &full[..6], &full[full.len() - 4..])
}
