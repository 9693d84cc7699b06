use std::{collections::HashMap, str::FromStr};

use alloy_primitives::{Address, B256, U256};
use serde::Deserialize;

use crate::error::DonetteError;

/// Raw record as it appears in the snapshot file.
#[derive(Deserialize)]
struct SnapshotRecord {
    address: String,
    balance: String,
    proof: Vec<String>,
}

/// A holder's allocation in the migration snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnapshotEntry {
    /// The holder. Addresses compare as bytes, so lookups ignore hex case.
    pub address: Address,

    /// Total allocation in base units.
    pub balance: U256,

    /// Merkle proof of `(address, balance)` against the claim contract's root.
    pub proof: Vec<B256>,
}

/// Immutable holder snapshot, keyed by address.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
    entries: HashMap<Address, SnapshotEntry>,
}

impl Snapshot {
    /// Load a snapshot from its JSON form: an array of `{address, balance, proof}`.
    pub fn from_json(json: &str) -> Result<Self, DonetteError> {
        let records: Vec<SnapshotRecord> = serde_json::from_str(json)?;
        let entries = records
            .into_iter()
            .map(SnapshotRecord::into_entry)
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_entries(entries)
    }

    pub fn from_entries(entries: impl IntoIterator<Item = SnapshotEntry>) -> Result<Self, DonetteError> {
        let mut map = HashMap::new();
        for entry in entries {
            if map.contains_key(&entry.address) {
                return Err(DonetteError::DuplicateEntry(entry.address));
            }
            map.insert(entry.address, entry);
        }
        Ok(Self { entries: map })
    }

    pub fn lookup(&self, address: &Address) -> Option<&SnapshotEntry> {
        self.entries.get(address)
    }

    /// Look up by a hex address string in any case. Unparseable input is simply absent.
    pub fn lookup_str(&self, address: &str) -> Option<&SnapshotEntry> {
        Address::from_str(address.trim())
            .ok()
            .and_then(|address| self.lookup(&address))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all allocations.
    pub fn total_allocation(&self) -> U256 {
        self.entries
            .values()
            .fold(U256::ZERO, |acc, entry| acc.saturating_add(entry.balance))
    }
}

impl SnapshotRecord {
    fn into_entry(self) -> Result<SnapshotEntry, DonetteError> {
        let address = Address::from_str(self.address.trim()).map_err(|e| {
            DonetteError::Snapshot(format!("bad address {:?}: {e}", self.address))
        })?;
        let balance = U256::from_str_radix(self.balance.trim(), 10).map_err(|e| {
            DonetteError::Snapshot(format!("bad balance {:?} for {address}: {e}", self.balance))
        })?;
        let proof = self
            .proof
            .iter()
            .map(|hash| {
                B256::from_str(hash.trim()).map_err(|e| {
                    DonetteError::Snapshot(format!("bad proof hash {hash:?} for {address}: {e}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(SnapshotEntry {
            address,
            balance,
            proof,
        })
    }
}
