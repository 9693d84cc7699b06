mod claim;
mod miner;
mod snapshot;

pub use claim::*;
pub use miner::*;
pub use snapshot::*;
