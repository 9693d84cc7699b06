mod timer;
mod use_calls_tracker;
mod use_migration;
mod use_mining;
mod wallet;

pub use timer::AppTimer;
pub use use_calls_tracker::use_calls_tracker;
pub use use_migration::{refresh_claim_reads, use_claim_reads};
pub use use_mining::{use_miner_name, use_mining};
pub use wallet::{connect_wallet, BrowserWallet};
