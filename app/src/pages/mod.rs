mod migrate;
mod mining;

pub use migrate::Migrate;
pub use mining::Mining;
