use alloy_primitives::{utils::UnitsError, Address};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DonetteError {
    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("rpc returned no result")]
    EmptyResult,

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("abi decode error: {0}")]
    Abi(#[from] alloy_sol_types::Error),

    #[error("invalid snapshot: {0}")]
    Snapshot(String),

    #[error("duplicate snapshot entry for {0}")]
    DuplicateEntry(Address),

    #[error("invalid amount: {0}")]
    Amount(#[from] UnitsError),

    #[error("missing config value {0}")]
    MissingConfig(&'static str),

    #[error("invalid config value for {key}: {value}")]
    InvalidConfig { key: &'static str, value: String },

    #[error("wallet transport error: {0}")]
    Transport(String),

    #[error("identity lookup failed with status {0}")]
    LookupStatus(u16),
}
