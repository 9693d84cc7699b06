use std::str::FromStr;

use alloy_primitives::Address;

use crate::{
    consts::{DEFAULT_CHAIN_ID, DEFAULT_RPC_URL},
    error::DonetteError,
};

pub const RPC_URL_KEY: &str = "DONETTE_RPC_URL";
pub const CHAIN_ID_KEY: &str = "DONETTE_CHAIN_ID";
pub const MINER_KEY: &str = "DONETTE_MINER_ADDRESS";
pub const LEGACY_TOKEN_KEY: &str = "DONETTE_LEGACY_TOKEN";
pub const CLAIM_KEY: &str = "DONETTE_CLAIM_ADDRESS";
pub const NEYNAR_API_KEY: &str = "NEYNAR_API_KEY";

/// Deployment settings shared by the app and the CLI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub rpc_url: String,
    pub chain_id: u64,

    /// The legacy mining contract.
    pub miner: Address,

    /// The legacy Donettes token surrendered on migration.
    pub legacy_token: Address,

    /// The snapshot claim contract for the new token.
    pub claim: Address,

    /// Neynar key for miner display names. Lookups are skipped without one.
    pub neynar_api_key: Option<String>,
}

impl Config {
    /// Build a config from any key/value source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DonetteError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let chain_id = match get(CHAIN_ID_KEY) {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .map_err(|_| DonetteError::InvalidConfig {
                    key: CHAIN_ID_KEY,
                    value,
                })?,
            None => DEFAULT_CHAIN_ID,
        };

        Ok(Self {
            rpc_url: get(RPC_URL_KEY).unwrap_or_else(|| DEFAULT_RPC_URL.to_string()),
            chain_id,
            miner: parse_address(MINER_KEY, get(MINER_KEY))?,
            legacy_token: parse_address(LEGACY_TOKEN_KEY, get(LEGACY_TOKEN_KEY))?,
            claim: parse_address(CLAIM_KEY, get(CLAIM_KEY))?,
            neynar_api_key: get(NEYNAR_API_KEY),
        })
    }

    /// Read from the process environment.
    pub fn from_env() -> Result<Self, DonetteError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

fn parse_address(key: &'static str, value: Option<String>) -> Result<Address, DonetteError> {
    let value = value.ok_or(DonetteError::MissingConfig(key))?;
    Address::from_str(value.trim()).map_err(|_| DonetteError::InvalidConfig { key, value })
}
