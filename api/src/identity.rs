use std::collections::HashMap;

use alloy_primitives::Address;
use serde::Deserialize;

use crate::{consts::NEYNAR_API_URL, error::DonetteError};

#[derive(Clone, Debug, Default, Deserialize)]
pub struct FarcasterUser {
    #[serde(default)]
    pub username: Option<String>,
}

/// `bulk-by-address` response: lowercase address to the users verified for it.
pub type BulkByAddress = HashMap<String, Vec<FarcasterUser>>;

/// Resolves wallet addresses to Farcaster usernames through Neynar.
#[derive(Clone, Debug)]
pub struct IdentityClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl IdentityClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: NEYNAR_API_URL.to_string(),
            api_key,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Look up the username for `address`.
    ///
    /// `Ok(None)` means no user is linked, or no API key is configured (no request is
    /// made). Network failures and non-success responses are errors; there is no retry.
    pub async fn lookup_username(&self, address: Address) -> Result<Option<String>, DonetteError> {
        let Some(api_key) = &self.api_key else {
            tracing::debug!("No Neynar key, skipping lookup for {}", address);
            return Ok(None);
        };

        let key = lowercase(&address);
        let url = format!("{}/v2/farcaster/user/bulk-by-address", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("addresses", key.as_str())])
            .header("api_key", api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DonetteError::LookupStatus(response.status().as_u16()));
        }

        let body: BulkByAddress = response.json().await?;
        Ok(username_from_response(&body, &address))
    }
}

/// First username listed for `address`, if any.
pub fn username_from_response(body: &BulkByAddress, address: &Address) -> Option<String> {
    body.get(&lowercase(address))?
        .first()?
        .username
        .clone()
        .filter(|name| !name.is_empty())
}

fn lowercase(address: &Address) -> String {
    format!("0x{}", hex::encode(address))
}
