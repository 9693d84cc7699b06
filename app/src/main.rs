#![allow(non_snake_case)]

mod components;
mod hooks;
mod pages;
mod route;

use std::rc::Rc;

use alloy_primitives::Address;
use dioxus::prelude::*;
use donette_api::prelude::*;
use route::Route;

// Holder snapshot taken at 1m total supply.
const SNAPSHOT_JSON: &str = include_str!("../assets/snapshot.json");

fn main() {
    #[cfg(feature = "web")]
    {
        tracing_wasm::set_as_global_default();
        dioxus::launch(App);
    }

    #[cfg(feature = "desktop")]
    {
        dioxus::launch(App);
    }
}

#[component]
fn App() -> Element {
    // Global state providers
    use_context_provider(|| Signal::new(WalletState::default()));

    let deployment = use_hook(|| Deployment::load().map(Rc::new));

    match deployment {
        Ok(deployment) => rsx! {
            DeploymentProvider { deployment }
        },
        Err(error) => rsx! {
            div { class: "max-w-xl mx-auto py-16 text-center",
                h1 { class: "text-2xl font-bold text-red-600 mb-4", "Misconfigured build" }
                p { class: "text-sm text-gray-600 font-mono", "{error}" }
            }
        },
    }
}

#[component]
fn DeploymentProvider(deployment: Rc<Deployment>) -> Element {
    use_context_provider(|| deployment.clone());

    rsx! {
        Router::<Route> {}
    }
}

// Global state types
#[derive(Clone, Default, Debug)]
pub struct WalletState {
    pub connected: bool,
    pub account: Option<Address>,
}

/// Contracts and snapshot baked into the build.
#[derive(Clone, Debug, PartialEq)]
pub struct Deployment {
    pub config: Config,
    pub snapshot: Snapshot,
}

impl Deployment {
    fn load() -> Result<Self, String> {
        let config = build_config().map_err(|e| e.to_string())?;
        let snapshot = Snapshot::from_json(SNAPSHOT_JSON).map_err(|e| e.to_string())?;
        tracing::info!("Loaded {} snapshot entries", snapshot.len());
        Ok(Self { config, snapshot })
    }

    pub fn rpc(&self) -> EthRpc {
        EthRpc::new(self.config.rpc_url.clone())
    }

    pub fn identity(&self) -> IdentityClient {
        IdentityClient::new(self.config.neynar_api_key.clone())
    }
}

/// Settings come from the build environment, like the Neynar key.
fn build_config() -> Result<Config, DonetteError> {
    Config::from_lookup(|key| {
        match key {
            RPC_URL_KEY => option_env!("DONETTE_RPC_URL"),
            CHAIN_ID_KEY => option_env!("DONETTE_CHAIN_ID"),
            MINER_KEY => option_env!("DONETTE_MINER_ADDRESS"),
            LEGACY_TOKEN_KEY => option_env!("DONETTE_LEGACY_TOKEN"),
            CLAIM_KEY => option_env!("DONETTE_CLAIM_ADDRESS"),
            NEYNAR_API_KEY => option_env!("NEYNAR_API_KEY"),
            _ => None,
        }
        .map(String::from)
    })
}
