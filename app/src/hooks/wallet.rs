use alloy_primitives::Address;
use donette_api::prelude::*;
use serde::Deserialize;

/// EIP-5792 batch transport through the injected EIP-1193 provider.
#[derive(Clone, Copy, Debug)]
pub struct BrowserWallet {
    chain_id: u64,
}

impl BrowserWallet {
    pub fn new(chain_id: u64) -> Self {
        Self { chain_id }
    }
}

impl CallsTransport for BrowserWallet {
    async fn send_calls(&self, from: Address, calls: &[Call]) -> Result<CallsId, DonetteError> {
        let params = serde_json::json!([{
            "version": SEND_CALLS_VERSION,
            "from": from,
            "chainId": format!("0x{:x}", self.chain_id),
            "atomicRequired": true,
            "calls": calls,
        }]);
        let result = ethereum_request("wallet_sendCalls", params)
            .await
            .map_err(DonetteError::Transport)?;
        parse_send_calls_result(result)
    }

    async fn calls_status(&self, id: &CallsId) -> Result<CallsStatus, DonetteError> {
        let result = ethereum_request("wallet_getCallsStatus", serde_json::json!([id]))
            .await
            .map_err(DonetteError::Transport)?;
        let response: CallsStatusResponse = serde_json::from_value(result)?;
        Ok(response.status)
    }
}

/// Wallets answer `wallet_sendCalls` with either `{ id }` or, on older drafts, a bare id.
fn parse_send_calls_result(value: serde_json::Value) -> Result<CallsId, DonetteError> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum SendCallsResult {
        Bare(String),
        Object { id: String },
    }

    match serde_json::from_value(value)? {
        SendCallsResult::Bare(id) | SendCallsResult::Object { id } => Ok(CallsId(id)),
    }
}

/// Ask the injected wallet for its account.
pub async fn connect_wallet() -> Result<Address, String> {
    let accounts = ethereum_request("eth_requestAccounts", serde_json::json!([])).await?;
    let accounts: Vec<Address> = serde_json::from_value(accounts).map_err(|e| e.to_string())?;
    accounts
        .into_iter()
        .next()
        .ok_or_else(|| "Wallet returned no accounts".to_string())
}

#[cfg(feature = "web")]
async fn ethereum_request(
    method: &str,
    params: serde_json::Value,
) -> Result<serde_json::Value, String> {
    use js_sys::{Object, Promise, Reflect, JSON};
    use wasm_bindgen::prelude::*;

    let window = web_sys::window().ok_or("No window")?;

    // Check an injected provider is present
    let ethereum = Reflect::get(&window, &JsValue::from_str("ethereum"))
        .map_err(|_| "Wallet not found")?;

    if ethereum.is_undefined() {
        return Err("No wallet installed. Please install one and refresh.".to_string());
    }

    let request_fn = Reflect::get(&ethereum, &JsValue::from_str("request"))
        .map_err(|_| "No request method")?;

    let request_fn: js_sys::Function = request_fn
        .dyn_into()
        .map_err(|_| "request is not a function")?;

    // Build { method, params }
    let args = Object::new();
    Reflect::set(&args, &JsValue::from_str("method"), &JsValue::from_str(method))
        .map_err(|_| "Failed to set method")?;
    let params = JSON::parse(&params.to_string())
        .map_err(|e| format!("Invalid params: {:?}", e))?;
    Reflect::set(&args, &JsValue::from_str("params"), &params)
        .map_err(|_| "Failed to set params")?;

    let promise = request_fn
        .call1(&ethereum, &args.into())
        .map_err(|e| format!("{} call failed: {:?}", method, e))?;

    let promise: Promise = promise.dyn_into().map_err(|_| "Not a promise")?;

    let result = wasm_bindgen_futures::JsFuture::from(promise)
        .await
        .map_err(|e| format!("{} rejected: {:?}", method, e))?;

    if result.is_undefined() || result.is_null() {
        return Ok(serde_json::Value::Null);
    }

    let text: String = JSON::stringify(&result)
        .map_err(|e| format!("Unreadable {} result: {:?}", method, e))?
        .into();
    serde_json::from_str(&text).map_err(|e| e.to_string())
}

#[cfg(not(feature = "web"))]
async fn ethereum_request(
    _method: &str,
    _params: serde_json::Value,
) -> Result<serde_json::Value, String> {
    Err("Wallet requests only available in web mode".to_string())
}
