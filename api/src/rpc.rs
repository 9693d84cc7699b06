use alloy_primitives::{Address, Bytes};
use serde::{Deserialize, Serialize};

use crate::{error::DonetteError, reads::ChainReads};

#[derive(Serialize)]
pub struct RpcRequest {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'static str,
    pub params: Vec<serde_json::Value>,
}

#[derive(Deserialize, Debug)]
pub struct RpcResponse<T> {
    pub result: Option<T>,
    pub error: Option<RpcError>,
}

#[derive(Deserialize, Debug)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

impl<T> RpcResponse<T> {
    pub fn into_result(self) -> Result<T, DonetteError> {
        if let Some(error) = self.error {
            return Err(DonetteError::Rpc {
                code: error.code,
                message: error.message,
            });
        }
        self.result.ok_or(DonetteError::EmptyResult)
    }
}

/// Read-only Ethereum JSON-RPC client.
#[derive(Clone, Debug)]
pub struct EthRpc {
    client: reqwest::Client,
    url: String,
}

impl EthRpc {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    async fn request<T: for<'de> Deserialize<'de>>(
        &self,
        method: &'static str,
        params: Vec<serde_json::Value>,
    ) -> Result<T, DonetteError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        };

        let response: RpcResponse<T> = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await?
            .json()
            .await?;

        response.into_result()
    }
}

impl ChainReads for EthRpc {
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, DonetteError> {
        self.request(
            "eth_call",
            vec![
                serde_json::json!({ "to": to, "data": data }),
                serde_json::json!("latest"),
            ],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_error_wins_over_result() {
        let response: RpcResponse<Bytes> = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":3,"message":"execution reverted"}}"#,
        )
        .unwrap();
        assert!(matches!(
            response.into_result(),
            Err(DonetteError::Rpc { code: 3, .. })
        ));
    }

    #[test]
    fn response_result_decodes_hex_bytes() {
        let response: RpcResponse<Bytes> =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":1,"result":"0x0102"}"#).unwrap();
        assert_eq!(response.into_result().unwrap(), Bytes::from(vec![1u8, 2]));
    }

    #[test]
    fn missing_result_is_empty() {
        let response: RpcResponse<Bytes> =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":1}"#).unwrap();
        assert!(matches!(response.into_result(), Err(DonetteError::EmptyResult)));
    }
}
