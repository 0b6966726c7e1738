/*
[INPUT]:  RPC method names and parameters for the provider handle
[OUTPUT]: Typed RPC calls and response decoding helpers
[POS]:    Data layer - provider request/response shapes
[UPDATE]: When adding provider methods
*/

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, SessionError};

/// JSON-RPC style request issued through a provider handle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcCall {
    pub method: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Value>,
}

impl RpcCall {
    pub fn new(method: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            method: method.into(),
            params,
        }
    }

    pub fn eth_accounts() -> Self {
        Self::new("eth_accounts", Vec::new())
    }

    pub fn eth_get_balance(address: &str) -> Self {
        Self::new(
            "eth_getBalance",
            vec![Value::from(address), Value::from("latest")],
        )
    }

    pub fn personal_sign(message: &str, address: &str) -> Self {
        Self::new(
            "personal_sign",
            vec![Value::from(message), Value::from(address)],
        )
    }

    pub fn eth_send_transaction(tx: &TransactionRequest) -> Result<Self> {
        Ok(Self::new(
            "eth_sendTransaction",
            vec![serde_json::to_value(tx)?],
        ))
    }
}

/// Transaction object for `eth_sendTransaction`
///
/// `value` is a `0x`-prefixed hexadecimal wei quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub from: String,
    pub to: String,
    pub value: String,
}

/// Extract the address list from an `eth_accounts` response.
///
/// Accepts a bare array or an object wrapping it under `result`.
pub fn decode_accounts(value: Value) -> Result<Vec<String>> {
    let list = match value {
        Value::Array(_) => value,
        Value::Object(mut map) => map.remove("result").ok_or_else(|| {
            SessionError::InvalidResponse("eth_accounts response missing 'result'".to_string())
        })?,
        other => {
            return Err(SessionError::InvalidResponse(format!(
                "eth_accounts returned {other}"
            )));
        }
    };

    serde_json::from_value(list).map_err(|e| {
        SessionError::InvalidResponse(format!("eth_accounts result is not a string list: {e}"))
    })
}

/// Extract a string result, unwrapping an optional `result` envelope.
pub fn decode_string(method: &str, value: Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s),
        Value::Object(mut map) => match map.remove("result") {
            Some(Value::String(s)) => Ok(s),
            _ => Err(SessionError::InvalidResponse(format!(
                "{method} response missing string 'result'"
            ))),
        },
        other => Err(SessionError::InvalidResponse(format!(
            "{method} returned {other}"
        ))),
    }
}
