/*
[INPUT]:  Shared sandbox state, RPC calls
[OUTPUT]: ProviderSdk and BlockchainProvider implementations
[POS]:    Sandbox layer - stand-in EVM provider handle
[UPDATE]: When adding RPC methods to the sandbox
*/

use std::sync::Arc;

use alloy_primitives::keccak256;
use alloy_signer::Signer;
use async_trait::async_trait;
use serde_json::{Value, json};

use crate::error::{Result, SessionError};
use crate::sdk::{BlockchainProvider, ProviderSdk};
use crate::types::{RpcCall, TransactionRequest};
use crate::units::{parse_wei_hex, to_hex_quantity};

use super::{SandboxOperation as Op, SandboxShared};

pub(super) struct SandboxProviderSdk {
    shared: Arc<SandboxShared>,
}

impl SandboxProviderSdk {
    pub(super) fn new(shared: Arc<SandboxShared>) -> Self {
        Self { shared }
    }
}

#[async_trait]
impl ProviderSdk for SandboxProviderSdk {
    async fn init(&self) -> Result<()> {
        self.shared.enter(Op::ProviderInit).await?;
        self.shared.check_credentials(Op::ProviderInit)?;
        self.shared.with_state(|state| state.provider_ready = true);
        Ok(())
    }

    async fn get_provider(&self, network: &str) -> Result<Box<dyn BlockchainProvider>> {
        self.shared.enter(Op::GetProvider).await?;
        if !self.shared.with_state(|state| state.provider_ready) {
            return Err(SessionError::sdk(
                Op::GetProvider.name(),
                "provider SDK is not initialized",
            ));
        }
        if !self.shared.config.networks.iter().any(|n| n == network) {
            return Err(SessionError::sdk(
                Op::GetProvider.name(),
                format!("unsupported network '{network}'"),
            ));
        }

        Ok(Box::new(SandboxProvider {
            shared: Arc::clone(&self.shared),
            network: network.to_string(),
        }))
    }
}

/// Provider handle bound to one sandbox network
pub struct SandboxProvider {
    shared: Arc<SandboxShared>,
    network: String,
}

impl SandboxProvider {
    pub fn network(&self) -> &str {
        &self.network
    }

    fn require_login(&self, method: &str) -> Result<()> {
        if self.shared.with_state(|state| state.status.is_logged_in()) {
            Ok(())
        } else {
            Err(SessionError::sdk(
                Op::Request.name(),
                format!("{method} requires a logged-in user"),
            ))
        }
    }

    fn accounts(&self) -> Result<Value> {
        self.require_login("eth_accounts")?;
        let accounts = self.shared.with_state(|state| {
            state.selected = state.accounts.first().cloned();
            state.accounts.clone()
        });
        Ok(json!(accounts))
    }

    fn balance(&self, params: &[Value]) -> Result<Value> {
        let address = string_param(params, 0, "eth_getBalance")?;
        let balance = self.shared.with_state(|state| {
            state
                .balances
                .get(&address.to_ascii_lowercase())
                .cloned()
                .unwrap_or_else(|| "0x0".to_string())
        });
        Ok(Value::String(balance))
    }

    async fn personal_sign(&self, params: &[Value]) -> Result<Value> {
        self.require_login("personal_sign")?;
        let message = string_param(params, 0, "personal_sign")?;
        let address = string_param(params, 1, "personal_sign")?;

        let signer_address = self.shared.signer.address().to_checksum(None);
        if !address.eq_ignore_ascii_case(&signer_address) {
            return Err(SessionError::sdk(
                Op::Request.name(),
                format!("no key for address {address}"),
            ));
        }

        let signature = self
            .shared
            .signer
            .sign_message(message.as_bytes())
            .await
            .map_err(|e| SessionError::sdk(Op::Request.name(), format!("signing failed: {e}")))?;
        Ok(Value::String(format!("0x{}", hex::encode(signature.as_bytes()))))
    }

    fn send_transaction(&self, params: &[Value]) -> Result<Value> {
        self.require_login("eth_sendTransaction")?;
        let tx: TransactionRequest = params
            .first()
            .cloned()
            .map(serde_json::from_value)
            .transpose()?
            .ok_or_else(|| {
                SessionError::sdk(Op::Request.name(), "eth_sendTransaction needs a transaction")
            })?;
        let value = parse_wei_hex(&tx.value)?;
        let from_key = tx.from.to_ascii_lowercase();

        self.shared.with_state(|state| -> Result<Value> {
            let available = state
                .balances
                .get(&from_key)
                .map(|raw| parse_wei_hex(raw))
                .transpose()?
                .unwrap_or_default();
            let remaining = available.checked_sub(value).ok_or_else(|| {
                SessionError::sdk(Op::Request.name(), "insufficient funds for transfer")
            })?;

            state.nonce += 1;
            let mut preimage = serde_json::to_vec(&tx)?;
            preimage.extend_from_slice(&state.nonce.to_be_bytes());
            let hash = keccak256(&preimage);

            state.balances.insert(from_key, to_hex_quantity(remaining));
            let to_key = tx.to.to_ascii_lowercase();
            let received = state
                .balances
                .get(&to_key)
                .map(|raw| parse_wei_hex(raw))
                .transpose()?
                .unwrap_or_default()
                .saturating_add(value);
            state.balances.insert(to_key, to_hex_quantity(received));

            Ok(Value::String(format!("0x{}", hex::encode(hash))))
        })
    }
}

#[async_trait]
impl BlockchainProvider for SandboxProvider {
    async fn request(&self, call: RpcCall) -> Result<Value> {
        self.shared.enter(Op::Request).await?;
        tracing::debug!(network = %self.network, method = %call.method, "sandbox rpc request");

        match call.method.as_str() {
            "eth_accounts" => self.accounts(),
            "eth_getBalance" => self.balance(&call.params),
            "personal_sign" => self.personal_sign(&call.params).await,
            "eth_sendTransaction" => self.send_transaction(&call.params),
            other => Err(SessionError::sdk(
                Op::Request.name(),
                format!("unsupported method {other}"),
            )),
        }
    }

    fn selected_address(&self) -> Option<String> {
        self.shared.with_state(|state| state.selected.clone())
    }

    fn chain_id(&self) -> Option<String> {
        self.shared.config.chain_id.clone()
    }
}

fn string_param(params: &[Value], index: usize, method: &str) -> Result<String> {
    params
        .get(index)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            SessionError::sdk(
                Op::Request.name(),
                format!("{method} parameter {index} must be a string"),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::super::{Sandbox, SandboxConfig};
    use crate::sdk::{AppCredentials, Services};
    use crate::types::{RpcCall, TransactionRequest};
    use serde_json::json;

    async fn logged_in() -> (Sandbox, Services) {
        let sandbox = Sandbox::new(
            AppCredentials::new("app-test", "ak_test"),
            SandboxConfig::default(),
        )
        .unwrap();
        let services = sandbox.services();
        services.wallet.init().await.unwrap();
        services.provider.init().await.unwrap();
        services.wallet.login_with_ui().await.unwrap();
        (sandbox, services)
    }

    #[tokio::test]
    async fn test_unknown_network_rejected() {
        let (_sandbox, services) = logged_in().await;
        assert!(services.provider.get_provider("dogechain").await.is_err());
    }

    #[tokio::test]
    async fn test_accounts_select_first_address() {
        let (sandbox, services) = logged_in().await;
        let provider = services.provider.get_provider("ethereum").await.unwrap();
        assert!(provider.selected_address().is_none());

        let accounts = provider.request(RpcCall::eth_accounts()).await.unwrap();
        assert_eq!(accounts, json!([sandbox.signer_address()]));
        assert_eq!(provider.selected_address(), Some(sandbox.signer_address()));
        assert_eq!(provider.chain_id().as_deref(), Some("0xaa36a7"));
    }

    #[tokio::test]
    async fn test_personal_sign_produces_65_byte_signature() {
        let (sandbox, services) = logged_in().await;
        let provider = services.provider.get_provider("ethereum").await.unwrap();

        let signature = provider
            .request(RpcCall::personal_sign("hello", &sandbox.signer_address()))
            .await
            .unwrap();
        let signature = signature.as_str().unwrap();
        assert!(signature.starts_with("0x"));
        assert_eq!(signature.len(), 132);
    }

    #[tokio::test]
    async fn test_send_transaction_moves_funds() {
        let (sandbox, services) = logged_in().await;
        let provider = services.provider.get_provider("ethereum").await.unwrap();
        let recipient = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";

        let tx = TransactionRequest {
            from: sandbox.signer_address(),
            to: recipient.to_string(),
            value: "0x6f05b59d3b20000".to_string(),
        };
        let hash = provider
            .request(RpcCall::eth_send_transaction(&tx).unwrap())
            .await
            .unwrap();
        assert_eq!(hash.as_str().unwrap().len(), 66);
        assert_eq!(
            sandbox.balance_of(&sandbox.signer_address()).as_deref(),
            Some("0x6f05b59d3b20000")
        );
        assert_eq!(
            sandbox.balance_of(recipient).as_deref(),
            Some("0x6f05b59d3b20000")
        );
    }

    #[tokio::test]
    async fn test_overdraft_rejected() {
        let (sandbox, services) = logged_in().await;
        let provider = services.provider.get_provider("ethereum").await.unwrap();
        let tx = TransactionRequest {
            from: sandbox.signer_address(),
            to: "0x70997970C51812dc3A010C7d01b50e0d17dc79C8".to_string(),
            value: "0x1bc16d674ec80000".to_string(),
        };
        assert!(
            provider
                .request(RpcCall::eth_send_transaction(&tx).unwrap())
                .await
                .is_err()
        );
    }
}
