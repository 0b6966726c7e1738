/*
[INPUT]:  Provider handle and selected address from the session store
[OUTPUT]: Account list, formatted balance, signatures, transaction hashes
[POS]:    Session layer - account/asset query controller
[UPDATE]: When adding provider-backed queries
*/

use std::str::FromStr;
use std::sync::Arc;

use alloy_primitives::Address;
use tracing::{debug, info};

use crate::error::{Result, SessionError};
use crate::sdk::BlockchainProvider;
use crate::types::{RpcCall, TransactionRequest, decode_accounts, decode_string};
use crate::units::{format_wei_hex, parse_ether_amount, to_hex_quantity};

use super::SessionManager;
use super::notice::Notice;

impl SessionManager {
    fn require_provider(&self) -> Result<Arc<dyn BlockchainProvider>> {
        self.store
            .provider()
            .ok_or(SessionError::ProviderNotInitialized)
    }

    /// Address is checked before the provider so the user is told to pick an
    /// account first.
    fn require_address_and_provider(&self) -> Result<(String, Arc<dyn BlockchainProvider>)> {
        let address = self
            .store
            .current_address()
            .ok_or(SessionError::NoAccountSelected)?;
        let provider = self.require_provider()?;
        Ok((address, provider))
    }

    /// Fetch the account list and adopt the provider's selected address
    pub async fn get_accounts(&self) -> Result<Vec<String>> {
        let result = self.run_get_accounts().await;
        self.report("getAccounts", result)
    }

    async fn run_get_accounts(&self) -> Result<Vec<String>> {
        let provider = self.require_provider()?;
        let _permit = self.guard.try_acquire("getAccounts")?;

        let response = provider.request(RpcCall::eth_accounts()).await?;
        let accounts = decode_accounts(response)?;
        let selected = provider.selected_address();

        self.store.write(|state| {
            state.accounts = Some(accounts.clone());
            state.current_address = selected.clone();
        });

        info!(count = accounts.len(), selected = ?selected, "accounts fetched");
        Ok(accounts)
    }

    /// Query the selected address's balance at the latest block, in ether
    pub async fn get_balance(&self) -> Result<String> {
        let result = self.run_get_balance().await;
        self.report("getBalance", result)
    }

    async fn run_get_balance(&self) -> Result<String> {
        let (address, provider) = self.require_address_and_provider()?;
        let _permit = self.guard.try_acquire("getBalance")?;

        let response = provider.request(RpcCall::eth_get_balance(&address)).await?;
        let raw = decode_string("eth_getBalance", response)?;
        let balance = format_wei_hex(&raw)?;
        debug!(%address, %raw, %balance, "balance decoded");

        self.store
            .write(|state| state.balance = Some(balance.clone()));
        Ok(balance)
    }

    /// Personal-sign `message` with the selected address
    pub async fn sign_message(&self, message: &str) -> Result<String> {
        let result = self.run_sign_message(message).await;
        self.report("signMessage", result)
    }

    async fn run_sign_message(&self, message: &str) -> Result<String> {
        let (address, provider) = self.require_address_and_provider()?;
        let _permit = self.guard.try_acquire("signMessage")?;

        let response = provider
            .request(RpcCall::personal_sign(message, &address))
            .await?;
        let signature = decode_string("personal_sign", response)?;

        info!(%address, "message signed");
        self.notify(Notice::info(format!("Signed message: {signature}")));
        Ok(signature)
    }

    /// Send `amount` (native units, e.g. "0.01") from the selected address
    pub async fn send_transaction(&self, to: &str, amount: &str) -> Result<String> {
        let result = self.run_send_transaction(to, amount).await;
        self.report("sendTransaction", result)
    }

    async fn run_send_transaction(&self, to: &str, amount: &str) -> Result<String> {
        let (address, provider) = self.require_address_and_provider()?;

        let recipient = to.trim();
        Address::from_str(recipient)
            .map_err(|e| SessionError::InvalidRecipient(format!("'{recipient}': {e}")))?;
        let value = to_hex_quantity(parse_ether_amount(amount)?);

        let _permit = self.guard.try_acquire("sendTransaction")?;
        let tx = TransactionRequest {
            from: address,
            to: recipient.to_string(),
            value,
        };
        let response = provider.request(RpcCall::eth_send_transaction(&tx)?).await?;
        let tx_hash = decode_string("eth_sendTransaction", response)?;

        info!(from = %tx.from, to = %tx.to, value = %tx.value, %tx_hash, "transaction sent");
        self.notify(Notice::info(format!("Transaction sent: {tx_hash}")));
        Ok(tx_hash)
    }
}
