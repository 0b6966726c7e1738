/*
[INPUT]:  Provider SDK client and network identifier
[OUTPUT]: Blockchain provider handles issuing RPC calls
[POS]:    SDK layer - blockchain provider abstraction
[UPDATE]: When provider handle capabilities change
*/

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::types::RpcCall;

/// Provider SDK that hands out per-network provider handles
#[async_trait]
pub trait ProviderSdk: Send + Sync {
    async fn init(&self) -> Result<()>;

    async fn get_provider(&self, network: &str) -> Result<Box<dyn BlockchainProvider>>;
}

/// Handle to one blockchain network
#[async_trait]
pub trait BlockchainProvider: Send + Sync {
    async fn request(&self, call: RpcCall) -> Result<Value>;

    /// Address the provider currently treats as active
    fn selected_address(&self) -> Option<String>;

    /// Chain id as the raw hex string the provider reports
    fn chain_id(&self) -> Option<String>;
}
