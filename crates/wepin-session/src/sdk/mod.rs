/*
[INPUT]:  External wallet, login and provider SDK clients
[OUTPUT]: Trait seams and the injected service bundle
[POS]:    SDK layer - boundary between session logic and opaque collaborators
[UPDATE]: When the SDK surface used by the session changes
*/

pub mod login;
pub mod provider;
pub mod wallet;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use login::LoginSdk;
pub use provider::{BlockchainProvider, ProviderSdk};
pub use wallet::WalletSdk;

/// Application credentials passed to every SDK client constructor
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppCredentials {
    pub app_id: String,
    pub app_key: String,
}

impl AppCredentials {
    pub fn new(app_id: impl Into<String>, app_key: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            app_key: app_key.into(),
        }
    }
}

// app_key is a secret; keep it out of logs.
impl fmt::Debug for AppCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppCredentials")
            .field("app_id", &self.app_id)
            .field("app_key", &"<redacted>")
            .finish()
    }
}

/// The three SDK handles, built once at application start
#[derive(Clone)]
pub struct Services {
    pub wallet: Arc<dyn WalletSdk>,
    pub login: Arc<dyn LoginSdk>,
    pub provider: Arc<dyn ProviderSdk>,
}

impl Services {
    pub fn new(
        wallet: Arc<dyn WalletSdk>,
        login: Arc<dyn LoginSdk>,
        provider: Arc<dyn ProviderSdk>,
    ) -> Self {
        Self {
            wallet,
            login,
            provider,
        }
    }
}

impl fmt::Debug for Services {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Services").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_redacts_key() {
        let creds = AppCredentials::new("app-1", "ak_live_secret");
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("app-1"));
        assert!(!rendered.contains("ak_live_secret"));
    }
}
