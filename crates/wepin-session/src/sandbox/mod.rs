/*
[INPUT]:  SandboxConfig and application credentials
[OUTPUT]: In-process wallet, login and provider SDK implementations
[POS]:    Sandbox layer - stand-in SDKs for the CLI and the test suite
[UPDATE]: When the SDK seams change or new failure points are needed
*/

//! Sandbox SDKs sharing one in-memory wallet.
//!
//! The three handles returned by [`Sandbox::services`] see the same state,
//! the way the hosted SDKs share one login session. Every entry point is
//! counted and can be made to fail on demand.

mod provider;
mod wallet;

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use alloy_signer_local::PrivateKeySigner;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, SessionError};
use crate::sdk::{AppCredentials, Services};
use crate::types::{
    AuthProvider, LifecycleStatus, LoginResultStatus, LoginStatus, UserInfo, UserStatus,
    UserToken, WepinUser,
};

pub use provider::SandboxProvider;
use provider::SandboxProviderSdk;
use wallet::{SandboxLogin, SandboxWallet};

/// Well-known development key (first anvil/hardhat account)
const DEFAULT_SIGNER_KEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Entry points that can be counted and made to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SandboxOperation {
    WalletInit,
    LoginInit,
    ProviderInit,
    GetStatus,
    LoginWithUi,
    OauthLogin,
    LoginWepin,
    CurrentUser,
    Register,
    Logout,
    OpenWidget,
    GetProvider,
    Request,
}

impl SandboxOperation {
    pub fn name(self) -> &'static str {
        match self {
            SandboxOperation::WalletInit => "wallet init",
            SandboxOperation::LoginInit => "login init",
            SandboxOperation::ProviderInit => "provider init",
            SandboxOperation::GetStatus => "getStatus",
            SandboxOperation::LoginWithUi => "loginWithUI",
            SandboxOperation::OauthLogin => "loginWithOauthProvider",
            SandboxOperation::LoginWepin => "loginWepin",
            SandboxOperation::CurrentUser => "getCurrentWepinUser",
            SandboxOperation::Register => "register",
            SandboxOperation::Logout => "logout",
            SandboxOperation::OpenWidget => "openWidget",
            SandboxOperation::GetProvider => "getProvider",
            SandboxOperation::Request => "request",
        }
    }
}

/// Behaviour of the sandbox wallet
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SandboxConfig {
    /// Status reported right after init; a logged-in value restores a user
    pub restored_status: LifecycleStatus,
    /// Logins land in `login_before_register` until `register` is called
    pub register_required: bool,
    /// Email reported in user profiles
    pub email: String,
    /// Hex private key used for `personal_sign`
    pub signer_key: String,
    /// Accounts returned by `eth_accounts`; empty means the signer address
    pub accounts: Vec<String>,
    /// Hex wei balance of the signer account
    pub balance_wei: String,
    /// Hex chain id reported by the provider handle, if any
    pub chain_id: Option<String>,
    /// Networks `getProvider` accepts
    pub networks: Vec<String>,
    /// Operations that fail from the start
    pub fail: Vec<SandboxOperation>,
    /// Artificial latency added to every call
    pub latency_ms: u64,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            restored_status: LifecycleStatus::NotLogin,
            register_required: false,
            email: "sandbox@wepin.local".to_string(),
            signer_key: DEFAULT_SIGNER_KEY.to_string(),
            accounts: Vec::new(),
            balance_wei: "0xde0b6b3a7640000".to_string(),
            chain_id: Some("0xaa36a7".to_string()),
            networks: vec!["ethereum".to_string(), "evmeth-sepolia".to_string()],
            fail: Vec::new(),
            latency_ms: 0,
        }
    }
}

#[derive(Debug)]
struct SandboxState {
    wallet_ready: bool,
    login_ready: bool,
    provider_ready: bool,
    status: LifecycleStatus,
    user: Option<WepinUser>,
    accounts: Vec<String>,
    balances: HashMap<String, String>,
    selected: Option<String>,
    nonce: u64,
    calls: HashMap<SandboxOperation, usize>,
    failing: HashSet<SandboxOperation>,
}

struct SandboxShared {
    config: SandboxConfig,
    credentials: AppCredentials,
    signer: PrivateKeySigner,
    state: Mutex<SandboxState>,
}

impl SandboxShared {
    fn with_state<R>(&self, f: impl FnOnce(&mut SandboxState) -> R) -> R {
        let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// Count the call, wait out the configured latency, apply failure injection
    async fn enter(&self, operation: SandboxOperation) -> Result<()> {
        let failing = self.with_state(|state| {
            *state.calls.entry(operation).or_default() += 1;
            state.failing.contains(&operation)
        });

        if self.config.latency_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.latency_ms)).await;
        }

        if failing {
            tracing::debug!(operation = operation.name(), "sandbox injected failure");
            return Err(SessionError::sdk(operation.name(), "sandbox injected failure"));
        }
        Ok(())
    }

    fn require_wallet(&self, operation: SandboxOperation) -> Result<()> {
        if self.with_state(|state| state.wallet_ready) {
            Ok(())
        } else {
            Err(SessionError::sdk(operation.name(), "wallet SDK is not initialized"))
        }
    }

    fn check_credentials(&self, operation: SandboxOperation) -> Result<()> {
        if self.credentials.app_id.trim().is_empty() || self.credentials.app_key.trim().is_empty() {
            return Err(SessionError::sdk(operation.name(), "invalid app credentials"));
        }
        Ok(())
    }

    /// Log the user in and report the resulting profile
    fn sign_in(&self, provider: AuthProvider) -> WepinUser {
        let status = if self.config.register_required {
            LifecycleStatus::LoginBeforeRegister
        } else {
            LifecycleStatus::Login
        };
        let user = self.make_user(provider, status);
        self.with_state(|state| {
            state.status = status;
            state.user = Some(user.clone());
        });
        user
    }

    fn make_user(&self, provider: AuthProvider, status: LifecycleStatus) -> WepinUser {
        let registered = status == LifecycleStatus::Login;
        WepinUser {
            status: LoginResultStatus::Success,
            user_info: Some(UserInfo {
                user_id: format!("sandbox-{}", self.credentials.app_id),
                email: self.config.email.clone(),
                provider,
                use_2fa: false,
            }),
            wallet_id: registered.then(|| "sandbox-wallet".to_string()),
            user_status: Some(UserStatus {
                login_status: if registered {
                    LoginStatus::Complete
                } else {
                    LoginStatus::RegisterRequired
                },
                pin_required: Some(!registered),
            }),
            token: Some(UserToken {
                access_token: Uuid::new_v4().to_string(),
                refresh_token: Uuid::new_v4().to_string(),
            }),
        }
    }
}

/// In-process stand-in for the three SDKs
#[derive(Clone)]
pub struct Sandbox {
    shared: Arc<SandboxShared>,
}

impl fmt::Debug for Sandbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sandbox")
            .field("signer", &self.signer_address())
            .field("status", &self.status())
            .finish_non_exhaustive()
    }
}

impl Sandbox {
    pub fn new(credentials: AppCredentials, config: SandboxConfig) -> Result<Self> {
        let key = config
            .signer_key
            .trim()
            .strip_prefix("0x")
            .unwrap_or(config.signer_key.trim());
        let signer = PrivateKeySigner::from_str(key)
            .map_err(|e| SessionError::Config(format!("Invalid sandbox signer key: {e}")))?;
        let signer_address = signer.address().to_checksum(None);

        let accounts = if config.accounts.is_empty() {
            vec![signer_address.clone()]
        } else {
            config.accounts.clone()
        };
        let balances = HashMap::from([(signer_address.to_ascii_lowercase(), config.balance_wei.clone())]);

        let state = SandboxState {
            wallet_ready: false,
            login_ready: false,
            provider_ready: false,
            status: LifecycleStatus::NotInitialized,
            user: None,
            accounts,
            balances,
            selected: None,
            nonce: 0,
            calls: HashMap::new(),
            failing: config.fail.iter().copied().collect(),
        };

        Ok(Self {
            shared: Arc::new(SandboxShared {
                config,
                credentials,
                signer,
                state: Mutex::new(state),
            }),
        })
    }

    /// Handles for dependency injection into a session
    pub fn services(&self) -> Services {
        Services::new(
            Arc::new(SandboxWallet::new(Arc::clone(&self.shared))),
            Arc::new(SandboxLogin::new(Arc::clone(&self.shared))),
            Arc::new(SandboxProviderSdk::new(Arc::clone(&self.shared))),
        )
    }

    /// Checksummed address of the signing key
    pub fn signer_address(&self) -> String {
        self.shared.signer.address().to_checksum(None)
    }

    pub fn fail_on(&self, operation: SandboxOperation) {
        self.shared.with_state(|state| {
            state.failing.insert(operation);
        });
    }

    pub fn recover(&self, operation: SandboxOperation) {
        self.shared.with_state(|state| {
            state.failing.remove(&operation);
        });
    }

    /// Number of times `operation` was invoked
    pub fn calls(&self, operation: SandboxOperation) -> usize {
        self.shared
            .with_state(|state| state.calls.get(&operation).copied().unwrap_or(0))
    }

    /// Number of RPC requests issued through any provider handle
    pub fn request_count(&self) -> usize {
        self.calls(SandboxOperation::Request)
    }

    pub fn status(&self) -> LifecycleStatus {
        self.shared.with_state(|state| state.status)
    }

    /// Current hex wei balance of `address`
    pub fn balance_of(&self, address: &str) -> Option<String> {
        self.shared.with_state(|state| {
            state
                .balances
                .get(&address.to_ascii_lowercase())
                .cloned()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> AppCredentials {
        AppCredentials::new("app-test", "ak_test")
    }

    #[test]
    fn test_default_accounts_use_signer_address() {
        let sandbox = Sandbox::new(credentials(), SandboxConfig::default()).unwrap();
        assert_eq!(
            sandbox.signer_address(),
            "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
        );
        assert_eq!(
            sandbox.balance_of("0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266").as_deref(),
            Some("0xde0b6b3a7640000")
        );
    }

    #[test]
    fn test_invalid_signer_key_is_config_error() {
        let config = SandboxConfig {
            signer_key: "0xnot-a-key".to_string(),
            ..SandboxConfig::default()
        };
        let err = Sandbox::new(credentials(), config).unwrap_err();
        assert!(matches!(err, SessionError::Config(_)));
    }

    #[test]
    fn test_config_from_partial_json() {
        let config: SandboxConfig = serde_json::from_value(serde_json::json!({
            "register_required": true,
            "fail": ["get_provider"],
        }))
        .unwrap();
        assert!(config.register_required);
        assert_eq!(config.fail, vec![SandboxOperation::GetProvider]);
        assert_eq!(config.restored_status, LifecycleStatus::NotLogin);
    }

    #[tokio::test]
    async fn test_failure_injection_toggles() {
        let sandbox = Sandbox::new(credentials(), SandboxConfig::default()).unwrap();
        let services = sandbox.services();

        sandbox.fail_on(SandboxOperation::WalletInit);
        assert!(services.wallet.init().await.is_err());

        sandbox.recover(SandboxOperation::WalletInit);
        assert!(services.wallet.init().await.is_ok());
        assert_eq!(sandbox.calls(SandboxOperation::WalletInit), 2);
        assert_eq!(sandbox.status(), LifecycleStatus::NotLogin);
    }
}
