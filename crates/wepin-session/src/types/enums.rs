/*
[INPUT]:  Wallet SDK vocabulary and serde requirements
[OUTPUT]: Typed Rust enums with serialization support
[POS]:    Data layer - closed sets reported by the external SDKs
[UPDATE]: When the SDK adds statuses or auth providers
*/

use serde::{Deserialize, Serialize};

/// Session lifecycle as reported by the wallet SDK
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleStatus {
    NotInitialized,
    Initializing,
    LoginBeforeRegister,
    Login,
    NotLogin,
}

impl LifecycleStatus {
    /// Statuses the SDK may report once initialization resolved
    pub fn is_post_init(self) -> bool {
        matches!(
            self,
            LifecycleStatus::NotLogin | LifecycleStatus::Login | LifecycleStatus::LoginBeforeRegister
        )
    }

    pub fn is_logged_in(self) -> bool {
        matches!(
            self,
            LifecycleStatus::Login | LifecycleStatus::LoginBeforeRegister
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LifecycleStatus::NotInitialized => "not_initialized",
            LifecycleStatus::Initializing => "initializing",
            LifecycleStatus::LoginBeforeRegister => "login_before_register",
            LifecycleStatus::Login => "login",
            LifecycleStatus::NotLogin => "not_login",
        }
    }
}

impl std::fmt::Display for LifecycleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthProvider {
    Google,
    Apple,
    Email,
    Discord,
    Naver,
    ExternalToken,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginResultStatus {
    Success,
    Fail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LoginStatus {
    Complete,
    PinRequired,
    RegisterRequired,
}
