/*
[INPUT]:  Wallet and login SDK result schemas
[OUTPUT]: User profile and OAuth result structs
[POS]:    Data layer - values handed back by login and registration
[UPDATE]: When the SDK user schema changes
*/

use serde::{Deserialize, Serialize};

use super::enums::{AuthProvider, LoginResultStatus, LoginStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub user_id: String,
    pub email: String,
    pub provider: AuthProvider,
    #[serde(rename = "use2FA")]
    pub use_2fa: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatus {
    pub login_status: LoginStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin_required: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserToken {
    pub access_token: String,
    pub refresh_token: String,
}

/// User profile returned by a login or registration call
///
/// Replaced as a whole on every successful call, never patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WepinUser {
    pub status: LoginResultStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_info: Option<UserInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_status: Option<UserStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<UserToken>,
}

impl WepinUser {
    pub fn email(&self) -> Option<&str> {
        self.user_info.as_ref().map(|info| info.email.as_str())
    }
}

/// Result of the OAuth step, handed back to the login SDK untouched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthUser {
    pub provider: AuthProvider,
    pub id_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}
