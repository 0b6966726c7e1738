/*
[INPUT]:  Wallet SDK client
[OUTPUT]: Lifecycle status, login/registration results
[POS]:    SDK layer - wallet SDK abstraction
[UPDATE]: When the wallet SDK methods used by the session change
*/

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{LifecycleStatus, WepinUser};

/// Wallet SDK operations the session drives
///
/// Implementations own key management and the hosted login UI; the session
/// only sequences these calls.
#[async_trait]
pub trait WalletSdk: Send + Sync {
    async fn init(&self) -> Result<()>;

    /// Current lifecycle status as tracked by the SDK
    async fn get_status(&self) -> Result<LifecycleStatus>;

    /// Run the SDK's built-in login UI
    async fn login_with_ui(&self) -> Result<WepinUser>;

    /// Complete registration for a user in `login_before_register`
    async fn register(&self) -> Result<WepinUser>;

    async fn logout(&self) -> Result<()>;

    /// Show the hosted wallet widget
    async fn open_widget(&self) -> Result<()>;
}
