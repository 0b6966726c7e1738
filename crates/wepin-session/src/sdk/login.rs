/*
[INPUT]:  Login SDK client
[OUTPUT]: OAuth results exchanged for wallet sessions
[POS]:    SDK layer - OAuth login abstraction
[UPDATE]: When the login SDK methods used by the session change
*/

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{AuthProvider, OAuthUser, WepinUser};

/// Login SDK operations for the OAuth flow
#[async_trait]
pub trait LoginSdk: Send + Sync {
    async fn init(&self) -> Result<()>;

    async fn login_with_oauth_provider(&self, provider: AuthProvider) -> Result<OAuthUser>;

    /// Exchange an OAuth result for a wallet session
    async fn login_wepin(&self, oauth_user: &OAuthUser) -> Result<WepinUser>;

    /// Profile of the user restored from a previous session, if any
    async fn current_wepin_user(&self) -> Result<Option<WepinUser>>;
}
