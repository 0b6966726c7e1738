/*
[INPUT]:  Wallet and login SDKs, current session store
[OUTPUT]: Login, logout and registration transitions with refreshed status
[POS]:    Session layer - authentication controller
[UPDATE]: When auth flows or registration rules change
*/

use tracing::info;

use crate::error::Result;
use crate::types::{LifecycleStatus, WepinUser};

use super::machine::LifecycleEvent;
use super::notice::Notice;
use super::store::StoreState;
use super::SessionManager;

/// Result of a registration request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    Registered(WepinUser),
    /// Registration flag was not set; nothing was sent to the SDK
    NotRequired,
}

impl SessionManager {
    /// Log in through the wallet SDK's hosted UI
    pub async fn login_with_ui(&self) -> Result<WepinUser> {
        let result = self.run_login_with_ui().await;
        self.report("loginWithUI", result)
    }

    async fn run_login_with_ui(&self) -> Result<WepinUser> {
        self.require_initialized()?;
        let _permit = self.guard.try_acquire("loginWithUI")?;

        let user = self.services.wallet.login_with_ui().await?;
        let status = self.services.wallet.get_status().await?;
        self.commit_login(user, status)
    }

    /// Log in with the configured OAuth provider and exchange the result
    /// for a wallet session
    pub async fn login_with_oauth(&self) -> Result<WepinUser> {
        let result = self.run_login_with_oauth().await;
        self.report("loginWithOAuth", result)
    }

    async fn run_login_with_oauth(&self) -> Result<WepinUser> {
        self.require_initialized()?;
        let _permit = self.guard.try_acquire("loginWithOAuth")?;

        let provider = self.config.oauth_provider;
        let oauth_user = self
            .services
            .login
            .login_with_oauth_provider(provider)
            .await?;
        let user = self.services.login.login_wepin(&oauth_user).await?;
        let status = self.services.wallet.get_status().await?;
        self.commit_login(user, status)
    }

    /// The registration flag follows the status read after this login only.
    fn commit_login(&self, user: WepinUser, status: LifecycleStatus) -> Result<WepinUser> {
        let status = self.store.write(|state| -> Result<LifecycleStatus> {
            let status = state.machine.dispatch(LifecycleEvent::LoggedIn(status))?;
            state.profile = Some(user.clone());
            state.registration_needed = status == LifecycleStatus::LoginBeforeRegister;
            Ok(status)
        })?;

        info!(
            %status,
            email = user.email().unwrap_or("unknown"),
            registration_needed = status == LifecycleStatus::LoginBeforeRegister,
            "logged in"
        );
        Ok(user)
    }

    /// Log out and drop profile, accounts and balance together
    pub async fn logout(&self) -> Result<LifecycleStatus> {
        let result = self.run_logout().await;
        self.report("logout", result)
    }

    async fn run_logout(&self) -> Result<LifecycleStatus> {
        self.require_initialized()?;
        let _permit = self.guard.try_acquire("logout")?;

        self.services.wallet.logout().await?;
        let status = self.services.wallet.get_status().await?;

        let status = self.store.write(|state| -> Result<LifecycleStatus> {
            let status = state.machine.dispatch(LifecycleEvent::LoggedOut(status))?;
            StoreState::clear_user_data(state);
            Ok(status)
        })?;

        info!(%status, "logged out");
        Ok(status)
    }

    /// Complete registration when the last login asked for it
    pub async fn register_wepin(&self) -> Result<RegisterOutcome> {
        let result = self.run_register().await;
        self.report("registerWepin", result)
    }

    async fn run_register(&self) -> Result<RegisterOutcome> {
        if !self.store.registration_needed() {
            info!("registration not required");
            self.notify(Notice::info("No registration required."));
            return Ok(RegisterOutcome::NotRequired);
        }
        let _permit = self.guard.try_acquire("registerWepin")?;

        let user = self.services.wallet.register().await?;
        let status = self.services.wallet.get_status().await?;

        let status = self.store.write(|state| -> Result<LifecycleStatus> {
            let status = state.machine.dispatch(LifecycleEvent::Registered(status))?;
            state.profile = Some(user.clone());
            state.registration_needed = false;
            Ok(status)
        })?;

        info!(%status, wallet_id = ?user.wallet_id, "registration complete");
        Ok(RegisterOutcome::Registered(user))
    }

    /// Show the wallet SDK's widget
    pub async fn open_widget(&self) -> Result<()> {
        let result = self.run_open_widget().await;
        self.report("openWidget", result)
    }

    async fn run_open_widget(&self) -> Result<()> {
        self.require_initialized()?;
        let _permit = self.guard.try_acquire("openWidget")?;
        self.services.wallet.open_widget().await
    }
}
