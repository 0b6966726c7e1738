/*
[INPUT]:  Shared sandbox state
[OUTPUT]: WalletSdk and LoginSdk implementations
[POS]:    Sandbox layer - login lifecycle of the stand-in wallet
[UPDATE]: When the wallet or login SDK seams change
*/

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::{Result, SessionError};
use crate::sdk::{LoginSdk, WalletSdk};
use crate::types::{AuthProvider, LifecycleStatus, OAuthUser, WepinUser};

use super::{SandboxOperation as Op, SandboxShared};

pub(super) struct SandboxWallet {
    shared: Arc<SandboxShared>,
}

impl SandboxWallet {
    pub(super) fn new(shared: Arc<SandboxShared>) -> Self {
        Self { shared }
    }
}

#[async_trait]
impl WalletSdk for SandboxWallet {
    async fn init(&self) -> Result<()> {
        self.shared.enter(Op::WalletInit).await?;
        self.shared.check_credentials(Op::WalletInit)?;

        let restored = self.shared.config.restored_status;
        let user = restored
            .is_logged_in()
            .then(|| self.shared.make_user(AuthProvider::Email, restored));
        self.shared.with_state(|state| {
            state.wallet_ready = true;
            state.status = if restored.is_post_init() {
                restored
            } else {
                LifecycleStatus::NotLogin
            };
            state.user = user;
        });
        Ok(())
    }

    async fn get_status(&self) -> Result<LifecycleStatus> {
        self.shared.enter(Op::GetStatus).await?;
        Ok(self.shared.with_state(|state| state.status))
    }

    async fn login_with_ui(&self) -> Result<WepinUser> {
        self.shared.enter(Op::LoginWithUi).await?;
        self.shared.require_wallet(Op::LoginWithUi)?;
        Ok(self.shared.sign_in(AuthProvider::Email))
    }

    async fn register(&self) -> Result<WepinUser> {
        self.shared.enter(Op::Register).await?;
        self.shared.require_wallet(Op::Register)?;

        let current = self.shared.with_state(|state| state.status);
        if current != LifecycleStatus::LoginBeforeRegister {
            return Err(SessionError::sdk(
                Op::Register.name(),
                format!("user is in '{current}', nothing to register"),
            ));
        }

        let provider = self
            .shared
            .with_state(|state| {
                state
                    .user
                    .as_ref()
                    .and_then(|user| user.user_info.as_ref())
                    .map(|info| info.provider)
            })
            .unwrap_or(AuthProvider::Email);
        let user = self.shared.make_user(provider, LifecycleStatus::Login);
        self.shared.with_state(|state| {
            state.status = LifecycleStatus::Login;
            state.user = Some(user.clone());
        });
        Ok(user)
    }

    async fn logout(&self) -> Result<()> {
        self.shared.enter(Op::Logout).await?;
        self.shared.require_wallet(Op::Logout)?;
        self.shared.with_state(|state| {
            state.status = LifecycleStatus::NotLogin;
            state.user = None;
            state.selected = None;
        });
        Ok(())
    }

    async fn open_widget(&self) -> Result<()> {
        self.shared.enter(Op::OpenWidget).await?;
        self.shared.require_wallet(Op::OpenWidget)?;
        let status = self.shared.with_state(|state| state.status);
        if status != LifecycleStatus::Login {
            return Err(SessionError::sdk(
                Op::OpenWidget.name(),
                format!("widget requires a registered login, status is '{status}'"),
            ));
        }
        tracing::info!("sandbox widget opened");
        Ok(())
    }
}

pub(super) struct SandboxLogin {
    shared: Arc<SandboxShared>,
}

impl SandboxLogin {
    pub(super) fn new(shared: Arc<SandboxShared>) -> Self {
        Self { shared }
    }

    fn require_ready(&self, operation: Op) -> Result<()> {
        if self.shared.with_state(|state| state.login_ready) {
            Ok(())
        } else {
            Err(SessionError::sdk(operation.name(), "login SDK is not initialized"))
        }
    }
}

#[async_trait]
impl LoginSdk for SandboxLogin {
    async fn init(&self) -> Result<()> {
        self.shared.enter(Op::LoginInit).await?;
        self.shared.check_credentials(Op::LoginInit)?;
        self.shared.with_state(|state| state.login_ready = true);
        Ok(())
    }

    async fn login_with_oauth_provider(&self, provider: AuthProvider) -> Result<OAuthUser> {
        self.shared.enter(Op::OauthLogin).await?;
        self.require_ready(Op::OauthLogin)?;
        Ok(OAuthUser {
            provider,
            id_token: format!("sandbox-id-token-{}", Uuid::new_v4()),
            token: None,
        })
    }

    async fn login_wepin(&self, oauth_user: &OAuthUser) -> Result<WepinUser> {
        self.shared.enter(Op::LoginWepin).await?;
        self.require_ready(Op::LoginWepin)?;
        self.shared.require_wallet(Op::LoginWepin)?;
        if oauth_user.id_token.is_empty() {
            return Err(SessionError::sdk(Op::LoginWepin.name(), "empty id token"));
        }
        Ok(self.shared.sign_in(oauth_user.provider))
    }

    async fn current_wepin_user(&self) -> Result<Option<WepinUser>> {
        self.shared.enter(Op::CurrentUser).await?;
        self.require_ready(Op::CurrentUser)?;
        Ok(self.shared.with_state(|state| state.user.clone()))
    }
}
