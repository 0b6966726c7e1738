/*
[INPUT]:  Wallet, login and provider SDKs; configured network
[OUTPUT]: Initial lifecycle status, provider handle, chain id
[POS]:    Session layer - startup sequencing of the external services
[UPDATE]: When startup steps or their order change
*/

use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{Result, SessionError};
use crate::sdk::BlockchainProvider;
use crate::types::LifecycleStatus;
use crate::units::decode_chain_id;

use super::SessionManager;
use super::machine::{LifecycleEvent, LifecycleMachine, TransitionError};

const OPERATION: &str = "initialize";

impl SessionManager {
    /// Bring up the wallet, login and provider SDKs, in that order.
    ///
    /// Each SDK must be ready before the next starts. Once all three are up
    /// the status moves to `initializing`; status, provider handle, chain id
    /// and any restored profile are then committed together. A failed run
    /// may be retried; a successful one cannot be repeated.
    pub async fn initialize(&self) -> Result<LifecycleStatus> {
        let result = self.run_initialize().await;
        self.report(OPERATION, result)
    }

    async fn run_initialize(&self) -> Result<LifecycleStatus> {
        if self.status().is_post_init() {
            return Err(SessionError::AlreadyInitialized);
        }
        let _permit = self.guard.try_acquire(OPERATION)?;
        info!(network = %self.config.network, "initializing wallet session");

        self.services.wallet.init().await?;
        debug!("wallet sdk ready");
        self.services.login.init().await?;
        debug!("login sdk ready");
        self.services.provider.init().await?;
        debug!("provider sdk ready");

        if self.status() == LifecycleStatus::NotInitialized {
            self.store
                .write(|state| state.machine.dispatch(LifecycleEvent::InitSucceeded))?;
        }

        let status = self.services.wallet.get_status().await?;
        let fetched = LifecycleEvent::StatusFetched(status);
        if LifecycleMachine::next(LifecycleStatus::Initializing, fetched).is_none() {
            return Err(TransitionError::InvalidTransition {
                from: LifecycleStatus::Initializing,
                event: fetched,
            }
            .into());
        }

        let provider: Arc<dyn BlockchainProvider> = self
            .services
            .provider
            .get_provider(&self.config.network)
            .await?
            .into();
        let raw_chain_id = provider.chain_id();
        let chain_id = decode_chain_id(raw_chain_id.as_deref())?;
        debug!(raw = ?raw_chain_id, chain_id, "provider handle acquired");

        let profile = if status.is_logged_in() {
            self.services.login.current_wepin_user().await?
        } else {
            None
        };

        let status = self.store.write(|state| -> Result<LifecycleStatus> {
            let status = state.machine.dispatch(fetched)?;
            state.provider = Some(provider);
            state.chain_id = Some(chain_id);
            state.profile = profile;
            state.registration_needed = status == LifecycleStatus::LoginBeforeRegister;
            Ok(status)
        })?;

        info!(%status, chain_id, "wallet session initialized");
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::config::SessionConfig;
    use crate::error::SessionError;
    use crate::sandbox::{Sandbox, SandboxConfig, SandboxOperation};
    use crate::sdk::AppCredentials;
    use crate::session::{MemoryNotifier, NoticeLevel, SessionManager};
    use crate::types::LifecycleStatus;

    fn setup(config: SandboxConfig) -> (Sandbox, SessionManager, Arc<MemoryNotifier>) {
        let credentials = AppCredentials::new("app-test", "ak_test");
        let sandbox = Sandbox::new(credentials.clone(), config).unwrap();
        let notifier = Arc::new(MemoryNotifier::new());
        let manager = SessionManager::new(
            sandbox.services(),
            SessionConfig::new(credentials),
            notifier.clone(),
        )
        .unwrap();
        (sandbox, manager, notifier)
    }

    #[tokio::test]
    async fn test_initialize_success() {
        let (_sandbox, manager, _notifier) = setup(SandboxConfig::default());

        let status = manager.initialize().await.unwrap();
        assert_eq!(status, LifecycleStatus::NotLogin);

        let snapshot = manager.snapshot();
        assert_eq!(snapshot.status, LifecycleStatus::NotLogin);
        assert_eq!(snapshot.chain_id, Some(11_155_111));
        assert!(snapshot.provider_ready);
        assert!(!snapshot.registration_needed);
        assert!(snapshot.profile.is_none());
    }

    #[tokio::test]
    async fn test_initialize_runs_services_in_order_and_stops_on_failure() {
        let (sandbox, manager, notifier) = setup(SandboxConfig {
            fail: vec![SandboxOperation::LoginInit],
            ..SandboxConfig::default()
        });

        assert!(manager.initialize().await.is_err());
        assert_eq!(sandbox.calls(SandboxOperation::WalletInit), 1);
        assert_eq!(sandbox.calls(SandboxOperation::LoginInit), 1);
        assert_eq!(sandbox.calls(SandboxOperation::ProviderInit), 0);
        assert_eq!(manager.status(), LifecycleStatus::NotInitialized);
        assert_eq!(notifier.notices()[0].level, NoticeLevel::Error);
    }

    #[tokio::test]
    async fn test_provider_failure_leaves_initializing_and_allows_retry() {
        let (sandbox, manager, _notifier) = setup(SandboxConfig {
            fail: vec![SandboxOperation::GetProvider],
            ..SandboxConfig::default()
        });

        assert!(manager.initialize().await.is_err());
        assert_eq!(manager.status(), LifecycleStatus::Initializing);
        assert!(!manager.snapshot().provider_ready);

        sandbox.recover(SandboxOperation::GetProvider);
        assert_eq!(
            manager.initialize().await.unwrap(),
            LifecycleStatus::NotLogin
        );
    }

    #[tokio::test]
    async fn test_initialize_only_once() {
        let (sandbox, manager, _notifier) = setup(SandboxConfig::default());
        manager.initialize().await.unwrap();

        let err = manager.initialize().await.unwrap_err();
        assert!(matches!(err, SessionError::AlreadyInitialized));
        assert_eq!(sandbox.calls(SandboxOperation::WalletInit), 1);
    }

    #[tokio::test]
    async fn test_login_before_register_sets_flag() {
        let (_sandbox, manager, _notifier) = setup(SandboxConfig {
            restored_status: LifecycleStatus::LoginBeforeRegister,
            ..SandboxConfig::default()
        });

        manager.initialize().await.unwrap();
        assert!(manager.snapshot().registration_needed);
        assert!(manager.snapshot().profile.is_some());
    }

    #[tokio::test]
    async fn test_absent_chain_id_decodes_to_zero() {
        let (_sandbox, manager, _notifier) = setup(SandboxConfig {
            chain_id: None,
            ..SandboxConfig::default()
        });

        manager.initialize().await.unwrap();
        assert_eq!(manager.snapshot().chain_id, Some(0));
    }

    #[tokio::test]
    async fn test_undecodable_chain_id_aborts() {
        let (_sandbox, manager, _notifier) = setup(SandboxConfig {
            chain_id: Some("0xzz".to_string()),
            ..SandboxConfig::default()
        });

        let err = manager.initialize().await.unwrap_err();
        assert!(matches!(err, SessionError::Decode(_)));
        assert!(!manager.snapshot().provider_ready);
    }
}
