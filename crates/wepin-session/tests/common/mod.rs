/*
[INPUT]:  Sandbox configuration overrides
[OUTPUT]: Shared session fixtures for integration tests
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for wepin-session tests

use std::sync::Arc;

use wepin_session::{
    AppCredentials, MemoryNotifier, Sandbox, SandboxConfig, SessionConfig, SessionManager,
};

/// Second anvil account, used as a transfer target
#[allow(dead_code)]
pub const RECIPIENT: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";

pub fn test_credentials() -> AppCredentials {
    AppCredentials::new("app-integration", "ak_integration")
}

/// Fresh, uninitialized session backed by a sandbox wallet
pub fn setup_session(config: SandboxConfig) -> (Sandbox, SessionManager, Arc<MemoryNotifier>) {
    let credentials = test_credentials();
    let sandbox = Sandbox::new(credentials.clone(), config).expect("sandbox config is valid");
    let notifier = Arc::new(MemoryNotifier::new());
    let manager = SessionManager::new(
        sandbox.services(),
        SessionConfig::new(credentials),
        notifier.clone(),
    )
    .expect("session config is valid");
    (sandbox, manager, notifier)
}

/// Session that is initialized, logged in and has an account selected
#[allow(dead_code)]
pub async fn setup_with_account(
    config: SandboxConfig,
) -> (Sandbox, SessionManager, Arc<MemoryNotifier>) {
    let (sandbox, manager, notifier) = setup_session(config);
    manager.initialize().await.expect("initialize");
    manager.login_with_ui().await.expect("login");
    manager.get_accounts().await.expect("accounts");
    (sandbox, manager, notifier)
}
