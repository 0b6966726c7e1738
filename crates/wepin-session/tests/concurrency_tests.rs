/*
[INPUT]:  Sandbox-backed session with artificial latency
[OUTPUT]: Test results for overlapping operations and notice delivery
[POS]:    Integration tests - operation guard and notifier channel
[UPDATE]: When the guard policy or notifier wiring changes
*/

mod common;

use std::sync::Arc;

use common::test_credentials;
use tokio_test::{assert_err, assert_ok};
use wepin_session::{
    ChannelNotifier, LifecycleStatus, NoticeLevel, Sandbox, SandboxConfig, SessionConfig,
    SessionError, SessionManager,
};

fn slow_sandbox() -> SandboxConfig {
    SandboxConfig {
        latency_ms: 30,
        ..SandboxConfig::default()
    }
}

#[tokio::test]
async fn test_overlapping_operations_are_rejected() {
    let (sandbox, manager, _notifier) = common::setup_with_account(slow_sandbox()).await;
    let requests = sandbox.request_count();

    let (first, second) = tokio::join!(manager.get_balance(), manager.get_balance());

    assert_ok!(first);
    let err = assert_err!(second);
    assert!(matches!(err, SessionError::Busy { running: "getBalance" }));
    assert_eq!(sandbox.request_count(), requests + 1);
    assert!(manager.running_operation().is_none());
}

#[tokio::test]
async fn test_logout_during_login_is_rejected() {
    let (sandbox, manager, _notifier) = common::setup_session(slow_sandbox());
    assert_ok!(manager.initialize().await);

    let (login, logout) = tokio::join!(manager.login_with_ui(), manager.logout());

    assert_ok!(login);
    assert!(matches!(
        assert_err!(logout),
        SessionError::Busy { running: "loginWithUI" }
    ));
    assert_eq!(manager.status(), LifecycleStatus::Login);
    assert_eq!(sandbox.status(), LifecycleStatus::Login);
}

#[tokio::test]
async fn test_channel_notifier_delivers_in_order() {
    let credentials = test_credentials();
    let sandbox = assert_ok!(Sandbox::new(credentials.clone(), SandboxConfig::default()));
    let (notifier, mut notices) = ChannelNotifier::new();
    let manager = assert_ok!(SessionManager::new(
        sandbox.services(),
        SessionConfig::new(credentials),
        Arc::new(notifier),
    ));

    assert_err!(manager.get_accounts().await);
    assert_ok!(manager.initialize().await);
    assert_ok!(manager.login_with_ui().await);
    assert_ok!(manager.register_wepin().await);

    let first = notices.recv().await.expect("warning notice");
    assert_eq!(first.level, NoticeLevel::Warning);
    assert_eq!(first.message, "Provider is not initialized.");

    let second = notices.recv().await.expect("info notice");
    assert_eq!(second.level, NoticeLevel::Info);
    assert_eq!(second.message, "No registration required.");
    assert!(notices.try_recv().is_err());
}
