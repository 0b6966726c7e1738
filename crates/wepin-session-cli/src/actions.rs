/*
[INPUT]:  Action selected from the menu or the command line
[OUTPUT]: Calls into the session manager and a one-line summary
[POS]:    CLI action dispatch - shared by interactive and scripted modes
[UPDATE]: When the session exposes new operations
*/

use clap::ValueEnum;
use tracing::debug;

use wepin_session::{DialogOutcome, InputSource, RegisterOutcome, Result, SessionManager};

/// Operations the user can trigger; initialization runs at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Action {
    LoginUi,
    LoginOauth,
    Register,
    Logout,
    GetAccounts,
    GetBalance,
    SignMessage,
    SendTransaction,
    OpenWidget,
}

impl Action {
    pub const ALL: [Action; 9] = [
        Action::LoginUi,
        Action::LoginOauth,
        Action::Register,
        Action::Logout,
        Action::GetAccounts,
        Action::GetBalance,
        Action::SignMessage,
        Action::SendTransaction,
        Action::OpenWidget,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Action::LoginUi => "Login with UI",
            Action::LoginOauth => "Login with OAuth",
            Action::Register => "Register",
            Action::Logout => "Logout",
            Action::GetAccounts => "Get accounts",
            Action::GetBalance => "Get balance",
            Action::SignMessage => "Sign message",
            Action::SendTransaction => "Send transaction",
            Action::OpenWidget => "Open widget",
        }
    }
}

/// Run one action and describe a successful result
pub async fn execute(
    manager: &SessionManager,
    action: Action,
    input: &dyn InputSource,
) -> Result<String> {
    match action {
        Action::LoginUi => manager
            .login_with_ui()
            .await
            .map(|user| format!("Logged in as {}", user.email().unwrap_or("unknown"))),
        Action::LoginOauth => manager
            .login_with_oauth()
            .await
            .map(|user| format!("Logged in as {}", user.email().unwrap_or("unknown"))),
        Action::Register => manager.register_wepin().await.map(|outcome| match outcome {
            RegisterOutcome::Registered(_) => "Registration complete".to_string(),
            RegisterOutcome::NotRequired => "Nothing to register".to_string(),
        }),
        Action::Logout => manager
            .logout()
            .await
            .map(|status| format!("Logged out, status: {status}")),
        Action::GetAccounts => manager
            .get_accounts()
            .await
            .map(|accounts| format!("Accounts: {}", accounts.join(", "))),
        Action::GetBalance => manager
            .get_balance()
            .await
            .map(|balance| format!("Balance: {balance}")),
        Action::SignMessage => manager.sign_message_dialog(input).await.map(describe),
        Action::SendTransaction => manager.send_transaction_dialog(input).await.map(describe),
        Action::OpenWidget => manager
            .open_widget()
            .await
            .map(|()| "Widget opened".to_string()),
    }
}

/// Line printed after an action. Failures were already reported through
/// the notifier; only retryable ones add a hint.
pub fn summary_line(action: Action, result: &Result<String>) -> Option<String> {
    match result {
        Ok(line) => Some(line.clone()),
        Err(err) if err.is_retryable() => {
            debug!(?action, error = %err, "retryable action failure");
            Some(format!("{} did not complete; run it again to retry.", action.label()))
        }
        Err(err) => {
            debug!(?action, error = %err, "action failed");
            None
        }
    }
}

fn describe(outcome: DialogOutcome<String>) -> String {
    match outcome {
        DialogOutcome::Completed(value) => format!("Done: {value}"),
        DialogOutcome::Cancelled => "Cancelled".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use wepin_session::{
        AppCredentials, MemoryNotifier, Sandbox, SandboxConfig, SandboxOperation, ScriptedInput,
        SessionConfig, SessionError,
    };

    fn manager() -> (Sandbox, SessionManager) {
        let credentials = AppCredentials::new("app", "key");
        let sandbox = Sandbox::new(credentials.clone(), SandboxConfig::default()).unwrap();
        let manager = SessionManager::new(
            sandbox.services(),
            SessionConfig::new(credentials),
            Arc::new(MemoryNotifier::new()),
        )
        .unwrap();
        (sandbox, manager)
    }

    #[test]
    fn test_action_names_parse() {
        assert_eq!(Action::from_str("login-ui", false), Ok(Action::LoginUi));
        assert_eq!(
            Action::from_str("send-transaction", false),
            Ok(Action::SendTransaction)
        );
        assert_eq!(Action::ALL.len(), Action::value_variants().len());
        assert!(Action::from_str("init", false).is_err());
    }

    #[tokio::test]
    async fn test_execute_summaries() {
        let (_sandbox, manager) = manager();
        let input = ScriptedInput::new(Vec::<String>::new());

        let result = execute(&manager, Action::GetAccounts, &input).await;
        assert!(matches!(result, Err(SessionError::ProviderNotInitialized)));
        assert_eq!(summary_line(Action::GetAccounts, &result), None);

        manager.initialize().await.unwrap();
        execute(&manager, Action::LoginUi, &input).await.unwrap();
        execute(&manager, Action::GetAccounts, &input).await.unwrap();
        let result = execute(&manager, Action::GetBalance, &input).await;
        assert_eq!(
            summary_line(Action::GetBalance, &result).as_deref(),
            Some("Balance: 1")
        );
        assert_eq!(
            execute(&manager, Action::SignMessage, &input).await.unwrap(),
            "Cancelled"
        );
    }

    #[tokio::test]
    async fn test_retryable_failure_gets_hint() {
        let (sandbox, manager) = manager();
        manager.initialize().await.unwrap();
        sandbox.fail_on(SandboxOperation::LoginWithUi);
        let input = ScriptedInput::default();

        let result = execute(&manager, Action::LoginUi, &input).await;
        assert!(result.is_err());
        assert_eq!(
            summary_line(Action::LoginUi, &result).as_deref(),
            Some("Login with UI did not complete; run it again to retry.")
        );
    }
}
