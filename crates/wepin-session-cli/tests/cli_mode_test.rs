/*
[INPUT]:  Compiled CLI binary and the bundled sandbox config
[OUTPUT]: Test results for dry-run and scripted runs
[POS]:    Integration tests - CLI modes
[UPDATE]: When CLI flags or scripted output change
*/

use std::process::{Command, Output};

fn run_cli(args: &[&str]) -> Output {
    let binary_path = env!("CARGO_BIN_EXE_wepin-session-cli");
    let config_path = format!("{}/config/sandbox.yaml", env!("CARGO_MANIFEST_DIR"));

    Command::new(binary_path)
        .arg("--config")
        .arg(config_path)
        .arg("--log-level")
        .arg("error")
        .args(args)
        .output()
        .expect("Failed to start wepin-session-cli binary")
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "Process exited with non-zero status: {}\nStdout: {}\nStderr: {}",
        output.status,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn cli_mode_with_config_and_dry_run_works() {
    let output = run_cli(&["--dry-run"]);
    assert_success(&output);
    assert!(output.stdout.is_empty());
}

#[test]
fn startup_initializes_before_scripted_actions() {
    let output = run_cli(&["--action", "login-ui", "--action", "get-accounts"]);
    assert_success(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Initialized, status: not_login"));
    assert!(stdout.contains("Accounts: 0x"));
    assert!(!stdout.contains("Wallet is not initialized yet."));
    assert!(!stdout.contains("Provider is not initialized."));
    assert!(stdout.contains("\"status\": \"login\""));
    assert!(stdout.contains("\"chainId\": 11155111"));
}

#[test]
fn scripted_actions_print_final_snapshot() {
    let output = run_cli(&[
        "--action",
        "login-ui",
        "--action",
        "get-accounts",
        "--action",
        "get-balance",
    ]);
    assert_success(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Balance: 1.5"));
    assert!(stdout.contains("\"balance\": \"1.5\""));
}

#[test]
fn scripted_precondition_failure_is_reported_not_fatal() {
    let output = run_cli(&["--action", "get-balance", "--action", "login-ui"]);
    assert_success(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Please select an account."));
    assert!(stdout.contains("\"status\": \"login\""));
}

#[test]
fn init_is_not_a_scripted_action() {
    let output = run_cli(&["--action", "init"]);
    assert!(!output.status.success());
}

#[test]
fn missing_config_fails() {
    let output = Command::new(env!("CARGO_BIN_EXE_wepin-session-cli"))
        .arg("--config")
        .arg("/nonexistent/wepin-session.yaml")
        .arg("--dry-run")
        .output()
        .expect("Failed to start wepin-session-cli binary");
    assert!(!output.status.success());
}
