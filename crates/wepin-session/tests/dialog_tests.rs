/*
[INPUT]:  Scripted user answers
[OUTPUT]: Test results for the sign and send dialogs
[POS]:    Integration tests - dialog flows
[UPDATE]: When dialog prompts or cancellation rules change
*/

mod common;

use common::{RECIPIENT, setup_with_account};
use rstest::rstest;
use tokio_test::{assert_err, assert_ok};
use wepin_session::{DialogOutcome, SandboxConfig, ScriptedInput, SessionError};

#[tokio::test]
async fn test_sign_dialog_prompts_for_message() {
    let (_sandbox, manager, notifier) = setup_with_account(SandboxConfig::default()).await;
    let input = ScriptedInput::new(["Hello, Wepin"]);

    let outcome = assert_ok!(manager.sign_message_dialog(&input).await);
    let DialogOutcome::Completed(signature) = outcome else {
        panic!("dialog was cancelled");
    };
    assert_eq!(signature.len(), 132);
    assert_eq!(input.asked()[0].prompt, "Enter the message to sign:");
    assert_eq!(
        notifier.last_message(),
        Some(format!("Signed message: {signature}"))
    );
}

#[rstest]
#[case::cancel_recipient(vec![None])]
#[case::empty_recipient(vec![Some("")])]
#[case::cancel_amount(vec![Some(RECIPIENT), None])]
#[case::blank_amount(vec![Some(RECIPIENT), Some("  ")])]
#[tokio::test]
async fn test_send_dialog_cancellation_makes_no_request(#[case] answers: Vec<Option<&str>>) {
    let (sandbox, manager, _notifier) = setup_with_account(SandboxConfig::default()).await;
    let requests = sandbox.request_count();

    let input = ScriptedInput::new(Vec::<String>::new());
    for answer in answers {
        match answer {
            Some(text) => input.push_answer(text),
            None => input.push_cancel(),
        }
    }

    let outcome = assert_ok!(manager.send_transaction_dialog(&input).await);
    assert_eq!(outcome, DialogOutcome::Cancelled);
    assert_eq!(sandbox.request_count(), requests);
}

#[tokio::test]
async fn test_send_dialog_rejects_invalid_amount() {
    let (sandbox, manager, _notifier) = setup_with_account(SandboxConfig::default()).await;
    let requests = sandbox.request_count();
    let input = ScriptedInput::new([RECIPIENT, "-3"]);

    let err = assert_err!(manager.send_transaction_dialog(&input).await);
    assert!(matches!(err, SessionError::InvalidAmount(_)));
    assert_eq!(sandbox.request_count(), requests);
}
