/*
[INPUT]:  InputSource answering structured input requests
[OUTPUT]: Sign and send flows driven by user-supplied text
[POS]:    Session layer - dialog flows on top of the asset controller
[UPDATE]: When dialogs ask for more input
*/

use tracing::debug;

use crate::error::Result;

use super::SessionManager;
use super::input::{InputKind, InputRequest, InputSource};

/// Result of a dialog that the user may abandon
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogOutcome<T> {
    Completed(T),
    Cancelled,
}

/// Answer exactly as typed; only a missing or empty answer cancels
async fn ask(input: &dyn InputSource, kind: InputKind, prompt: &str) -> Option<String> {
    input
        .request_input(InputRequest::new(kind, prompt))
        .await
        .filter(|answer| !answer.is_empty())
}

async fn ask_trimmed(input: &dyn InputSource, kind: InputKind, prompt: &str) -> Option<String> {
    let answer = ask(input, kind, prompt).await?;
    let answer = answer.trim();
    (!answer.is_empty()).then(|| answer.to_string())
}

impl SessionManager {
    /// Ask for a message, then sign it
    pub async fn sign_message_dialog(
        &self,
        input: &dyn InputSource,
    ) -> Result<DialogOutcome<String>> {
        let Some(message) = ask(input, InputKind::Message, "Enter the message to sign:").await
        else {
            debug!("sign dialog cancelled");
            return Ok(DialogOutcome::Cancelled);
        };
        self.sign_message(&message).await.map(DialogOutcome::Completed)
    }

    /// Ask for a recipient and an amount, then send
    pub async fn send_transaction_dialog(
        &self,
        input: &dyn InputSource,
    ) -> Result<DialogOutcome<String>> {
        let Some(to) = ask_trimmed(input, InputKind::Recipient, "Enter the recipient address:").await
        else {
            debug!("send dialog cancelled at recipient");
            return Ok(DialogOutcome::Cancelled);
        };
        let Some(amount) =
            ask_trimmed(input, InputKind::Amount, "Enter the amount to send (in ETH):").await
        else {
            debug!("send dialog cancelled at amount");
            return Ok(DialogOutcome::Cancelled);
        };
        self.send_transaction(&to, &amount)
            .await
            .map(DialogOutcome::Completed)
    }
}
