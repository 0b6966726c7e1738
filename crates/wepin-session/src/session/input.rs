/*
[INPUT]:  Dialog steps that need user-supplied text
[OUTPUT]: Structured input requests and their answers
[POS]:    Session layer - input channel replacing blocking prompts
[UPDATE]: When dialogs ask for new kinds of input
*/

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Message,
    Recipient,
    Amount,
}

/// A single question asked by a dialog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputRequest {
    pub id: Uuid,
    pub kind: InputKind,
    pub prompt: String,
}

impl InputRequest {
    pub fn new(kind: InputKind, prompt: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            prompt: prompt.into(),
        }
    }
}

/// Answers input requests; `None` means the user cancelled
#[async_trait]
pub trait InputSource: Send + Sync {
    async fn request_input(&self, request: InputRequest) -> Option<String>;
}

/// Replays canned answers in order
#[derive(Debug, Default)]
pub struct ScriptedInput {
    answers: Mutex<VecDeque<Option<String>>>,
    asked: Mutex<Vec<InputRequest>>,
}

impl ScriptedInput {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: Mutex::new(answers.into_iter().map(|a| Some(a.into())).collect()),
            asked: Mutex::new(Vec::new()),
        }
    }

    pub fn push_answer(&self, answer: impl Into<String>) {
        self.answers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Some(answer.into()));
    }

    /// Queue a cancellation as the next answer
    pub fn push_cancel(&self) {
        self.answers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(None);
    }

    /// Requests received so far
    pub fn asked(&self) -> Vec<InputRequest> {
        self.asked
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl InputSource for ScriptedInput {
    async fn request_input(&self, request: InputRequest) -> Option<String> {
        self.asked
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);
        self.answers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .flatten()
    }
}
