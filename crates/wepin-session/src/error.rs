/*
[INPUT]:  Error sources (SDK calls, preconditions, decoding, state transitions)
[OUTPUT]: Structured error types with user-facing messages
[POS]:    Error handling layer - unified error type for the session crate
[UPDATE]: When adding new error sources or changing reported messages
*/

use thiserror::Error;

use crate::session::machine::TransitionError;

/// Main error type for wallet session operations
#[derive(Error, Debug)]
pub enum SessionError {
    /// An operation ran before initialization completed
    #[error("Session is not initialized")]
    NotInitialized,

    /// Initialization already completed for this session
    #[error("Session is already initialized")]
    AlreadyInitialized,

    /// No blockchain provider handle is available
    #[error("Provider is not initialized")]
    ProviderNotInitialized,

    /// No account address has been selected
    #[error("No account selected")]
    NoAccountSelected,

    /// Another operation is still in flight
    #[error("Operation '{running}' is still in progress")]
    Busy { running: &'static str },

    /// An external SDK call failed
    #[error("{operation} failed: {message}")]
    Sdk {
        operation: &'static str,
        message: String,
    },

    /// External SDK returned data of an unexpected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Hexadecimal value could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// User supplied an amount that cannot be converted to wei
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Recipient is not a valid address
    #[error("Invalid recipient: {0}")]
    InvalidRecipient(String),

    /// Status reported by the SDK does not fit the lifecycle
    #[error(transparent)]
    Transition(#[from] TransitionError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SessionError {
    /// Build an SDK failure for the named operation
    pub fn sdk(operation: &'static str, message: impl Into<String>) -> Self {
        SessionError::Sdk {
            operation,
            message: message.into(),
        }
    }

    /// Check if the error was raised before any external call
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            SessionError::NotInitialized
                | SessionError::AlreadyInitialized
                | SessionError::ProviderNotInitialized
                | SessionError::NoAccountSelected
                | SessionError::Busy { .. }
        )
    }

    /// Check if re-invoking the same action may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SessionError::Sdk { .. } | SessionError::Busy { .. } | SessionError::InvalidResponse(_)
        )
    }

    /// Message suitable for a blocking notification
    pub fn user_message(&self) -> String {
        match self {
            SessionError::ProviderNotInitialized => "Provider is not initialized.".to_string(),
            SessionError::NoAccountSelected => "Please select an account.".to_string(),
            SessionError::NotInitialized => "Wallet is not initialized yet.".to_string(),
            SessionError::Busy { running } => {
                format!("Please wait, '{running}' is still running.")
            }
            other => other.to_string(),
        }
    }
}

/// Result type alias for session operations
pub type Result<T> = std::result::Result<T, SessionError>;
