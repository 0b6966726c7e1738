/*
[INPUT]:  LifecycleStatus reported by the wallet SDK, LifecycleEvent
[OUTPUT]: Validated lifecycle transitions
[POS]:    Session domain logic - explicit state machine for the login lifecycle
[UPDATE]: When the SDK lifecycle gains statuses or new session events
*/

use thiserror::Error;

use crate::types::LifecycleStatus;

/// Events that drive lifecycle transitions
///
/// Variants carrying a status hold the value the SDK reported right after
/// the corresponding call completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    InitSucceeded,
    StatusFetched(LifecycleStatus),
    LoggedIn(LifecycleStatus),
    Registered(LifecycleStatus),
    LoggedOut(LifecycleStatus),
}

/// Errors occurring during lifecycle transitions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("Invalid lifecycle transition: {from} -> {event:?}")]
    InvalidTransition {
        from: LifecycleStatus,
        event: LifecycleEvent,
    },
}

/// State machine tracking the session lifecycle
#[derive(Debug, Clone)]
pub struct LifecycleMachine {
    current: LifecycleStatus,
}

impl LifecycleMachine {
    pub fn new() -> Self {
        Self::with_status(LifecycleStatus::NotInitialized)
    }

    pub fn with_status(initial: LifecycleStatus) -> Self {
        Self { current: initial }
    }

    /// Next status for `event`, or `None` when the transition is not allowed
    pub fn next(from: LifecycleStatus, event: LifecycleEvent) -> Option<LifecycleStatus> {
        use LifecycleEvent as E;
        use LifecycleStatus as S;

        match (from, event) {
            (S::NotInitialized, E::InitSucceeded) => Some(S::Initializing),
            (S::Initializing, E::StatusFetched(to)) if to.is_post_init() => Some(to),
            (from, E::LoggedIn(to)) if from.is_post_init() && to.is_logged_in() => Some(to),
            (S::LoginBeforeRegister, E::Registered(to)) if to.is_post_init() => Some(to),
            (from, E::LoggedOut(S::NotLogin)) if from.is_post_init() => Some(S::NotLogin),
            _ => None,
        }
    }

    pub fn can_dispatch(&self, event: LifecycleEvent) -> bool {
        Self::next(self.current, event).is_some()
    }

    /// Apply `event` and return the new status
    pub fn dispatch(&mut self, event: LifecycleEvent) -> Result<LifecycleStatus, TransitionError> {
        let next = Self::next(self.current, event).ok_or(TransitionError::InvalidTransition {
            from: self.current,
            event,
        })?;
        self.current = next;
        Ok(next)
    }

    pub fn status(&self) -> LifecycleStatus {
        self.current
    }
}

impl Default for LifecycleMachine {
    fn default() -> Self {
        Self::new()
    }
}
