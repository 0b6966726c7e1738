/*
[INPUT]:  Operation names from the session controllers
[OUTPUT]: RAII permits rejecting overlapping operations
[POS]:    Session layer - in-flight guard for the shared store
[UPDATE]: When operations need queuing instead of rejection
*/

use std::sync::{Arc, Mutex, PoisonError};

use crate::error::{Result, SessionError};

/// Allows at most one mutating operation at a time
#[derive(Debug, Clone, Default)]
pub struct OperationGuard {
    running: Arc<Mutex<Option<&'static str>>>,
}

impl OperationGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the session for `operation`, or fail with `Busy`
    pub fn try_acquire(&self, operation: &'static str) -> Result<OperationPermit> {
        let mut slot = self.running.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(running) = *slot {
            return Err(SessionError::Busy { running });
        }
        *slot = Some(operation);
        Ok(OperationPermit {
            running: Arc::clone(&self.running),
        })
    }

    /// Name of the operation currently holding the guard
    pub fn running(&self) -> Option<&'static str> {
        *self.running.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Releases the guard when dropped
#[derive(Debug)]
pub struct OperationPermit {
    running: Arc<Mutex<Option<&'static str>>>,
}

impl Drop for OperationPermit {
    fn drop(&mut self) {
        *self.running.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
