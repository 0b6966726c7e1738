/*
[INPUT]:  Injected SDK services, session configuration, notifier
[OUTPUT]: SessionManager driving the wallet session lifecycle
[POS]:    Session layer - orchestrates init, auth and asset operations
[UPDATE]: When adding session operations or changing reporting policy
*/

pub mod assets;
pub mod auth;
pub mod dialog;
pub mod guard;
pub mod init;
pub mod input;
pub mod machine;
pub mod notice;
pub mod store;

use std::sync::Arc;

use tracing::warn;

use crate::config::SessionConfig;
use crate::error::{Result, SessionError};
use crate::sdk::Services;
use crate::types::{LifecycleStatus, SessionSnapshot};

pub use auth::RegisterOutcome;
pub use dialog::DialogOutcome;
pub use guard::{OperationGuard, OperationPermit};
pub use input::{InputKind, InputRequest, InputSource, ScriptedInput};
pub use machine::{LifecycleEvent, LifecycleMachine, TransitionError};
pub use notice::{ChannelNotifier, MemoryNotifier, Notice, NoticeLevel, Notifier};
pub use store::SessionStore;

/// Drives one wallet session from startup to shutdown
///
/// Owns the SDK handles and the session store. Every operation checks its
/// preconditions before touching an SDK, holds the session-wide
/// [`OperationGuard`] while it runs, and commits its results to the store
/// in one step. Failures are logged, reported to the [`Notifier`] and
/// returned; the store keeps its previous contents.
pub struct SessionManager {
    services: Services,
    config: SessionConfig,
    store: SessionStore,
    guard: OperationGuard,
    notifier: Arc<dyn Notifier>,
}

impl SessionManager {
    pub fn new(
        services: Services,
        config: SessionConfig,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            services,
            config,
            store: SessionStore::new(),
            guard: OperationGuard::new(),
            notifier,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Read-only handle to the store
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn status(&self) -> LifecycleStatus {
        self.store.status()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.store.snapshot(&self.config.network)
    }

    /// Name of the operation currently in flight, if any
    pub fn running_operation(&self) -> Option<&'static str> {
        self.guard.running()
    }

    fn notify(&self, notice: Notice) {
        self.notifier.notify(notice);
    }

    fn require_initialized(&self) -> Result<()> {
        if self.status().is_post_init() {
            Ok(())
        } else {
            Err(SessionError::NotInitialized)
        }
    }

    /// Log and surface a failed operation, then hand the result back
    fn report<T>(&self, operation: &'static str, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            if err.is_precondition() {
                warn!(operation, error = %err, "operation rejected");
                self.notify(Notice::warning(err.user_message()));
            } else {
                tracing::error!(operation, error = %err, "operation failed");
                self.notify(Notice::error(format!(
                    "Error during {operation}: {}",
                    err.user_message()
                )));
            }
        }
        result
    }
}
