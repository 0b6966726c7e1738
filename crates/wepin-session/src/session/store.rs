/*
[INPUT]:  Results of initialization, auth and asset operations
[OUTPUT]: Shared session state and read-only snapshots
[POS]:    Session layer - single shared mutable resource
[UPDATE]: When the session tracks new values
*/

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use crate::sdk::BlockchainProvider;
use crate::types::{LifecycleStatus, SessionSnapshot, WepinUser};

use super::machine::LifecycleMachine;

/// Everything the session knows at one point in time
#[derive(Default)]
pub(crate) struct StoreState {
    pub(crate) machine: LifecycleMachine,
    pub(crate) profile: Option<WepinUser>,
    pub(crate) registration_needed: bool,
    pub(crate) provider: Option<Arc<dyn BlockchainProvider>>,
    pub(crate) current_address: Option<String>,
    pub(crate) chain_id: Option<u64>,
    pub(crate) accounts: Option<Vec<String>>,
    pub(crate) balance: Option<String>,
}

impl StoreState {
    /// Drop everything tied to the logged-in user in one step
    pub(crate) fn clear_user_data(&mut self) {
        self.profile = None;
        self.registration_needed = false;
        self.current_address = None;
        self.accounts = None;
        self.balance = None;
    }
}

/// Thread-safe session state store
///
/// Writers go through [`SessionStore::write`] so each operation commits its
/// results under a single lock; the lock is never held across an await.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<StoreState>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn write<R>(&self, update: impl FnOnce(&mut StoreState) -> R) -> R {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        update(&mut *guard)
    }

    pub fn status(&self) -> LifecycleStatus {
        self.read().machine.status()
    }

    pub fn registration_needed(&self) -> bool {
        self.read().registration_needed
    }

    pub fn profile(&self) -> Option<WepinUser> {
        self.read().profile.clone()
    }

    pub fn current_address(&self) -> Option<String> {
        self.read().current_address.clone()
    }

    pub fn accounts(&self) -> Option<Vec<String>> {
        self.read().accounts.clone()
    }

    pub fn balance(&self) -> Option<String> {
        self.read().balance.clone()
    }

    pub fn chain_id(&self) -> Option<u64> {
        self.read().chain_id
    }

    pub(crate) fn provider(&self) -> Option<Arc<dyn BlockchainProvider>> {
        self.read().provider.clone()
    }

    pub fn snapshot(&self, network: &str) -> SessionSnapshot {
        let state = self.read();
        SessionSnapshot {
            status: state.machine.status(),
            profile: state.profile.clone(),
            registration_needed: state.registration_needed,
            current_address: state.current_address.clone(),
            accounts: state.accounts.clone(),
            balance: state.balance.clone(),
            chain_id: state.chain_id,
            network: network.to_string(),
            provider_ready: state.provider.is_some(),
        }
    }
}
