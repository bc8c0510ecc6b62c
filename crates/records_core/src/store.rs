use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{update, AppState, AppViewModel, Effect, Msg, StateSnapshot, StoreStats};

/// Owned, shareable state container. Every read and write goes through one
/// lock, so readers never observe a half-applied snapshot.
#[derive(Debug, Clone, Default)]
pub struct Store {
    inner: Arc<Mutex<AppState>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: AppState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    /// Runs the update function and returns the effects to execute.
    pub fn dispatch(&self, msg: Msg) -> Vec<Effect> {
        let mut guard = self.lock();
        let state = std::mem::take(&mut *guard);
        let (state, effects) = update(state, msg);
        *guard = state;
        effects
    }

    pub fn snapshot(&self) -> StateSnapshot {
        self.lock().snapshot().clone()
    }

    pub fn view(&self) -> AppViewModel {
        self.lock().view()
    }

    /// Returns a fresh view only if something changed since the last call.
    pub fn consume_dirty_view(&self) -> Option<AppViewModel> {
        let mut guard = self.lock();
        let view = guard.view();
        guard.consume_dirty().then_some(view)
    }

    pub fn stats(&self) -> StoreStats {
        self.lock().stats()
    }

    fn lock(&self) -> MutexGuard<'_, AppState> {
        // The state is replaced wholesale under the lock, so a poisoned guard still holds a
        // consistent value.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
