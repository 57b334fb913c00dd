//! # Store State
//!
//! The in-memory [`AppState`] shared by every command.
//!
//! The store is wrapped in `Arc<Mutex<T>>`:
//! - `Arc`: the notification task and commands hold the same store
//! - `Mutex`: mutators run one at a time, so the single-writer rule holds
//!
//! No lock is ever held across an `.await`. Commands copy what they need
//! out of the closure, then talk to storage.

use std::sync::{Arc, Mutex, PoisonError};

use bloomy_core::AppState;

/// Thread-safe handle to the application state.
#[derive(Debug, Clone, Default)]
pub struct StoreState {
    store: Arc<Mutex<AppState>>,
}

impl StoreState {
    /// Wraps a fresh store seeded with the catalog and sample addresses.
    pub fn new() -> Self {
        StoreState::from_state(AppState::new())
    }

    pub fn from_state(state: AppState) -> Self {
        StoreState {
            store: Arc::new(Mutex::new(state)),
        }
    }

    /// Executes a read-only operation on the store.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let count = store.with_store(|s| s.cart().len());
    /// ```
    pub fn with_store<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&AppState) -> R,
    {
        // After a poisoned lock the state is accepted as-is, including any
        // half-applied mutation.
        let store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        f(&store)
    }

    /// Executes a mutating operation on the store.
    pub fn with_store_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut AppState) -> R,
    {
        let mut store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut store)
    }
}
