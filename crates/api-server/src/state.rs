//! Application state

use std::sync::Arc;

use tt_core::store::{StorageMode, TaskStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<dyn TaskStore>,
    mode: StorageMode,
}

impl AppState {
    pub fn new(store: Arc<dyn TaskStore>, mode: StorageMode) -> Self {
        Self {
            inner: Arc::new(AppStateInner { store, mode }),
        }
    }

    /// Get reference to the task store
    pub fn store(&self) -> &dyn TaskStore {
        self.inner.store.as_ref()
    }

    /// Which storage mode was selected at startup
    pub fn storage_mode(&self) -> StorageMode {
        self.inner.mode
    }
}
