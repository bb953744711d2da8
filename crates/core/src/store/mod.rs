//! Data-access facade
//!
//! Defines the `TaskStore` interface and selects one of its two
//! implementations at startup: the REST backend when connection settings are
//! configured, or the seeded in-memory fallback otherwise. Both behave
//! identically from the caller's perspective, including cascade semantics.

mod memory;
mod rest;
mod seed;

pub use memory::MemoryStore;
pub use rest::RestStore;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use crate::config::StoreConfig;
use crate::model::{Category, Tab, Task, TaskUpdate};
use crate::Result;

/// Storage interface for tabs, categories and tasks.
///
/// List operations return rows ordered by creation time ascending. Updates
/// merge only the provided fields and refresh `updated_at`; updating a
/// missing id is an error. Deletes are idempotent, and deleting a tab or
/// category removes all dependent rows transitively.
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn list_tabs(&self) -> Result<Vec<Tab>>;
    async fn create_tab(&self, name: &str, color: &str) -> Result<Tab>;
    async fn delete_tab(&self, id: Uuid) -> Result<()>;

    async fn list_categories(&self) -> Result<Vec<Category>>;
    async fn create_category(&self, name: &str, tab_id: Uuid, color: &str) -> Result<Category>;
    async fn update_category(&self, id: Uuid, name: &str) -> Result<Category>;
    async fn delete_category(&self, id: Uuid) -> Result<()>;

    async fn list_tasks(&self) -> Result<Vec<Task>>;
    async fn create_task(&self, title: &str, category_id: Uuid) -> Result<Task>;
    async fn update_task(&self, id: Uuid, update: TaskUpdate) -> Result<Task>;
    async fn delete_task(&self, id: Uuid) -> Result<()>;
}

/// Which implementation was selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    Backend,
    Fallback,
}

/// Select a store implementation from the configuration.
///
/// This is a one-time decision at process start; callers hold the trait
/// object and never branch on the mode themselves.
pub fn connect(config: &StoreConfig) -> (Arc<dyn TaskStore>, StorageMode) {
    match config.backend() {
        Some((url, key)) => {
            tracing::info!(url, "Using relational backend store");
            (Arc::new(RestStore::new(url, key)), StorageMode::Backend)
        }
        None => {
            tracing::info!("No backend configured, using seeded in-memory store");
            (Arc::new(MemoryStore::seeded()), StorageMode::Fallback)
        }
    }
}
