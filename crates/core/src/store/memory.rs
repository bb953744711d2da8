//! In-memory fallback store
//!
//! Used when no backend is configured. Rows live in plain vectors behind an
//! `RwLock`; the cascade on tab/category deletion is enforced here since
//! there is no database to do it.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::seed;
use super::TaskStore;
use crate::model::{Category, Tab, Task, TaskUpdate};
use crate::{Error, Result};

#[derive(Debug, Default)]
struct State {
    tabs: Vec<Tab>,
    categories: Vec<Category>,
    tasks: Vec<Task>,
}

/// In-process store with the same observable behavior as the backend store.
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State::default()),
        }
    }

    /// Create a store seeded with the fixed baseline dataset.
    pub fn seeded() -> Self {
        let (tabs, categories, tasks) = seed::baseline();
        Self {
            state: RwLock::new(State {
                tabs,
                categories,
                tasks,
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn sorted_by_created_at<T: Clone>(rows: &[T], created_at: impl Fn(&T) -> chrono::DateTime<Utc>) -> Vec<T> {
    let mut rows = rows.to_vec();
    rows.sort_by_key(created_at);
    rows
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn list_tabs(&self) -> Result<Vec<Tab>> {
        let state = self.state.read().await;
        Ok(sorted_by_created_at(&state.tabs, |tab| tab.created_at))
    }

    async fn create_tab(&self, name: &str, color: &str) -> Result<Tab> {
        let tab = Tab::new(name, color);
        self.state.write().await.tabs.push(tab.clone());
        Ok(tab)
    }

    async fn delete_tab(&self, id: Uuid) -> Result<()> {
        let mut state = self.state.write().await;
        state.tabs.retain(|tab| tab.id != id);

        let owned: Vec<Uuid> = state
            .categories
            .iter()
            .filter(|cat| cat.tab_id == id)
            .map(|cat| cat.id)
            .collect();
        state.categories.retain(|cat| cat.tab_id != id);
        state.tasks.retain(|task| !owned.contains(&task.category_id));
        Ok(())
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        let state = self.state.read().await;
        Ok(sorted_by_created_at(&state.categories, |cat| cat.created_at))
    }

    async fn create_category(&self, name: &str, tab_id: Uuid, color: &str) -> Result<Category> {
        let category = Category::new(name, tab_id, color);
        self.state.write().await.categories.push(category.clone());
        Ok(category)
    }

    async fn update_category(&self, id: Uuid, name: &str) -> Result<Category> {
        let mut state = self.state.write().await;
        let category = state
            .categories
            .iter_mut()
            .find(|cat| cat.id == id)
            .ok_or(Error::CategoryNotFound(id))?;
        category.name = name.to_string();
        Ok(category.clone())
    }

    async fn delete_category(&self, id: Uuid) -> Result<()> {
        let mut state = self.state.write().await;
        state.categories.retain(|cat| cat.id != id);
        state.tasks.retain(|task| task.category_id != id);
        Ok(())
    }

    async fn list_tasks(&self) -> Result<Vec<Task>> {
        let state = self.state.read().await;
        Ok(sorted_by_created_at(&state.tasks, |task| task.created_at))
    }

    async fn create_task(&self, title: &str, category_id: Uuid) -> Result<Task> {
        let task = Task::new(title, category_id);
        self.state.write().await.tasks.push(task.clone());
        Ok(task)
    }

    async fn update_task(&self, id: Uuid, update: TaskUpdate) -> Result<Task> {
        let mut state = self.state.write().await;
        let task = state
            .tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(Error::TaskNotFound(id))?;

        if let Some(title) = update.title {
            task.title = title;
        }
        if let Some(completed) = update.completed {
            task.completed = completed;
        }
        if let Some(priority) = update.priority {
            task.priority = priority;
        }
        task.updated_at = Utc::now();
        Ok(task.clone())
    }

    async fn delete_task(&self, id: Uuid) -> Result<()> {
        self.state.write().await.tasks.retain(|task| task.id != id);
        Ok(())
    }
}
