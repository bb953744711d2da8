//! Relational backend store
//!
//! Talks to the hosted database service over its PostgREST-style HTTP
//! interface: row-level select/insert/update/delete per table, filtered by
//! id and ordered by `created_at` on list. Cascades on tab/category
//! deletion are handled by the backend's foreign keys.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use super::TaskStore;
use crate::model::{Category, Tab, Task, TaskUpdate};
use crate::{Error, Result};

const TABS: &str = "tabs";
const CATEGORIES: &str = "categories";
const TASKS: &str = "tasks";

/// Store backed by the hosted relational service.
pub struct RestStore {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Serialize)]
struct NewTab<'a> {
    name: &'a str,
    color: &'a str,
}

#[derive(Serialize)]
struct NewCategory<'a> {
    name: &'a str,
    tab_id: Uuid,
    color: &'a str,
}

#[derive(Serialize)]
struct NewTask<'a> {
    title: &'a str,
    category_id: Uuid,
}

#[derive(Serialize)]
struct CategoryPatch<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct TaskPatch {
    #[serde(flatten)]
    update: TaskUpdate,
    updated_at: DateTime<Utc>,
}

impl RestStore {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
            api_key: api_key.into(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn fetch_all<T: DeserializeOwned>(&self, table: &str) -> Result<Vec<T>> {
        let response = self
            .authorized(self.client.get(self.table_url(table)))
            .query(&[("select", "*"), ("order", "created_at.asc")])
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    async fn insert<T: DeserializeOwned>(&self, table: &str, body: &impl Serialize) -> Result<T> {
        let response = self
            .authorized(self.client.post(self.table_url(table)))
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        let mut rows: Vec<T> = response.json().await?;
        rows.pop()
            .ok_or_else(|| Error::Storage(format!("insert into {table} returned no row")))
    }

    /// Returns `None` when no row matched the id filter.
    async fn patch<T: DeserializeOwned>(
        &self,
        table: &str,
        id: Uuid,
        body: &impl Serialize,
    ) -> Result<Option<T>> {
        let response = self
            .authorized(self.client.patch(self.table_url(table)))
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        let mut rows: Vec<T> = response.json().await?;
        Ok(rows.pop())
    }

    async fn remove(&self, table: &str, id: Uuid) -> Result<()> {
        self.authorized(self.client.delete(self.table_url(table)))
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[async_trait]
impl TaskStore for RestStore {
    async fn list_tabs(&self) -> Result<Vec<Tab>> {
        self.fetch_all(TABS).await
    }

    async fn create_tab(&self, name: &str, color: &str) -> Result<Tab> {
        self.insert(TABS, &NewTab { name, color }).await
    }

    async fn delete_tab(&self, id: Uuid) -> Result<()> {
        self.remove(TABS, id).await
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        self.fetch_all(CATEGORIES).await
    }

    async fn create_category(&self, name: &str, tab_id: Uuid, color: &str) -> Result<Category> {
        self.insert(CATEGORIES, &NewCategory { name, tab_id, color })
            .await
    }

    async fn update_category(&self, id: Uuid, name: &str) -> Result<Category> {
        self.patch(CATEGORIES, id, &CategoryPatch { name })
            .await?
            .ok_or(Error::CategoryNotFound(id))
    }

    async fn delete_category(&self, id: Uuid) -> Result<()> {
        self.remove(CATEGORIES, id).await
    }

    async fn list_tasks(&self) -> Result<Vec<Task>> {
        self.fetch_all(TASKS).await
    }

    async fn create_task(&self, title: &str, category_id: Uuid) -> Result<Task> {
        self.insert(TASKS, &NewTask { title, category_id }).await
    }

    async fn update_task(&self, id: Uuid, update: TaskUpdate) -> Result<Task> {
        let patch = TaskPatch {
            update,
            updated_at: Utc::now(),
        };
        self.patch(TASKS, id, &patch)
            .await?
            .ok_or(Error::TaskNotFound(id))
    }

    async fn delete_task(&self, id: Uuid) -> Result<()> {
        self.remove(TASKS, id).await
    }
}
