//! Task API endpoints
//!
//! RESTful API for task CRUD operations, including the title search the UI
//! exposes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tt_core::model::{Task, TaskUpdate};

use super::{bad_request, store_error, ApiError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: String,
    pub category_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default)]
    pub priority: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub category_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: Uuid,
    pub title: String,
    pub completed: bool,
    pub priority: bool,
    pub category_id: Uuid,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            completed: task.completed,
            priority: task.priority,
            category_id: task.category_id,
            created_at: task.created_at.to_rfc3339(),
            updated_at: task.updated_at.to_rfc3339(),
        }
    }
}

/// GET /api/tasks - List tasks, optionally filtered by title or category
async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<TaskListQuery>,
) -> Result<Json<Vec<TaskResponse>>, ApiError> {
    let mut tasks = state.store().list_tasks().await.map_err(store_error)?;

    if let Some(category_id) = query.category_id {
        tasks.retain(|task| task.category_id == category_id);
    }
    if let Some(search) = query.search.as_deref() {
        let needle = search.trim().to_lowercase();
        if !needle.is_empty() {
            tasks.retain(|task| task.title.to_lowercase().contains(&needle));
        }
    }

    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

/// POST /api/tasks - Create a new task
async fn create_task(
    State(state): State<AppState>,
    Json(req): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskResponse>), ApiError> {
    let title = req.title.trim();
    if title.is_empty() {
        return Err(bad_request("Task title cannot be empty"));
    }

    let task = state
        .store()
        .create_task(title, req.category_id)
        .await
        .map_err(store_error)?;

    Ok((StatusCode::CREATED, Json(TaskResponse::from(task))))
}

/// PATCH /api/tasks/:id - Update a task
async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTaskRequest>,
) -> Result<Json<TaskResponse>, ApiError> {
    if let Some(title) = req.title.as_deref() {
        if title.trim().is_empty() {
            return Err(bad_request("Task title cannot be empty"));
        }
    }

    let update = TaskUpdate {
        title: req.title.map(|title| title.trim().to_string()),
        completed: req.completed,
        priority: req.priority,
    };
    if update.is_empty() {
        return Err(bad_request("No fields to update"));
    }

    let task = state
        .store()
        .update_task(id, update)
        .await
        .map_err(store_error)?;

    Ok(Json(TaskResponse::from(task)))
}

/// DELETE /api/tasks/:id - Delete a task
async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.store().delete_task(id).await.map_err(store_error)?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route(
            "/api/tasks/{id}",
            axum::routing::patch(update_task).delete(delete_task),
        )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use tt_core::store::{MemoryStore, StorageMode, TaskStore};

    use crate::app;
    use crate::state::AppState;

    async fn fixture() -> (axum::Router, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(store.clone(), StorageMode::Fallback);
        (app(state), store)
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_create_task_returns_created_entity() {
        let (app, store) = fixture().await;
        let tab = store.create_tab("Work", "#3B82F6").await.unwrap();
        let category = store
            .create_category("Ad hoc", tab.id, "#3B82F6")
            .await
            .unwrap();

        let request = Request::builder()
            .method("POST")
            .uri("/api/tasks")
            .header("content-type", "application/json")
            .body(Body::from(
                json!({"title": "Buy milk", "categoryId": category.id}).to_string(),
            ))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["title"], "Buy milk");
        assert_eq!(body["completed"], false);
        assert_eq!(body["priority"], false);
        assert_eq!(body["categoryId"], category.id.to_string());
    }

    #[tokio::test]
    async fn test_create_task_rejects_empty_title() {
        let (app, store) = fixture().await;
        let tab = store.create_tab("Work", "#3B82F6").await.unwrap();
        let category = store
            .create_category("Ad hoc", tab.id, "#3B82F6")
            .await
            .unwrap();

        let request = Request::builder()
            .method("POST")
            .uri("/api/tasks")
            .header("content-type", "application/json")
            .body(Body::from(
                json!({"title": "   ", "categoryId": category.id}).to_string(),
            ))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_tasks_filters_by_search() {
        let (app, store) = fixture().await;
        let tab = store.create_tab("Work", "#3B82F6").await.unwrap();
        let category = store
            .create_category("Ad hoc", tab.id, "#3B82F6")
            .await
            .unwrap();
        store.create_task("Buy milk", category.id).await.unwrap();
        store.create_task("Mow lawn", category.id).await.unwrap();

        let request = Request::builder()
            .uri("/api/tasks?search=milk")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let titles: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|task| task["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, ["Buy milk"]);
    }

    #[tokio::test]
    async fn test_update_missing_task_is_404() {
        let (app, _store) = fixture().await;

        let request = Request::builder()
            .method("PATCH")
            .uri(format!("/api/tasks/{}", uuid::Uuid::new_v4()))
            .header("content-type", "application/json")
            .body(Body::from(json!({"completed": true}).to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_task_toggles_completed() {
        let (app, store) = fixture().await;
        let tab = store.create_tab("Work", "#3B82F6").await.unwrap();
        let category = store
            .create_category("Ad hoc", tab.id, "#3B82F6")
            .await
            .unwrap();
        let task = store.create_task("Buy milk", category.id).await.unwrap();

        let request = Request::builder()
            .method("PATCH")
            .uri(format!("/api/tasks/{}", task.id))
            .header("content-type", "application/json")
            .body(Body::from(json!({"completed": true}).to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["completed"], true);
        assert_eq!(body["title"], "Buy milk");
    }

    #[tokio::test]
    async fn test_delete_task_is_no_content() {
        let (app, store) = fixture().await;
        let tab = store.create_tab("Work", "#3B82F6").await.unwrap();
        let category = store
            .create_category("Ad hoc", tab.id, "#3B82F6")
            .await
            .unwrap();
        let task = store.create_task("Buy milk", category.id).await.unwrap();

        let request = Request::builder()
            .method("DELETE")
            .uri(format!("/api/tasks/{}", task.id))
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(store.list_tasks().await.unwrap().is_empty());
    }
}
