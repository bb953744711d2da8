//! Category API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tt_core::model::Category;
use tt_core::palette::{self, DEFAULT_PALETTE};

use super::{bad_request, store_error, ApiError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub name: String,
    pub tab_id: Uuid,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCategoryRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
    pub tab_id: Uuid,
    pub color: String,
    pub created_at: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            tab_id: category.tab_id,
            color: category.color,
            created_at: category.created_at.to_rfc3339(),
        }
    }
}

/// GET /api/categories - List all categories
async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryResponse>>, ApiError> {
    let categories = state.store().list_categories().await.map_err(store_error)?;
    Ok(Json(
        categories.into_iter().map(CategoryResponse::from).collect(),
    ))
}

/// POST /api/categories - Create a new category
async fn create_category(
    State(state): State<AppState>,
    Json(req): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>), ApiError> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(bad_request("Category name cannot be empty"));
    }

    let color = match req.color {
        Some(color) => color,
        None => {
            let existing = state.store().list_categories().await.map_err(store_error)?;
            palette::pick(&DEFAULT_PALETTE, existing.len()).to_string()
        }
    };

    let category = state
        .store()
        .create_category(name, req.tab_id, &color)
        .await
        .map_err(store_error)?;

    Ok((StatusCode::CREATED, Json(CategoryResponse::from(category))))
}

/// PATCH /api/categories/:id - Rename a category
async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateCategoryRequest>,
) -> Result<Json<CategoryResponse>, ApiError> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(bad_request("Category name cannot be empty"));
    }

    let category = state
        .store()
        .update_category(id, name)
        .await
        .map_err(store_error)?;

    Ok(Json(CategoryResponse::from(category)))
}

/// DELETE /api/categories/:id - Delete a category and its tasks
async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.store().delete_category(id).await.map_err(store_error)?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/categories", get(list_categories).post(create_category))
        .route(
            "/api/categories/{id}",
            axum::routing::patch(update_category).delete(delete_category),
        )
}
