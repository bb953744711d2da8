//! Tab API endpoints

use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tt_core::model::Tab;
use tt_core::palette::{self, DEFAULT_PALETTE};

use super::{bad_request, store_error, ApiError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTabRequest {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabResponse {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub created_at: String,
    pub task_count: usize,
}

impl TabResponse {
    fn new(tab: Tab, task_count: usize) -> Self {
        Self {
            id: tab.id,
            name: tab.name,
            color: tab.color,
            created_at: tab.created_at.to_rfc3339(),
            task_count,
        }
    }
}

/// GET /api/tabs - List all tabs with their task counts
async fn list_tabs(State(state): State<AppState>) -> Result<Json<Vec<TabResponse>>, ApiError> {
    let tabs = state.store().list_tabs().await.map_err(store_error)?;
    let categories = state.store().list_categories().await.map_err(store_error)?;
    let tasks = state.store().list_tasks().await.map_err(store_error)?;

    let category_tab: HashMap<Uuid, Uuid> = categories
        .iter()
        .map(|category| (category.id, category.tab_id))
        .collect();
    let mut counts: HashMap<Uuid, usize> = HashMap::new();
    for task in &tasks {
        if let Some(tab_id) = category_tab.get(&task.category_id) {
            *counts.entry(*tab_id).or_default() += 1;
        }
    }

    Ok(Json(
        tabs.into_iter()
            .map(|tab| {
                let count = counts.get(&tab.id).copied().unwrap_or(0);
                TabResponse::new(tab, count)
            })
            .collect(),
    ))
}

/// POST /api/tabs - Create a new tab
async fn create_tab(
    State(state): State<AppState>,
    Json(req): Json<CreateTabRequest>,
) -> Result<(StatusCode, Json<TabResponse>), ApiError> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(bad_request("Tab name cannot be empty"));
    }

    // Color defaults to the palette entry for the next tab position.
    let color = match req.color {
        Some(color) => color,
        None => {
            let existing = state.store().list_tabs().await.map_err(store_error)?;
            palette::pick(&DEFAULT_PALETTE, existing.len()).to_string()
        }
    };

    let tab = state
        .store()
        .create_tab(name, &color)
        .await
        .map_err(store_error)?;

    Ok((StatusCode::CREATED, Json(TabResponse::new(tab, 0))))
}

/// DELETE /api/tabs/:id - Delete a tab and everything under it
async fn delete_tab(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.store().delete_tab(id).await.map_err(store_error)?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/tabs", get(list_tabs).post(create_tab))
        .route("/api/tabs/{id}", axum::routing::delete(delete_tab))
}
