//! Legacy import trigger

use axum::{extract::State, routing::post, Json, Router};

use tt_core::import::{ImportSummary, Reconciler};

use crate::state::AppState;

/// POST /api/import - Merge the embedded legacy export into the store
///
/// Always returns 200; the summary's `success` flag and error list carry
/// the outcome, since per-record failures are expected and non-fatal.
async fn run_import(State(state): State<AppState>) -> Json<ImportSummary> {
    let summary = Reconciler::new(state.store()).run_embedded().await;
    tracing::info!(
        imported = summary.imported,
        skipped = summary.skipped,
        errors = summary.errors.len(),
        "Legacy import finished"
    );
    Json(summary)
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/import", post(run_import))
}
