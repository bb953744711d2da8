//! API Server for TaskTabs
//!
//! REST backend for the task manager UI: CRUD for tabs, categories and
//! tasks, plus the legacy import trigger. Storage mode (relational backend
//! vs seeded in-memory fallback) is decided once at startup.

mod routes;
mod state;

use axum::Router;
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tt_core::config::StoreConfig;
use tt_core::store;

use crate::state::AppState;

fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::tab::router())
        .merge(routes::category::router())
        .merge(routes::task::router())
        .merge(routes::import::router())
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api_server=debug,tt_core=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // One-time storage mode selection
    let config = StoreConfig::from_env();
    let (task_store, mode) = store::connect(&config);
    let app_state = AppState::new(task_store, mode);

    let port: u16 = std::env::var("TASKTABS_PORT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("REST API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind server address");
    axum::serve(listener, app(app_state))
        .await
        .expect("Server error");
}
