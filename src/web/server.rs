use std::sync::Arc;

use axum::{
    Router,
    response::Html,
    routing::{delete, get},
};
use tokio::sync::RwLock;

use crate::application::ExpenseService;

use super::{entries, summary};

/// Shared state for the dashboard: one service behind one lock, so each
/// mutation and its snapshot write happen as a single serialized step.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<RwLock<ExpenseService>>,
}

async fn dashboard() -> Html<&'static str> {
    Html(include_str!("dashboard.html"))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard))
        .route("/api/entries", get(entries::list).post(entries::create))
        .route("/api/entries/{id}", delete(entries::remove))
        .route("/api/summary", get(summary::get_summary))
        .route("/api/suggest", get(summary::get_suggestion))
        .route("/export.csv", get(entries::export_csv))
        .with_state(state)
}

pub async fn run_with_listener(
    service: ExpenseService,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Dashboard listening on http://{}", addr);

    let state = AppState {
        service: Arc::new(RwLock::new(service)),
    };

    axum::serve(listener, router(state)).await
}
