//! Entry API endpoints

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Entry;

use super::{AppState, ServerError};

#[derive(Debug, Deserialize)]
pub struct EntryFilter {
    pub category: Option<String>,
}

/// Payload for creating an entry. Fields arrive as the raw form strings;
/// validation happens in the service.
#[derive(Debug, Deserialize)]
pub struct EntryNew {
    pub date: String,
    pub category: String,
    pub amount: String,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Serialize)]
pub struct EntrySaved {
    pub entry: Entry,
    /// Set when the in-memory change could not be written to the snapshot.
    pub warning: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<EntryFilter>,
) -> Json<Vec<Entry>> {
    let service = state.service.read().await;
    Json(service.filtered(filter.category.as_deref()))
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<EntryNew>,
) -> Result<(StatusCode, Json<EntrySaved>), ServerError> {
    let mut service = state.service.write().await;
    let result = service.add(
        &payload.date,
        &payload.category,
        &payload.amount,
        &payload.note,
    )?;

    Ok((
        StatusCode::CREATED,
        Json(EntrySaved {
            entry: result.entry,
            warning: result.save_warning,
        }),
    ))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EntrySaved>, ServerError> {
    let mut service = state.service.write().await;
    let result = service.remove(id)?;

    Ok(Json(EntrySaved {
        entry: result.entry,
        warning: result.save_warning,
    }))
}

pub async fn export_csv(State(state): State<AppState>) -> Result<impl IntoResponse, ServerError> {
    let service = state.service.read().await;
    let mut body = Vec::new();
    service.export(&mut body)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"expenses.csv\"",
            ),
        ],
        body,
    ))
}
