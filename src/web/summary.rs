//! Summary and suggestion endpoints

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::application::Summary;

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct SummaryParams {
    pub category: Option<String>,
    /// Reference day for the month-over-month window; today when absent.
    pub as_of: Option<NaiveDate>,
}

pub async fn get_summary(
    State(state): State<AppState>,
    Query(params): Query<SummaryParams>,
) -> Json<Summary> {
    let as_of = params.as_of.unwrap_or_else(|| Utc::now().date_naive());

    let service = state.service.read().await;
    Json(service.summary(params.category.as_deref(), as_of))
}

#[derive(Debug, Deserialize)]
pub struct SuggestParams {
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Serialize)]
pub struct Suggestion {
    pub category: Option<String>,
}

pub async fn get_suggestion(
    State(state): State<AppState>,
    Query(params): Query<SuggestParams>,
) -> Json<Suggestion> {
    let service = state.service.read().await;
    Json(Suggestion {
        category: service.suggest(&params.note),
    })
}
