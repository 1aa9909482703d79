use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use crate::application::AppError;

pub use server::{AppState, router, run_with_listener};

mod entries;
mod server;
mod summary;

pub enum ServerError {
    App(AppError),
    Generic(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_app_error(err: &AppError) -> StatusCode {
    match err {
        AppError::EntryNotFound(_) => StatusCode::NOT_FOUND,
        AppError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::InvalidDate(_)
        | AppError::EmptyCategory
        | AppError::InvalidAmount { .. }
        | AppError::NegativeAmount(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn message_for_app_error(err: AppError) -> String {
    match err {
        AppError::Persistence(inner) => {
            tracing::error!("persistence error: {inner}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::App(err) => (status_for_app_error(&err), message_for_app_error(err)),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<AppError> for ServerError {
    fn from(value: AppError) -> Self {
        Self::App(value)
    }
}
