mod common;

use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::sync::RwLock;
use tower::ServiceExt;

use common::{SampleLedger, test_service};
use spesa::web::{AppState, router};

fn test_router(fill: bool) -> Result<(Router, TempDir)> {
    let (mut service, temp) = test_service()?;
    if fill {
        SampleLedger::fill(&mut service)?;
    }

    let state = AppState {
        service: Arc::new(RwLock::new(service)),
    };
    Ok((router(state), temp))
}

async fn body_json(response: axum::response::Response) -> Result<Value> {
    let bytes = response.into_body().collect().await?.to_bytes();
    Ok(serde_json::from_slice(&bytes)?)
}

fn post_json(uri: &str, payload: Value) -> Result<Request<Body>> {
    Ok(Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))?)
}

#[tokio::test]
async fn test_dashboard_page_is_served() -> Result<()> {
    let (app, _temp) = test_router(false)?;

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty())?)
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await?.to_bytes();
    assert!(std::str::from_utf8(&bytes)?.contains("<html"));
    Ok(())
}

#[tokio::test]
async fn test_create_and_list_entries() -> Result<()> {
    let (app, _temp) = test_router(false)?;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/entries",
            json!({"date": "2024-01-05", "category": "Food", "amount": "12.50", "note": "lunch"}),
        )?)
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = body_json(response).await?;
    assert_eq!(created["entry"]["amount_cents"], 1250);
    assert!(created["warning"].is_null());

    let response = app
        .oneshot(Request::builder().uri("/api/entries").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let entries = body_json(response).await?;
    assert_eq!(entries.as_array().unwrap().len(), 1);
    assert_eq!(entries[0]["category"], "Food");
    Ok(())
}

#[tokio::test]
async fn test_list_honors_category_filter() -> Result<()> {
    let (app, _temp) = test_router(true)?;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/entries?category=Food")
                .body(Body::empty())?,
        )
        .await?;

    let entries = body_json(response).await?;
    assert_eq!(entries.as_array().unwrap().len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_create_with_invalid_date_is_422() -> Result<()> {
    let (app, _temp) = test_router(false)?;

    let response = app
        .oneshot(post_json(
            "/api/entries",
            json!({"date": "2024-13-01", "category": "Food", "amount": "10"}),
        )?)
        .await?;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await?;
    assert!(body["error"].as_str().unwrap().contains("date"));
    Ok(())
}

#[tokio::test]
async fn test_create_with_negative_amount_is_422() -> Result<()> {
    let (app, _temp) = test_router(false)?;

    let response = app
        .oneshot(post_json(
            "/api/entries",
            json!({"date": "2024-01-01", "category": "Food", "amount": "-5"}),
        )?)
        .await?;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    Ok(())
}

#[tokio::test]
async fn test_delete_entry() -> Result<()> {
    let (app, _temp) = test_router(true)?;

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/api/entries").body(Body::empty())?)
        .await?;
    let entries = body_json(response).await?;
    let id = entries[0]["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/entries/{id}"))
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(Request::builder().uri("/api/entries").body(Body::empty())?)
        .await?;
    let entries = body_json(response).await?;
    assert_eq!(entries.as_array().unwrap().len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_delete_unknown_id_is_404() -> Result<()> {
    let (app, _temp) = test_router(true)?;

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/entries/00000000-0000-4000-8000-000000000000")
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_summary_reflects_ledger() -> Result<()> {
    let (app, _temp) = test_router(true)?;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/summary?as_of=2024-02-15")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let summary = body_json(response).await?;
    assert_eq!(summary["metrics"]["total_cents"], 18000);
    assert_eq!(summary["metrics"]["top_category"], "Food");
    assert_eq!(summary["metrics"]["month_over_month_pct"], -80.0);
    assert_eq!(summary["months"][0]["month"], "2024-01");
    assert_eq!(summary["months"][0]["total_cents"], 15000);
    Ok(())
}

#[tokio::test]
async fn test_suggest_endpoint() -> Result<()> {
    let (app, _temp) = test_router(true)?;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/suggest?note=LUNCH")
                .body(Body::empty())?,
        )
        .await?;
    let suggestion = body_json(response).await?;
    assert_eq!(suggestion["category"], "Food");

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/suggest?note=unseen")
                .body(Body::empty())?,
        )
        .await?;
    let suggestion = body_json(response).await?;
    assert!(suggestion["category"].is_null());
    Ok(())
}

#[tokio::test]
async fn test_export_csv_download() -> Result<()> {
    let (app, _temp) = test_router(true)?;

    let response = app
        .oneshot(Request::builder().uri("/export.csv").body(Body::empty())?)
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/csv"
    );

    let bytes = response.into_body().collect().await?.to_bytes();
    let text = std::str::from_utf8(&bytes)?;
    assert!(text.starts_with("Date,Category,Amount,Note\n"));
    assert!(text.contains("2024-01-05,Food,100.00,lunch"));
    Ok(())
}
