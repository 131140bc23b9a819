//! Shared setup for API integration tests.
//!
//! Each test gets a fresh in-memory SQLite database behind the full
//! router, and talks to it through `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use serde_json::Value;
use tower::ServiceExt;

use innkeep_api::{create_router, AppState};
use innkeep_db::migration::Migrator;

pub async fn setup_app() -> Router {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("failed to open sqlite");
    Migrator::up(&db, None).await.expect("migration failed");
    create_router(AppState { db: Arc::new(db) })
}

/// Sends a request with an optional JSON body and decodes the JSON reply.
pub async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            builder
                .body(Body::from(json.to_string()))
                .expect("failed to build request")
        }
        None => builder.body(Body::empty()).expect("failed to build request"),
    };

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("request failed");

    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("failed to read body")
        .to_bytes();

    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response was not JSON")
    };

    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    request(app, "GET", uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    request(app, "POST", uri, Some(body)).await
}

pub async fn put(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    request(app, "PUT", uri, Some(body)).await
}

/// Reads a money field that may arrive as a JSON string or number.
pub fn money(value: &Value) -> Decimal {
    match value {
        Value::String(s) => s.parse().expect("money field was not a decimal"),
        Value::Number(n) => n.to_string().parse().expect("money field was not a decimal"),
        other => panic!("money field was not a decimal: {other}"),
    }
}
