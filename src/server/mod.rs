//! HTTP surface over the dispatcher.
//!
//! - `POST /api/test/:provider` with `{"key": "..."}` → `ValidationResult`
//! - `GET /api/health` → `{"status": "ok", "providers": <count>}`
//!
//! Validation outcomes, including dispatch-level failures, are always
//! returned as HTTP 200 with the result in the body.

use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::{Path, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::dispatch::{Dispatcher, ValidationResult};

pub fn router(dispatcher: Arc<Dispatcher>) -> Router {
    Router::new()
        .route("/api/test/:provider", post(test_key))
        .route("/api/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(dispatcher)
}

pub async fn serve(dispatcher: Arc<Dispatcher>, addr: SocketAddr) -> Result<()> {
    let providers = dispatcher.provider_count();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    info!("API key tester ready on http://{}", addr);
    info!("{} providers available", providers);
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    axum::serve(listener, router(dispatcher))
        .await
        .context("HTTP server terminated")?;
    Ok(())
}

async fn test_key(
    State(dispatcher): State<Arc<Dispatcher>>,
    Path(provider): Path<String>,
    body: Bytes,
) -> Json<ValidationResult> {
    // Anything but a JSON object with a string `key` counts as no key.
    let payload: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let key = payload["key"].as_str().unwrap_or_default();
    Json(dispatcher.validate(&provider, key).await)
}

async fn health(State(dispatcher): State<Arc<Dispatcher>>) -> Json<Value> {
    Json(serde_json::json!({
        "status": "ok",
        "providers": dispatcher.provider_count(),
    }))
}
