// Copyright 2026 Compliance Shield Contributors
// SPDX-License-Identifier: Apache-2.0

//! HTTP REST API for Compliance Shield.
//!
//! A thin JSON surface over [`Scanner::scan`] for dashboards and other UI
//! collaborators. Both result variants are returned with `200 OK`; callers
//! branch on the presence of `error`.

use crate::compliance::rules::{rules_for, RuleInfo};
use crate::compliance::types::ScanResult;
use crate::scanner::Scanner;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Shared state handed to every handler.
pub struct AppState {
    pub scanner: Scanner,
}

/// Body of `POST /api/v1/scan`, and query of `GET /api/v1/scan`.
#[derive(Debug, Deserialize)]
pub struct ScanParams {
    pub url: String,
}

/// Build the axum Router with all REST endpoints.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/v1/scan", get(handle_scan_query).post(handle_scan_body))
        .route("/api/v1/rules", get(handle_rules))
        .layer(cors)
        .with_state(state)
}

/// Start the REST API server on the given address.
pub async fn start(addr: std::net::SocketAddr, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("REST API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

// ── Handlers ────────────────────────────────────────────────────

async fn health() -> Json<Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn handle_scan_query(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ScanParams>,
) -> Response {
    run_scan(&state, &params.url).await
}

async fn handle_scan_body(
    State(state): State<Arc<AppState>>,
    Json(params): Json<ScanParams>,
) -> Response {
    run_scan(&state, &params.url).await
}

async fn run_scan(state: &AppState, url: &str) -> Response {
    if url.trim().is_empty() {
        return Json(ScanResult::Failure {
            error: "Please enter a URL first.".to_string(),
        })
        .into_response();
    }

    Json(state.scanner.scan(url).await).into_response()
}

async fn handle_rules(State(state): State<Arc<AppState>>) -> Json<Vec<RuleInfo>> {
    let profile = state.scanner.config().profile;
    Json(rules_for(profile).map(|r| r.info()).collect())
}
