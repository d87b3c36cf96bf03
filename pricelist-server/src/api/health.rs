//! Liveness and configuration summary
//!
//! Never contacts the upstream API, so it stays fast during an outage.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::upstream::SourceInfo;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub module: &'static str,
    pub version: &'static str,
    pub upstream: SourceInfo,
    /// Code prefixes left out of the rendered tables
    pub hidden_prefixes: Vec<String>,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        module: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        upstream: state.source.describe(),
        hidden_prefixes: state.visibility.hidden_prefixes.clone(),
    })
}
