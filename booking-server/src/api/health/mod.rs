//! Health API Module

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/health", get(health))
}

/// GET /api/health - liveness check
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
