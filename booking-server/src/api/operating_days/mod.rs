//! Operating Days API Module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/api/operating-days",
        get(handler::get_week).put(handler::update_week),
    )
}
