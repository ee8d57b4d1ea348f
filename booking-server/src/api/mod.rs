//! API Route Modules
//!
//! # Structure
//!
//! - [`health`] - liveness check
//! - [`zones`] - floor model: zones and layout replace
//! - [`availability`] - read-only table/capacity availability
//! - [`reservations`] - booking entry point and staff day view
//! - [`settings`] - reservation settings singleton
//! - [`operating_days`] - per-weekday business hours

pub mod availability;
pub mod health;
pub mod operating_days;
pub mod reservations;
pub mod settings;
pub mod zones;

use crate::core::ServerState;
use axum::Router;

pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(zones::router())
        .merge(availability::router())
        .merge(reservations::router())
        .merge(settings::router())
        .merge(operating_days::router())
}
