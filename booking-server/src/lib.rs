//! Booking Server - multi-tenant venue reservation service
//!
//! The admission pipeline for reservation requests: timezone
//! normalization, operating-calendar check, availability computation, and
//! an atomic booking transaction that makes double-booking impossible
//! under concurrent requests.
//!
//! # Module structure
//!
//! ```text
//! booking-server/src/
//! ├── core/     # configuration, state, HTTP server
//! ├── api/      # HTTP routes and handlers
//! ├── auth/     # tenant resolution
//! ├── booking/  # admission core: clock, calendar, availability, transaction
//! ├── db/       # SQLite pool, models, repositories
//! └── utils/    # errors, logging, time helpers
//! ```

pub mod api;
pub mod auth;
pub mod booking;
pub mod core;
pub mod db;
pub mod utils;

// Re-export public types
pub use booking::{BookingError, BookingRequest};
pub use core::{Config, Server, ServerState};
pub use db::DbService;
pub use utils::logger::{init_logger, init_logger_with_file};
pub use utils::{AppError, AppResult};
