//! Database Models
//!
//! Plain serde + sqlx rows, one file per entity, with Create/Update payload
//! structs next to the entity they describe.

pub mod dining_table;
pub mod operating_day;
pub mod promoter;
pub mod reservation;
pub mod reservation_settings;
pub mod zone;

pub use dining_table::{DiningTable, Point, TableShape, TableUpsert};
pub use operating_day::{OperatingDay, OperatingDayUpdate};
pub use promoter::Promoter;
pub use reservation::{CustomerContact, NewReservation, Reservation, ReservationStatus};
pub use reservation_settings::{ReservationSettings, ReservationSettingsUpdate};
pub use zone::{Zone, ZoneCreate};
