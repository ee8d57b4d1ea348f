//! Dining Table Model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Table shape kinds - geometry only, no behavioral difference for
/// availability logic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum TableShape {
    Rect,
    Round,
    Bar,
    LShape,
    TShape,
    /// Free-form point list, stored in `points_json`
    Custom,
}

/// A vertex of a free-form table outline
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Dining table entity - belongs to exactly one zone, capacity >= 1
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DiningTable {
    pub id: i64,
    pub zone_id: i64,
    pub label: String,
    pub capacity: i64,
    pub shape: TableShape,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
    pub points_json: Option<String>,
}

/// Table entry in a wholesale layout replace
///
/// `id = None` inserts a new table; a present `id` updates the stored row.
/// Tables missing from the incoming list are deleted.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TableUpsert {
    pub id: Option<i64>,
    #[validate(length(min = 1, max = 64))]
    pub label: String,
    #[validate(range(min = 1))]
    pub capacity: i64,
    pub shape: TableShape,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub points: Option<Vec<Point>>,
}
