//! Block model (ad-hoc unavailable windows)

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

/// An explicit unavailable window for one employee.
///
/// Blocks are soft-deleted; only rows with `is_deleted = false` count
/// against availability.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Block {
    pub id: i32,
    pub employee_id: i32,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub is_deleted: bool,
}

/// Create block request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBlock {
    /// Window start (YYYY-MM-DDTHH:MM:SS)
    pub start_time: NaiveDateTime,
    /// Window end (YYYY-MM-DDTHH:MM:SS)
    pub end_time: NaiveDateTime,
    pub reason: Option<String>,
}

/// Query parameters for listing blocks
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct BlockQuery {
    /// Restrict to blocks touching this date (YYYY-MM-DD)
    pub date: Option<String>,
}
