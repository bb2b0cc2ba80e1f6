//! Slot types (derived availability windows, never persisted)

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A bookable window, produced fresh per query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Slot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Slot listing request.
///
/// Two call shapes share this type: supply `service_id` to resolve against
/// the employee's configured working hours (lunch included), or supply
/// `work_start`/`work_end`/`slot_minutes` to list ad hoc step-sized windows
/// that bypass the working-hours configuration. Both shapes are filtered
/// against the same bookings and blocks.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SlotQuery {
    pub employee_id: i32,
    /// Target date (YYYY-MM-DD)
    pub date: String,
    /// Service to schedule; resolves duration and working hours
    pub service_id: Option<i32>,
    /// Ad hoc window start (HH:MM), used when no service_id is given
    pub work_start: Option<String>,
    /// Ad hoc window end (HH:MM), used when no service_id is given
    pub work_end: Option<String>,
    /// Slot granularity in minutes for the ad hoc shape
    pub slot_minutes: Option<i64>,
}
