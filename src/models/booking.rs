//! Booking model (a confirmed or pending schedule entry)

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

/// A booked service for one employee.
///
/// The booking's effective end is `start_time` plus the booked service's
/// duration; it is derived, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Booking {
    pub id: i32,
    pub employee_id: i32,
    pub service_id: i32,
    pub customer_id: i32,
    pub start_time: NaiveDateTime,
    /// Whether the employee confirmed the appointment
    pub is_confirmed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub is_deleted: bool,
}

/// Create booking request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBooking {
    pub employee_id: i32,
    pub service_id: i32,
    pub customer_id: i32,
    /// Appointment start (YYYY-MM-DDTHH:MM:SS)
    pub start_time: NaiveDateTime,
}

/// Query parameters for listing bookings
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct BookingQuery {
    pub employee_id: Option<i32>,
    /// Restrict to bookings on this date (YYYY-MM-DD)
    pub date: Option<String>,
}

/// An active booking reduced to what the availability resolver needs:
/// its start and the booked service's duration.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct BookingWindow {
    pub start_time: NaiveDateTime,
    pub duration_minutes: i32,
}
