//! Bookings repository for database operations

use chrono::{Duration, NaiveDate, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::booking::{Booking, BookingWindow, CreateBooking},
};

/// Advisory-lock namespace for booking writes
const BOOKING_LOCK_NAMESPACE: i32 = 0x6e76_6c61;

#[derive(Clone)]
pub struct BookingsRepository {
    pool: Pool<Postgres>,
}

impl BookingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get booking by ID (active rows only)
    pub async fn get_by_id(&self, id: i32) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1 AND is_deleted = FALSE")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking with id {} not found", id)))
    }

    /// List active bookings, optionally filtered by employee and date
    pub async fn list(
        &self,
        employee_id: Option<i32>,
        date: Option<NaiveDate>,
    ) -> AppResult<Vec<Booking>> {
        let mut conditions = vec!["is_deleted = FALSE".to_string()];
        let mut idx = 1;

        if employee_id.is_some() {
            conditions.push(format!("employee_id = ${}", idx));
            idx += 1;
        }
        if date.is_some() {
            conditions.push(format!(
                "start_time >= ${} AND start_time < ${}",
                idx,
                idx + 1
            ));
        }

        let query = format!(
            "SELECT * FROM bookings WHERE {} ORDER BY start_time",
            conditions.join(" AND ")
        );

        let mut builder = sqlx::query_as::<_, Booking>(&query);
        if let Some(id) = employee_id {
            builder = builder.bind(id);
        }
        if let Some(date) = date {
            let day_start = date.and_time(chrono::NaiveTime::MIN);
            builder = builder.bind(day_start).bind(day_start + Duration::days(1));
        }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Active bookings for an employee on one date, reduced to the start
    /// time and booked-service duration the availability resolver needs
    pub async fn windows_for_date(
        &self,
        employee_id: i32,
        date: NaiveDate,
    ) -> AppResult<Vec<BookingWindow>> {
        let day_start = date.and_time(chrono::NaiveTime::MIN);
        let rows = sqlx::query_as::<_, BookingWindow>(
            r#"
            SELECT b.start_time, s.duration_minutes
            FROM bookings b
            JOIN services s ON b.service_id = s.id
            WHERE b.employee_id = $1 AND b.is_deleted = FALSE
              AND b.start_time >= $2 AND b.start_time < $3
            ORDER BY b.start_time
            "#,
        )
        .bind(employee_id)
        .bind(day_start)
        .bind(day_start + Duration::days(1))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Create a booking.
    ///
    /// Insertion is the authoritative conflict point: availability is computed
    /// from a snapshot read, so two clients can both see the same slot as
    /// free. The write re-checks for overlap inside a transaction that holds
    /// a per-employee advisory lock; the losing writer gets a Conflict.
    pub async fn create(&self, data: &CreateBooking) -> AppResult<Booking> {
        let mut tx = self.pool.begin().await?;

        // Serialize concurrent writers for the same employee
        sqlx::query("SELECT pg_advisory_xact_lock($1, $2)")
            .bind(BOOKING_LOCK_NAMESPACE)
            .bind(data.employee_id)
            .execute(&mut *tx)
            .await?;

        let duration_minutes: i32 = sqlx::query_scalar(
            "SELECT duration_minutes FROM services WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(data.service_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Service with id {} not found", data.service_id)))?;

        let end_time = data.start_time + Duration::minutes(duration_minutes as i64);

        // Re-check: any active booking for this employee whose own window
        // intersects [start_time, end_time)? The end boundary is inclusive
        // against a booking's start, matching the availability resolver.
        let conflicting: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1
                FROM bookings b
                JOIN services s ON b.service_id = s.id
                WHERE b.employee_id = $1 AND b.is_deleted = FALSE
                  AND b.start_time <= $3
                  AND b.start_time + make_interval(mins => s.duration_minutes) > $2
            )
            "#,
        )
        .bind(data.employee_id)
        .bind(data.start_time)
        .bind(end_time)
        .fetch_one(&mut *tx)
        .await?;

        if conflicting {
            return Err(AppError::Conflict(
                "The requested time is no longer available".to_string(),
            ));
        }

        let row = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (employee_id, service_id, customer_id, start_time)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(data.employee_id)
        .bind(data.service_id)
        .bind(data.customer_id)
        .bind(data.start_time)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row)
    }

    /// Mark a booking as confirmed by the employee
    pub async fn confirm(&self, id: i32) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings SET is_confirmed = TRUE, updated_at = $1
            WHERE id = $2 AND is_deleted = FALSE
            RETURNING *
            "#,
        )
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Booking with id {} not found", id)))
    }

    /// Cancel (soft delete) a booking
    pub async fn cancel(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE bookings SET is_deleted = TRUE, deleted_at = $1 WHERE id = $2 AND is_deleted = FALSE",
        )
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Booking with id {} not found",
                id
            )));
        }
        Ok(())
    }
}
