//! Working hours repository for database operations

use chrono::NaiveTime;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::working_hours::{UpsertWorkingHours, Weekday, WorkingHours},
};

#[derive(Clone)]
pub struct WorkingHoursRepository {
    pool: Pool<Postgres>,
}

impl WorkingHoursRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get the configured hours for an employee on a weekday, if any.
    ///
    /// None means a day off, which the resolver turns into an empty slot
    /// list rather than an error.
    pub async fn get(&self, employee_id: i32, weekday: Weekday) -> AppResult<Option<WorkingHours>> {
        let row = sqlx::query_as::<_, WorkingHours>(
            "SELECT * FROM working_hours WHERE employee_id = $1 AND weekday = $2",
        )
        .bind(employee_id)
        .bind(weekday)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// List all configured hours for an employee, Monday first
    pub async fn list(&self, employee_id: i32) -> AppResult<Vec<WorkingHours>> {
        let rows = sqlx::query_as::<_, WorkingHours>(
            "SELECT * FROM working_hours WHERE employee_id = $1 ORDER BY weekday",
        )
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Insert or replace the hours for an employee on a weekday
    pub async fn upsert(
        &self,
        employee_id: i32,
        data: &UpsertWorkingHours,
    ) -> AppResult<WorkingHours> {
        let start_time = parse_hhmm(&data.start_time, "start_time")?;
        let end_time = parse_hhmm(&data.end_time, "end_time")?;
        let lunch_start = data
            .lunch_start
            .as_deref()
            .map(|s| parse_hhmm(s, "lunch_start"))
            .transpose()?;
        let lunch_end = data
            .lunch_end
            .as_deref()
            .map(|s| parse_hhmm(s, "lunch_end"))
            .transpose()?;

        if start_time >= end_time {
            return Err(AppError::Validation(
                "start_time must be before end_time".to_string(),
            ));
        }
        match (lunch_start, lunch_end) {
            (None, None) => {}
            (Some(ls), Some(le)) => {
                if !(start_time <= ls && ls < le && le <= end_time) {
                    return Err(AppError::Validation(
                        "Lunch break must fall inside the working window".to_string(),
                    ));
                }
            }
            _ => {
                return Err(AppError::Validation(
                    "lunch_start and lunch_end must be given together".to_string(),
                ));
            }
        }

        let row = sqlx::query_as::<_, WorkingHours>(
            r#"
            INSERT INTO working_hours (employee_id, weekday, start_time, end_time, lunch_start, lunch_end)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (employee_id, weekday)
            DO UPDATE SET start_time = $3, end_time = $4, lunch_start = $5, lunch_end = $6
            RETURNING *
            "#,
        )
        .bind(employee_id)
        .bind(data.weekday)
        .bind(start_time)
        .bind(end_time)
        .bind(lunch_start)
        .bind(lunch_end)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Remove the hours for an employee on a weekday (a day off)
    pub async fn delete(&self, employee_id: i32, weekday: Weekday) -> AppResult<()> {
        let result =
            sqlx::query("DELETE FROM working_hours WHERE employee_id = $1 AND weekday = $2")
                .bind(employee_id)
                .bind(weekday)
                .execute(&self.pool)
                .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "No working hours for employee {} on {}",
                employee_id, weekday
            )));
        }
        Ok(())
    }
}

fn parse_hhmm(value: &str, field: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| AppError::Validation(format!("Invalid {} (use HH:MM)", field)))
}
