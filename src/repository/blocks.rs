//! Blocks repository for database operations

use chrono::{NaiveDate, NaiveDateTime, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::block::{Block, CreateBlock},
};

#[derive(Clone)]
pub struct BlocksRepository {
    pool: Pool<Postgres>,
}

impl BlocksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List active blocks for an employee, optionally restricted to those
    /// touching the 24-hour span of one date
    pub async fn list(&self, employee_id: i32, date: Option<NaiveDate>) -> AppResult<Vec<Block>> {
        let rows = match date {
            Some(date) => {
                let day_start = date.and_time(chrono::NaiveTime::MIN);
                let day_end = day_start + chrono::Duration::days(1);
                sqlx::query_as::<_, Block>(
                    r#"
                    SELECT * FROM blocks
                    WHERE employee_id = $1 AND is_deleted = FALSE
                      AND start_time < $3 AND end_time > $2
                    ORDER BY start_time
                    "#,
                )
                .bind(employee_id)
                .bind(day_start)
                .bind(day_end)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Block>(
                    r#"
                    SELECT * FROM blocks
                    WHERE employee_id = $1 AND is_deleted = FALSE
                    ORDER BY start_time
                    "#,
                )
                .bind(employee_id)
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(rows)
    }

    /// Active block windows for an employee on one date, for the resolver
    pub async fn windows_for_date(
        &self,
        employee_id: i32,
        date: NaiveDate,
    ) -> AppResult<Vec<(NaiveDateTime, NaiveDateTime)>> {
        let blocks = self.list(employee_id, Some(date)).await?;
        Ok(blocks
            .into_iter()
            .map(|b| (b.start_time, b.end_time))
            .collect())
    }

    /// Create a block
    pub async fn create(&self, employee_id: i32, data: &CreateBlock) -> AppResult<Block> {
        if data.start_time >= data.end_time {
            return Err(AppError::Validation(
                "start_time must be before end_time".to_string(),
            ));
        }

        let row = sqlx::query_as::<_, Block>(
            r#"
            INSERT INTO blocks (employee_id, start_time, end_time, reason)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(employee_id)
        .bind(data.start_time)
        .bind(data.end_time)
        .bind(&data.reason)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Soft delete a block
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE blocks SET is_deleted = TRUE, deleted_at = $1 WHERE id = $2 AND is_deleted = FALSE",
        )
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Block with id {} not found", id)));
        }
        Ok(())
    }
}
