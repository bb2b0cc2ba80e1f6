//! Catalog repository (bookable services)

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::service::{CreateService, Service, UpdateService},
};

#[derive(Clone)]
pub struct CatalogRepository {
    pool: Pool<Postgres>,
}

impl CatalogRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get a service by ID (active rows only)
    pub async fn get_by_id(&self, id: i32) -> AppResult<Service> {
        sqlx::query_as::<_, Service>("SELECT * FROM services WHERE id = $1 AND is_deleted = FALSE")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Service with id {} not found", id)))
    }

    /// Get a service by ID, returning None for missing or soft-deleted rows.
    ///
    /// Used by the availability resolver, where a missing service means an
    /// empty slot list rather than an error.
    pub async fn find_active(&self, id: i32) -> AppResult<Option<Service>> {
        let service = sqlx::query_as::<_, Service>(
            "SELECT * FROM services WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(service)
    }

    /// List active services ordered by category then description
    pub async fn list(&self) -> AppResult<Vec<Service>> {
        let rows = sqlx::query_as::<_, Service>(
            "SELECT * FROM services WHERE is_deleted = FALSE ORDER BY category, description",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Create a new service
    pub async fn create(&self, data: &CreateService) -> AppResult<Service> {
        let row = sqlx::query_as::<_, Service>(
            r#"
            INSERT INTO services (description, price, duration_minutes, commission, category)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&data.description)
        .bind(data.price)
        .bind(data.duration_minutes)
        .bind(data.commission)
        .bind(&data.category)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update a service (partial)
    pub async fn update(&self, id: i32, data: &UpdateService) -> AppResult<Service> {
        let now = Utc::now();
        let mut sets = vec!["updated_at = $1".to_string()];
        let mut idx = 2;

        if data.description.is_some() {
            sets.push(format!("description = ${}", idx));
            idx += 1;
        }
        if data.price.is_some() {
            sets.push(format!("price = ${}", idx));
            idx += 1;
        }
        if data.duration_minutes.is_some() {
            sets.push(format!("duration_minutes = ${}", idx));
            idx += 1;
        }
        if data.commission.is_some() {
            sets.push(format!("commission = ${}", idx));
            idx += 1;
        }
        if data.category.is_some() {
            sets.push(format!("category = ${}", idx));
            idx += 1;
        }

        let query = format!(
            "UPDATE services SET {} WHERE id = ${} AND is_deleted = FALSE RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, Service>(&query).bind(now);
        if let Some(ref description) = data.description {
            builder = builder.bind(description);
        }
        if let Some(price) = data.price {
            builder = builder.bind(price);
        }
        if let Some(duration_minutes) = data.duration_minutes {
            builder = builder.bind(duration_minutes);
        }
        if let Some(commission) = data.commission {
            builder = builder.bind(commission);
        }
        if let Some(ref category) = data.category {
            builder = builder.bind(category);
        }
        builder = builder.bind(id);

        builder
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Service with id {} not found", id)))
    }

    /// Soft delete a service
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE services SET is_deleted = TRUE, deleted_at = $1 WHERE id = $2 AND is_deleted = FALSE",
        )
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Service with id {} not found",
                id
            )));
        }
        Ok(())
    }
}
