//! Customers repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::customer::{CreateCustomer, Customer, UpdateCustomer},
};

#[derive(Clone)]
pub struct CustomersRepository {
    pool: Pool<Postgres>,
}

impl CustomersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get customer by ID (active rows only)
    pub async fn get_by_id(&self, id: i32) -> AppResult<Customer> {
        sqlx::query_as::<_, Customer>(
            "SELECT * FROM customers WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Customer with id {} not found", id)))
    }

    /// Get customer by WhatsApp phone number (active rows only)
    pub async fn get_by_phone(&self, phone: &str) -> AppResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            "SELECT * FROM customers WHERE phone = $1 AND is_deleted = FALSE",
        )
        .bind(phone)
        .fetch_optional(&self.pool)
        .await?;
        Ok(customer)
    }

    /// List active customers ordered by name
    pub async fn list(&self) -> AppResult<Vec<Customer>> {
        let rows = sqlx::query_as::<_, Customer>(
            "SELECT * FROM customers WHERE is_deleted = FALSE ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Create a new customer
    pub async fn create(&self, data: &CreateCustomer) -> AppResult<Customer> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM customers WHERE phone = $1 AND is_deleted = FALSE)",
        )
        .bind(&data.phone)
        .fetch_one(&self.pool)
        .await?;
        if exists {
            return Err(AppError::Conflict(format!(
                "Customer with phone {} already exists",
                data.phone
            )));
        }

        let row = sqlx::query_as::<_, Customer>(
            "INSERT INTO customers (name, phone) VALUES ($1, $2) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.phone)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Get the customer for a phone number, creating the row on first contact
    pub async fn get_or_create(&self, phone: &str, name: &str) -> AppResult<Customer> {
        if let Some(customer) = self.get_by_phone(phone).await? {
            return Ok(customer);
        }
        let row = sqlx::query_as::<_, Customer>(
            "INSERT INTO customers (name, phone) VALUES ($1, $2) RETURNING *",
        )
        .bind(name)
        .bind(phone)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update a customer (partial)
    pub async fn update(&self, id: i32, data: &UpdateCustomer) -> AppResult<Customer> {
        let now = Utc::now();
        let mut sets = vec!["updated_at = $1".to_string()];
        let mut idx = 2;

        if data.name.is_some() {
            sets.push(format!("name = ${}", idx));
            idx += 1;
        }
        if data.phone.is_some() {
            sets.push(format!("phone = ${}", idx));
            idx += 1;
        }

        let query = format!(
            "UPDATE customers SET {} WHERE id = ${} AND is_deleted = FALSE RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, Customer>(&query).bind(now);
        if let Some(ref name) = data.name {
            builder = builder.bind(name);
        }
        if let Some(ref phone) = data.phone {
            builder = builder.bind(phone);
        }
        builder = builder.bind(id);

        builder
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Customer with id {} not found", id)))
    }

    /// Soft delete a customer
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE customers SET is_deleted = TRUE, deleted_at = $1 WHERE id = $2 AND is_deleted = FALSE",
        )
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Customer with id {} not found",
                id
            )));
        }
        Ok(())
    }
}
