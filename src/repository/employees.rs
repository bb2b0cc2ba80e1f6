//! Employees repository for database operations

use chrono::{NaiveDate, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::employee::{CreateEmployee, Employee, UpdateEmployee},
};

#[derive(Clone)]
pub struct EmployeesRepository {
    pool: Pool<Postgres>,
}

impl EmployeesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get employee by ID (active rows only)
    pub async fn get_by_id(&self, id: i32) -> AppResult<Employee> {
        sqlx::query_as::<_, Employee>(
            "SELECT * FROM employees WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Employee with id {} not found", id)))
    }

    /// Get employee by WhatsApp phone number (active rows only)
    pub async fn get_by_phone(&self, phone: &str) -> AppResult<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(
            "SELECT * FROM employees WHERE phone = $1 AND is_deleted = FALSE",
        )
        .bind(phone)
        .fetch_optional(&self.pool)
        .await?;
        Ok(employee)
    }

    /// List active employees ordered by name
    pub async fn list(&self) -> AppResult<Vec<Employee>> {
        let rows = sqlx::query_as::<_, Employee>(
            "SELECT * FROM employees WHERE is_deleted = FALSE ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Create a new employee
    pub async fn create(&self, data: &CreateEmployee) -> AppResult<Employee> {
        let date_of_birth = data
            .date_of_birth
            .as_deref()
            .map(|s| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .map_err(|_| AppError::Validation("Invalid date_of_birth".to_string()))
            })
            .transpose()?;

        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM employees WHERE phone = $1 AND is_deleted = FALSE)",
        )
        .bind(&data.phone)
        .fetch_one(&self.pool)
        .await?;
        if exists {
            return Err(AppError::Conflict(format!(
                "Employee with phone {} already exists",
                data.phone
            )));
        }

        let row = sqlx::query_as::<_, Employee>(
            r#"
            INSERT INTO employees (name, date_of_birth, phone, role)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(date_of_birth)
        .bind(&data.phone)
        .bind(&data.role)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update an employee (partial)
    pub async fn update(&self, id: i32, data: &UpdateEmployee) -> AppResult<Employee> {
        let now = Utc::now();
        let mut sets = vec!["updated_at = $1".to_string()];
        let mut idx = 2;

        if data.name.is_some() {
            sets.push(format!("name = ${}", idx));
            idx += 1;
        }
        if data.date_of_birth.is_some() {
            sets.push(format!("date_of_birth = ${}", idx));
            idx += 1;
        }
        if data.phone.is_some() {
            sets.push(format!("phone = ${}", idx));
            idx += 1;
        }
        if data.role.is_some() {
            sets.push(format!("role = ${}", idx));
            idx += 1;
        }

        let query = format!(
            "UPDATE employees SET {} WHERE id = ${} AND is_deleted = FALSE RETURNING *",
            sets.join(", "),
            idx
        );

        let date_of_birth = data
            .date_of_birth
            .as_deref()
            .map(|s| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .map_err(|_| AppError::Validation("Invalid date_of_birth".to_string()))
            })
            .transpose()?;

        let mut builder = sqlx::query_as::<_, Employee>(&query).bind(now);
        if let Some(ref name) = data.name {
            builder = builder.bind(name);
        }
        if date_of_birth.is_some() {
            builder = builder.bind(date_of_birth);
        }
        if let Some(ref phone) = data.phone {
            builder = builder.bind(phone);
        }
        if let Some(ref role) = data.role {
            builder = builder.bind(role);
        }
        builder = builder.bind(id);

        builder
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Employee with id {} not found", id)))
    }

    /// Soft delete an employee
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE employees SET is_deleted = TRUE, deleted_at = $1 WHERE id = $2 AND is_deleted = FALSE",
        )
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Employee with id {} not found",
                id
            )));
        }
        Ok(())
    }
}
