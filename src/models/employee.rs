//! Employee (barber) model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// A barber working at the shop
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Employee {
    pub id: i32,
    /// Display name
    pub name: String,
    pub date_of_birth: Option<NaiveDate>,
    /// WhatsApp phone number, unique among active employees
    pub phone: String,
    /// Role label (e.g. "barber", "manager")
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub is_deleted: bool,
}

/// Create employee request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEmployee {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    /// Date of birth (YYYY-MM-DD)
    pub date_of_birth: Option<String>,
    #[validate(length(min = 8, max = 40))]
    pub phone: String,
    #[validate(length(min = 1, max = 40))]
    pub role: String,
}

/// Update employee request (partial)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEmployee {
    #[validate(length(min = 1, max = 120))]
    pub name: Option<String>,
    pub date_of_birth: Option<String>,
    #[validate(length(min = 8, max = 40))]
    pub phone: Option<String>,
    #[validate(length(min = 1, max = 40))]
    pub role: Option<String>,
}
