//! Service (catalog offering) model and related types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// A bookable service (haircut, beard trim, ...)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Service {
    pub id: i32,
    pub description: String,
    /// Price charged for the service
    #[schema(value_type = String)]
    pub price: Decimal,
    /// How long the service takes, in minutes
    pub duration_minutes: i32,
    /// Commission fraction paid to the employee
    pub commission: f64,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub is_deleted: bool,
}

/// Create service request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateService {
    #[validate(length(min = 1, max = 60))]
    pub description: String,
    #[schema(value_type = String)]
    pub price: Decimal,
    #[validate(range(min = 1, max = 480))]
    pub duration_minutes: i32,
    #[validate(range(min = 0.0, max = 1.0))]
    pub commission: f64,
    #[validate(length(min = 1, max = 20))]
    pub category: String,
}

/// Update service request (partial)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateService {
    #[validate(length(min = 1, max = 60))]
    pub description: Option<String>,
    #[schema(value_type = Option<String>)]
    pub price: Option<Decimal>,
    #[validate(range(min = 1, max = 480))]
    pub duration_minutes: Option<i32>,
    #[validate(range(min = 0.0, max = 1.0))]
    pub commission: Option<f64>,
    #[validate(length(min = 1, max = 20))]
    pub category: Option<String>,
}
