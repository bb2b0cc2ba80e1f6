//! Bookings service

use chrono::NaiveDate;

use crate::{
    error::AppResult,
    models::booking::{Booking, CreateBooking},
    repository::Repository,
};

#[derive(Clone)]
pub struct BookingsService {
    repository: Repository,
}

impl BookingsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn get(&self, id: i32) -> AppResult<Booking> {
        self.repository.bookings.get_by_id(id).await
    }

    pub async fn list(
        &self,
        employee_id: Option<i32>,
        date: Option<NaiveDate>,
    ) -> AppResult<Vec<Booking>> {
        self.repository.bookings.list(employee_id, date).await
    }

    /// Create a booking. Referenced rows are checked first so an unknown
    /// employee or customer surfaces as NotFound rather than a foreign-key
    /// fault; the overlap guard itself lives in the repository write.
    pub async fn create(&self, data: &CreateBooking) -> AppResult<Booking> {
        self.repository.employees.get_by_id(data.employee_id).await?;
        self.repository.customers.get_by_id(data.customer_id).await?;
        self.repository.bookings.create(data).await
    }

    pub async fn confirm(&self, id: i32) -> AppResult<Booking> {
        self.repository.bookings.confirm(id).await
    }

    pub async fn cancel(&self, id: i32) -> AppResult<()> {
        self.repository.bookings.cancel(id).await
    }
}
