//! Repository layer for database operations

pub mod blocks;
pub mod bookings;
pub mod catalog;
pub mod customers;
pub mod employees;
pub mod working_hours;

use sqlx::{Pool, Postgres};

/// Per-domain repositories sharing one connection pool
#[derive(Clone)]
pub struct Repository {
    pub employees: employees::EmployeesRepository,
    pub customers: customers::CustomersRepository,
    pub catalog: catalog::CatalogRepository,
    pub working_hours: working_hours::WorkingHoursRepository,
    pub blocks: blocks::BlocksRepository,
    pub bookings: bookings::BookingsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            employees: employees::EmployeesRepository::new(pool.clone()),
            customers: customers::CustomersRepository::new(pool.clone()),
            catalog: catalog::CatalogRepository::new(pool.clone()),
            working_hours: working_hours::WorkingHoursRepository::new(pool.clone()),
            blocks: blocks::BlocksRepository::new(pool.clone()),
            bookings: bookings::BookingsRepository::new(pool),
        }
    }
}
