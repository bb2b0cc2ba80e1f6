//! Navalha Barbershop Booking Backend
//!
//! A Rust implementation of the Navalha barbershop booking server,
//! providing a REST JSON API for managing employees, services and bookings,
//! plus a WhatsApp webhook bot that walks clients through scheduling a visit.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub pool: sqlx::PgPool,
    pub services: Arc<services::Services>,
}
