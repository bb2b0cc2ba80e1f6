//! API handlers for Navalha REST endpoints

pub mod blocks;
pub mod bookings;
pub mod catalog;
pub mod customers;
pub mod employees;
pub mod health;
pub mod openapi;
pub mod slots;
pub mod webhook;
pub mod working_hours;
