//! Data models for Navalha

pub mod block;
pub mod booking;
pub mod customer;
pub mod employee;
pub mod service;
pub mod slot;
pub mod webhook;
pub mod working_hours;

// Re-export commonly used types
pub use block::Block;
pub use booking::{Booking, BookingWindow};
pub use customer::Customer;
pub use employee::Employee;
pub use service::Service;
pub use slot::{Slot, SlotQuery};
pub use working_hours::{Weekday, WorkingHours};
