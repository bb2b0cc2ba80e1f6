//! Business logic services

pub mod availability;
pub mod bookings;
pub mod bot;
pub mod catalog;
pub mod customers;
pub mod employees;
pub mod schedules;
pub mod session;
pub mod whatsapp;

use crate::{
    config::{BookingConfig, WhatsAppConfig},
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub employees: employees::EmployeesService,
    pub customers: customers::CustomersService,
    pub catalog: catalog::CatalogService,
    pub schedules: schedules::SchedulesService,
    pub bookings: bookings::BookingsService,
    pub availability: availability::AvailabilityService,
    pub session: session::SessionService,
    pub whatsapp: whatsapp::WhatsAppService,
    pub bot: bot::BotService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(
        repository: Repository,
        booking_config: BookingConfig,
        whatsapp_config: WhatsAppConfig,
        session_service: session::SessionService,
    ) -> Self {
        let availability =
            availability::AvailabilityService::new(repository.clone(), booking_config);
        let bookings = bookings::BookingsService::new(repository.clone());
        let whatsapp = whatsapp::WhatsAppService::new(whatsapp_config);
        let bot = bot::BotService::new(
            repository.clone(),
            availability.clone(),
            bookings.clone(),
            session_service.clone(),
            whatsapp.clone(),
        );

        Self {
            employees: employees::EmployeesService::new(repository.clone()),
            customers: customers::CustomersService::new(repository.clone()),
            catalog: catalog::CatalogService::new(repository.clone()),
            schedules: schedules::SchedulesService::new(repository),
            bookings,
            availability,
            session: session_service,
            whatsapp,
            bot,
        }
    }
}
