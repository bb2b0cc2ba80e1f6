//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{blocks, bookings, catalog, customers, employees, health, slots, webhook, working_hours};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Navalha API",
        version = "0.3.0",
        description = "Barbershop booking backend REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Employees
        employees::list_employees,
        employees::get_employee,
        employees::create_employee,
        employees::update_employee,
        employees::delete_employee,
        // Working hours
        working_hours::list_working_hours,
        working_hours::upsert_working_hours,
        working_hours::delete_working_hours,
        // Blocks
        blocks::list_blocks,
        blocks::create_block,
        blocks::delete_block,
        // Customers
        customers::list_customers,
        customers::get_customer,
        customers::create_customer,
        customers::update_customer,
        customers::delete_customer,
        // Services
        catalog::list_services,
        catalog::get_service,
        catalog::create_service,
        catalog::update_service,
        catalog::delete_service,
        // Bookings
        bookings::create_booking,
        bookings::list_bookings,
        bookings::get_booking,
        bookings::confirm_booking,
        bookings::cancel_booking,
        // Slots
        slots::list_slots,
        // Webhook
        webhook::receive_webhook,
    ),
    components(
        schemas(
            crate::error::ErrorResponse,
            health::HealthResponse,
            crate::models::employee::Employee,
            crate::models::employee::CreateEmployee,
            crate::models::employee::UpdateEmployee,
            crate::models::customer::Customer,
            crate::models::customer::CreateCustomer,
            crate::models::customer::UpdateCustomer,
            crate::models::service::Service,
            crate::models::service::CreateService,
            crate::models::service::UpdateService,
            crate::models::working_hours::Weekday,
            crate::models::working_hours::WorkingHours,
            crate::models::working_hours::UpsertWorkingHours,
            crate::models::block::Block,
            crate::models::block::CreateBlock,
            crate::models::booking::Booking,
            crate::models::booking::CreateBooking,
            crate::models::slot::Slot,
            crate::models::slot::SlotQuery,
            crate::models::webhook::WebhookPayload,
        )
    ),
    tags(
        (name = "health", description = "Service health"),
        (name = "employees", description = "Barber management"),
        (name = "customers", description = "Customer management"),
        (name = "services", description = "Service catalog"),
        (name = "schedules", description = "Working hours and blocks"),
        (name = "bookings", description = "Appointments"),
        (name = "slots", description = "Availability"),
        (name = "webhook", description = "WhatsApp integration"),
    )
)]
pub struct ApiDoc;

/// Create the Swagger UI router
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
