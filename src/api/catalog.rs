//! Service catalog API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::service::{CreateService, Service, UpdateService},
};

/// List services
#[utoipa::path(
    get,
    path = "/services",
    tag = "services",
    responses(
        (status = 200, description = "Active services", body = Vec<Service>)
    )
)]
pub async fn list_services(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Service>>> {
    let services = state.services.catalog.list().await?;
    Ok(Json(services))
}

/// Get a service
#[utoipa::path(
    get,
    path = "/services/{id}",
    tag = "services",
    params(("id" = i32, Path, description = "Service ID")),
    responses(
        (status = 200, description = "Service", body = Service),
        (status = 404, description = "Service not found")
    )
)]
pub async fn get_service(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Service>> {
    let service = state.services.catalog.get(id).await?;
    Ok(Json(service))
}

/// Create a service
#[utoipa::path(
    post,
    path = "/services",
    tag = "services",
    request_body = CreateService,
    responses(
        (status = 201, description = "Service created", body = Service)
    )
)]
pub async fn create_service(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateService>,
) -> AppResult<(StatusCode, Json<Service>)> {
    let service = state.services.catalog.create(&data).await?;
    Ok((StatusCode::CREATED, Json(service)))
}

/// Update a service
#[utoipa::path(
    put,
    path = "/services/{id}",
    tag = "services",
    params(("id" = i32, Path, description = "Service ID")),
    request_body = UpdateService,
    responses(
        (status = 200, description = "Service updated", body = Service)
    )
)]
pub async fn update_service(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateService>,
) -> AppResult<Json<Service>> {
    let service = state.services.catalog.update(id, &data).await?;
    Ok(Json(service))
}

/// Soft delete a service
#[utoipa::path(
    delete,
    path = "/services/{id}",
    tag = "services",
    params(("id" = i32, Path, description = "Service ID")),
    responses(
        (status = 204, description = "Service deleted")
    )
)]
pub async fn delete_service(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.catalog.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
