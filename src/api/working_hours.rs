//! Working hours API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::working_hours::{UpsertWorkingHours, Weekday, WorkingHours},
};

/// List an employee's configured working hours
#[utoipa::path(
    get,
    path = "/employees/{id}/working-hours",
    tag = "schedules",
    params(("id" = i32, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Configured hours, Monday first", body = Vec<WorkingHours>),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn list_working_hours(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<WorkingHours>>> {
    let hours = state.services.schedules.list_working_hours(id).await?;
    Ok(Json(hours))
}

/// Insert or replace the hours for one weekday
#[utoipa::path(
    put,
    path = "/employees/{id}/working-hours",
    tag = "schedules",
    params(("id" = i32, Path, description = "Employee ID")),
    request_body = UpsertWorkingHours,
    responses(
        (status = 200, description = "Hours stored", body = WorkingHours),
        (status = 400, description = "Invalid times or lunch break")
    )
)]
pub async fn upsert_working_hours(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpsertWorkingHours>,
) -> AppResult<Json<WorkingHours>> {
    let hours = state
        .services
        .schedules
        .upsert_working_hours(id, &data)
        .await?;
    Ok(Json(hours))
}

/// Remove the hours for one weekday (a day off)
#[utoipa::path(
    delete,
    path = "/employees/{id}/working-hours/{weekday}",
    tag = "schedules",
    params(
        ("id" = i32, Path, description = "Employee ID"),
        ("weekday" = String, Path, description = "Weekday name (monday..sunday)")
    ),
    responses(
        (status = 204, description = "Hours removed")
    )
)]
pub async fn delete_working_hours(
    State(state): State<crate::AppState>,
    Path((id, weekday)): Path<(i32, String)>,
) -> AppResult<StatusCode> {
    let weekday: Weekday = weekday
        .parse()
        .map_err(AppError::Validation)?;
    state
        .services
        .schedules
        .delete_working_hours(id, weekday)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
