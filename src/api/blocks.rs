//! Block API endpoints (employee time off)

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;

use crate::{
    error::{AppError, AppResult},
    models::block::{Block, BlockQuery, CreateBlock},
};

/// List an employee's active blocks
#[utoipa::path(
    get,
    path = "/employees/{id}/blocks",
    tag = "schedules",
    params(
        ("id" = i32, Path, description = "Employee ID"),
        BlockQuery
    ),
    responses(
        (status = 200, description = "Active blocks", body = Vec<Block>)
    )
)]
pub async fn list_blocks(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Query(query): Query<BlockQuery>,
) -> AppResult<Json<Vec<Block>>> {
    let date = query
        .date
        .as_deref()
        .map(|s| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map_err(|_| AppError::Validation("Invalid date (use YYYY-MM-DD)".to_string()))
        })
        .transpose()?;
    let blocks = state.services.schedules.list_blocks(id, date).await?;
    Ok(Json(blocks))
}

/// Create a block
#[utoipa::path(
    post,
    path = "/employees/{id}/blocks",
    tag = "schedules",
    params(("id" = i32, Path, description = "Employee ID")),
    request_body = CreateBlock,
    responses(
        (status = 201, description = "Block created", body = Block),
        (status = 400, description = "Invalid window")
    )
)]
pub async fn create_block(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<CreateBlock>,
) -> AppResult<(StatusCode, Json<Block>)> {
    let block = state.services.schedules.create_block(id, &data).await?;
    Ok((StatusCode::CREATED, Json(block)))
}

/// Soft delete a block
#[utoipa::path(
    delete,
    path = "/blocks/{id}",
    tag = "schedules",
    params(("id" = i32, Path, description = "Block ID")),
    responses(
        (status = 204, description = "Block deleted")
    )
)]
pub async fn delete_block(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.schedules.delete_block(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
