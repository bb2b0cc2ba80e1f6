//! Slot availability API endpoint

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::slot::{Slot, SlotQuery},
};

/// List available slots for an employee on a date.
///
/// Supply either `service_id` (the employee's working hours and the
/// service duration drive the computation) or explicit
/// `work_start`/`work_end`/`slot_minutes` for ad hoc step-sized windows.
#[utoipa::path(
    post,
    path = "/slots",
    tag = "slots",
    request_body = SlotQuery,
    responses(
        (status = 200, description = "Available windows, chronological", body = Vec<Slot>),
        (status = 400, description = "Malformed date, times or step")
    )
)]
pub async fn list_slots(
    State(state): State<crate::AppState>,
    Json(query): Json<SlotQuery>,
) -> AppResult<Json<Vec<Slot>>> {
    let slots = state.services.availability.list_available_slots(&query).await?;
    Ok(Json(slots))
}
