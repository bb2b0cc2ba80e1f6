//! WhatsApp webhook endpoint (Evolution API)

use axum::{extract::State, http::StatusCode, Json};

use crate::{error::AppResult, models::webhook::WebhookPayload};

/// Receive an Evolution API webhook event.
///
/// Events that do not carry an inbound text message (status updates, our
/// own sends) are acknowledged and ignored, as are redelivered messages
/// (deduplicated by gateway message id). The gateway retries on non-2xx
/// answers, so bot faults are logged but still acknowledged; only a phone
/// over its rate window gets 429.
#[utoipa::path(
    post,
    path = "/webhook",
    tag = "webhook",
    request_body = WebhookPayload,
    responses(
        (status = 200, description = "Event acknowledged"),
        (status = 429, description = "Too many messages from this phone")
    )
)]
pub async fn receive_webhook(
    State(state): State<crate::AppState>,
    Json(payload): Json<WebhookPayload>,
) -> AppResult<StatusCode> {
    let Some(message) = payload.message() else {
        return Ok(StatusCode::OK);
    };

    let first_delivery = state
        .services
        .session
        .register_message(&message.sender, &message.id, message.timestamp)
        .await?;
    if !first_delivery {
        tracing::info!(sender = %message.sender, id = %message.id, "Duplicate message ignored");
        return Ok(StatusCode::OK);
    }

    if !state.services.session.within_rate_limit(&message.sender).await? {
        tracing::warn!(sender = %message.sender, "Rate limit exceeded");
        return Ok(StatusCode::TOO_MANY_REQUESTS);
    }

    tracing::info!(sender = %message.sender, "Webhook message received");

    if let Err(e) = state.services.bot.handle_message(&message).await {
        tracing::error!(sender = %message.sender, "Bot failed to handle message: {}", e);
    }

    Ok(StatusCode::OK)
}
