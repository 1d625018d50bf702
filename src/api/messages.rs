use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};

use crate::{
    error::{AppError, Result},
    models::{
        message::{MarkReadRequest, Message, SendMessageRequest},
        ApiResponse,
    },
};

use super::{require_user, AppState};

/// POST /api/v1/messages
///
/// Support-chat only: a player may message an admin and nobody else.
/// Admins may reply anywhere.
pub async fn send_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<SendMessageRequest>,
) -> Result<Json<ApiResponse<Message>>> {
    let sender = require_user(&headers, &state).await?;

    if sender.is_blocked {
        return Err(AppError::AccountBlocked);
    }
    if sender.is_chat_blocked {
        return Err(AppError::Unauthorized(
            "You have been muted by an admin".to_string(),
        ));
    }
    let settings = state.db.get_config().await?;
    if settings.chat_disabled && !sender.is_admin() {
        return Err(AppError::BadRequest(
            "Chat is currently disabled".to_string(),
        ));
    }

    let body = req.body.trim();
    if body.is_empty() {
        return Err(AppError::BadRequest("Message body is empty".to_string()));
    }

    let receiver = state
        .db
        .get_user(&req.receiver_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", req.receiver_id)))?;

    if !sender.is_admin() && !receiver.is_admin() {
        return Err(AppError::Unauthorized(
            "Players can only message an admin".to_string(),
        ));
    }

    let message = state
        .db
        .insert_message(&sender.id, &sender.username, &receiver.id, body)
        .await?;
    Ok(Json(ApiResponse::success(message)))
}

/// GET /api/v1/messages/{peer_id}
pub async fn get_conversation(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(peer_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<Message>>>> {
    let caller = require_user(&headers, &state).await?;

    // A caller only ever reads conversations they are one side of, so
    // the pair is (caller, peer) by construction.
    let messages = state.db.get_conversation(&caller.id, &peer_id).await?;
    Ok(Json(ApiResponse::success(messages)))
}

/// POST /api/v1/messages/read
pub async fn mark_read(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<MarkReadRequest>,
) -> Result<Json<ApiResponse<u64>>> {
    let caller = require_user(&headers, &state).await?;
    let updated = state.db.mark_messages_read(&caller.id, &req.peer_id).await?;
    Ok(Json(ApiResponse::success(updated)))
}
