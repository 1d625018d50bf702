use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use serde::Deserialize;

use crate::{
    error::{AppError, Result},
    models::{user::User, ApiResponse},
};

use super::{require_admin, AppState};

#[derive(Debug, Deserialize)]
pub struct BlockRequest {
    pub blocked: bool,
}

/// GET /api/v1/users
pub async fn list_users(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<Vec<User>>>> {
    require_admin(&headers, &state).await?;
    let users = state.db.list_users().await?;
    Ok(Json(ApiResponse::success(users)))
}

/// POST /api/v1/users/{id}/block
///
/// Admin accounts cannot be blocked; the update skips them and we
/// report it as a bad request rather than silently succeeding.
pub async fn set_blocked(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(req): Json<BlockRequest>,
) -> Result<Json<ApiResponse<()>>> {
    require_admin(&headers, &state).await?;

    if !state.db.set_user_blocked(&id, req.blocked).await? {
        return match state.db.get_user(&id).await? {
            Some(_) => Err(AppError::BadRequest(
                "Admin accounts cannot be blocked".to_string(),
            )),
            None => Err(AppError::NotFound(format!("User {} not found", id))),
        };
    }

    tracing::info!(user = %id, blocked = req.blocked, "account block updated");
    Ok(Json(ApiResponse::success(())))
}

/// POST /api/v1/users/{id}/chat-block
pub async fn set_chat_blocked(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(req): Json<BlockRequest>,
) -> Result<Json<ApiResponse<()>>> {
    require_admin(&headers, &state).await?;

    if !state.db.set_chat_blocked(&id, req.blocked).await? {
        return Err(AppError::NotFound(format!("User {} not found", id)));
    }

    tracing::info!(user = %id, blocked = req.blocked, "chat block updated");
    Ok(Json(ApiResponse::success(())))
}
