use axum::{extract::State, http::HeaderMap, Json};
use chrono::Utc;
use serde::Serialize;

use crate::{
    error::Result,
    models::{user::User, ApiResponse},
    services::wallet_service::{check_cooldown, CooldownStatus},
};

use super::{require_user, AppState};

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub user: User,
    pub cooldown: CooldownStatus,
}

/// GET /api/v1/profile
///
/// The client polls this for balance and cooldown countdown; the
/// countdown here is advisory, submission paths re-check it.
pub async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<ProfileResponse>>> {
    let user = require_user(&headers, &state).await?;
    let cooldown = check_cooldown(&user.role, user.last_tx_at, Utc::now());

    Ok(Json(ApiResponse::success(ProfileResponse { user, cooldown })))
}
