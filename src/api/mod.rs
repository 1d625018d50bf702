pub mod auth;
pub mod config;
pub mod health;
pub mod messages;
pub mod profile;
pub mod tournaments;
pub mod users;
pub mod wallet;

use axum::http::{header::AUTHORIZATION, HeaderMap};

use crate::{
    config::Config,
    db::Database,
    error::{AppError, Result},
    models::user::User,
};

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Config,
}

/// Resolves the bearer token to the persisted user record. Role and
/// standing always come from the database row, never from the token or
/// any client-supplied field.
pub async fn require_user(headers: &HeaderMap, state: &AppState) -> Result<User> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::AuthError("Missing Authorization header".to_string()))?;
    let auth_str = auth_header
        .to_str()
        .map_err(|_| AppError::AuthError("Invalid Authorization header".to_string()))?;
    let token = auth_str
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::AuthError("Invalid Authorization scheme".to_string()))?;

    let user_id = auth::extract_user_from_token(token, &state.config.jwt_secret)?;
    state
        .db
        .get_user(&user_id)
        .await?
        .ok_or_else(|| AppError::AuthError("Unknown user".to_string()))
}

/// Same as `require_user` but rejects callers whose stored role is not
/// admin.
pub async fn require_admin(headers: &HeaderMap, state: &AppState) -> Result<User> {
    let user = require_user(headers, state).await?;
    if !user.is_admin() {
        return Err(AppError::Unauthorized("Admin access required".to_string()));
    }
    Ok(user)
}
