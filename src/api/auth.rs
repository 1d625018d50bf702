use axum::{extract::State, Json};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::{
    constants::RESERVED_ADMIN_USERNAME,
    error::{AppError, Result},
    models::{
        user::{role, AuthResponse, Claims, LoginRequest, RegisterRequest},
        ApiResponse,
    },
    utils,
};

use super::AppState;

// ==================== HANDLERS ====================

/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>> {
    let username = req.username.trim().to_lowercase();

    if username.len() < 3 {
        return Err(AppError::BadRequest(
            "Username must be at least 3 characters".to_string(),
        ));
    }
    if req.password.len() < 6 {
        return Err(AppError::BadRequest(
            "Password must be at least 6 characters".to_string(),
        ));
    }
    // The bootstrap account owns this name; self-registration can never
    // take it over.
    if username == RESERVED_ADMIN_USERNAME {
        return Err(AppError::BadRequest("Username is reserved".to_string()));
    }

    let password_hash = utils::hash_password(&req.password);
    let user = state
        .db
        .create_user(&username, &password_hash, role::PLAYER)
        .await
        .map_err(|e| match &e {
            AppError::Database(sqlx::Error::Database(db_err))
                if db_err.code().as_deref() == Some("23505") =>
            {
                AppError::BadRequest("Username already exists".to_string())
            }
            _ => e,
        })?;

    tracing::info!(user = %user.username, "new account registered");

    let token = generate_jwt_token(&user.id, &state.config)?;
    Ok(Json(ApiResponse::success(AuthResponse {
        token,
        expires_in: state.config.jwt_expiry_hours as i64 * 3600,
        user,
    })))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>> {
    let username = req.username.trim().to_lowercase();

    let user = state
        .db
        .get_user_by_username(&username)
        .await?
        .ok_or_else(|| AppError::AuthError("Invalid username or password".to_string()))?;

    if !utils::verify_password(&req.password, &user.password_hash) {
        return Err(AppError::AuthError(
            "Invalid username or password".to_string(),
        ));
    }
    if user.is_blocked {
        return Err(AppError::AccountBlocked);
    }

    let token = generate_jwt_token(&user.id, &state.config)?;
    Ok(Json(ApiResponse::success(AuthResponse {
        token,
        expires_in: state.config.jwt_expiry_hours as i64 * 3600,
        user,
    })))
}

// ==================== HELPER FUNCTIONS ====================

fn generate_jwt_token(user_id: &str, config: &crate::config::Config) -> Result<String> {
    let now = Utc::now();
    let expiration = now + Duration::hours(config.jwt_expiry_hours as i64);

    let claims = Claims {
        sub: user_id.to_string(),
        exp: expiration.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))
}

pub fn extract_user_from_token(token: &str, secret: &str) -> Result<String> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::AuthError("Invalid or expired token".to_string()))?;

    Ok(token_data.claims.sub)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;

    #[test]
    fn token_round_trips_to_the_same_subject() {
        let config = test_config("postgres://unused");
        let token = generate_jwt_token("user-1", &config).unwrap();
        let subject = extract_user_from_token(&token, &config.jwt_secret).unwrap();
        assert_eq!(subject, "user-1");
    }

    #[test]
    fn tampered_token_is_rejected() {
        let config = test_config("postgres://unused");
        let token = generate_jwt_token("user-1", &config).unwrap();
        let err = extract_user_from_token(&token, "another_secret").unwrap_err();
        assert!(matches!(err, AppError::AuthError(_)));
    }
}
