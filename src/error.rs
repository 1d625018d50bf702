use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Authentication failed: {0}")]
    AuthError(String),

    #[error("Admin privileges required: {0}")]
    Unauthorized(String),

    #[error("Account is blocked")]
    AccountBlocked,

    #[error("Insufficient balance")]
    InsufficientFunds,

    #[error("Transaction cooldown active")]
    CooldownActive { seconds_left: i64 },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Tournament is full")]
    SlotFull,

    #[error("Already joined: {0}")]
    AlreadyJoined(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::Database(ref e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                e.to_string(),
                None,
            ),
            AppError::AuthError(ref msg) => {
                (StatusCode::UNAUTHORIZED, "AUTH_ERROR", msg.clone(), None)
            }
            AppError::Unauthorized(ref msg) => {
                (StatusCode::FORBIDDEN, "UNAUTHORIZED", msg.clone(), None)
            }
            AppError::AccountBlocked => (
                StatusCode::FORBIDDEN,
                "ACCOUNT_BLOCKED",
                "This account has been suspended by the admin".to_string(),
                None,
            ),
            AppError::InsufficientFunds => (
                StatusCode::BAD_REQUEST,
                "INSUFFICIENT_FUNDS",
                "Wallet balance is too low for this operation".to_string(),
                None,
            ),
            AppError::CooldownActive { seconds_left } => (
                StatusCode::TOO_MANY_REQUESTS,
                "COOLDOWN_ACTIVE",
                format!(
                    "Wallet transaction cooldown active, {} seconds remaining",
                    seconds_left
                ),
                Some(serde_json::json!({ "seconds_left": seconds_left })),
            ),
            AppError::InvalidAmount(ref msg) => {
                (StatusCode::BAD_REQUEST, "INVALID_AMOUNT", msg.clone(), None)
            }
            AppError::SlotFull => (
                StatusCode::CONFLICT,
                "SLOT_FULL",
                "All tournament slots are taken".to_string(),
                None,
            ),
            AppError::AlreadyJoined(ref msg) => {
                (StatusCode::CONFLICT, "ALREADY_JOINED", msg.clone(), None)
            }
            AppError::NotFound(ref msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone(), None),
            AppError::BadRequest(ref msg) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone(), None)
            }
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                self.to_string(),
                None,
            ),
        };

        let body = Json(ErrorResponse {
            success: false,
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details,
            },
        });

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
