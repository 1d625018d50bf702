use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// Roles are stored as plain text, checked server-side on every
// privileged operation. The client's copy of the role is never trusted.
pub mod role {
    pub const ADMIN: &str = "ADMIN";
    pub const PLAYER: &str = "PLAYER";
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub wallet_balance: Decimal,
    pub is_blocked: bool,
    pub is_chat_blocked: bool,
    pub last_tx_at: Option<DateTime<Utc>>,
    pub joined_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == role::ADMIN
    }
}

// ==================== AUTH DTOS ====================

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub expires_in: i64,
    pub user: User,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user id
    pub exp: usize,
    pub iat: usize,
}

// ==================== ADMIN DTOS ====================

#[derive(Debug, Deserialize)]
pub struct AdjustBalanceRequest {
    /// Signed amount as a decimal string, e.g. "-40.00".
    pub delta: String,
}

#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub user_id: String,
    pub wallet_balance: Decimal,
}
