pub mod tournament_service;
pub mod wallet_service;

pub use tournament_service::{JoinOutcome, TournamentService};
pub use wallet_service::WalletService;

use crate::error::{AppError, Result};
use crate::models::user::User;

/// Privileged transitions are authorized against the persisted role of
/// the caller, never against a client-echoed value.
pub(crate) fn ensure_admin(user: &User) -> Result<()> {
    if user.is_admin() {
        Ok(())
    } else {
        Err(AppError::Unauthorized(format!(
            "'{}' does not hold the admin role",
            user.username
        )))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{DateTime, Utc};
    use rust_decimal::Decimal;

    use crate::models::user::{role, User};

    pub fn player(balance: Decimal, last_tx_at: Option<DateTime<Utc>>) -> User {
        User {
            id: "u-1".to_string(),
            username: "player_one".to_string(),
            password_hash: String::new(),
            role: role::PLAYER.to_string(),
            wallet_balance: balance,
            is_blocked: false,
            is_chat_blocked: false,
            last_tx_at,
            joined_at: Utc::now(),
        }
    }

    pub fn admin() -> User {
        User {
            id: "admin-1".to_string(),
            username: "admin".to_string(),
            password_hash: String::new(),
            role: role::ADMIN.to_string(),
            wallet_balance: Decimal::ZERO,
            is_blocked: false,
            is_chat_blocked: false,
            last_tx_at: None,
            joined_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn ensure_admin_accepts_persisted_admin_role() {
        assert!(ensure_admin(&test_support::admin()).is_ok());
    }

    #[test]
    fn ensure_admin_rejects_players() {
        let result = ensure_admin(&test_support::player(Decimal::ZERO, None));
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }
}
