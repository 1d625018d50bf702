use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::{AppError, Result};

/// Request lifecycle states. PENDING is the only state a transition can
/// leave; APPROVED, REJECTED and PAID are terminal.
pub mod status {
    pub const PENDING: &str = "PENDING";
    pub const APPROVED: &str = "APPROVED";
    pub const REJECTED: &str = "REJECTED";
    pub const PAID: &str = "PAID";
}

/// Legality of a request status transition. The conditional claim
/// UPDATEs enforce the same rule at the storage layer; this is the
/// rule in one place, and the source of the error the claim paths
/// report.
pub(crate) fn ensure_transition(current: &str, requested: &str) -> Result<()> {
    if requested == status::PENDING {
        return Err(AppError::BadRequest(
            "Requests cannot be re-opened".to_string(),
        ));
    }
    if current != status::PENDING {
        return Err(AppError::BadRequest(format!(
            "Request is already {}; only pending requests can move to {}",
            current, requested
        )));
    }
    Ok(())
}

/// A slot claim backed by external payment proof, awaiting admin review.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JoinRequest {
    pub id: String,
    pub tournament_id: String,
    pub user_id: String,
    pub game_name: String,
    pub game_uid: String,
    pub utr_number: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Withdrawal hold: the amount leaves the wallet when the row is
/// created, not when the admin settles it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WithdrawalRequest {
    pub id: String,
    pub user_id: String,
    pub username: String,
    pub amount: Decimal,
    pub upi_id: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Deposit claim; credits only on admin approval.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WalletAddRequest {
    pub id: String,
    pub user_id: String,
    pub amount: Decimal,
    pub utr: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

// ==================== DTOS ====================

#[derive(Debug, Deserialize)]
pub struct NewDepositRequest {
    /// Decimal string, strictly parsed.
    pub amount: String,
    /// Bank transaction reference submitted as proof.
    pub utr: String,
}

#[derive(Debug, Deserialize)]
pub struct NewWithdrawalRequest {
    pub amount: String,
    /// Destination UPI handle for the external transfer.
    pub upi_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_moves_to_each_terminal_state() {
        assert!(ensure_transition(status::PENDING, status::APPROVED).is_ok());
        assert!(ensure_transition(status::PENDING, status::REJECTED).is_ok());
        assert!(ensure_transition(status::PENDING, status::PAID).is_ok());
    }

    #[test]
    fn settled_requests_never_transition_again() {
        // A second approval of the same request is the double-credit
        // path; it must be an invalid transition.
        assert!(matches!(
            ensure_transition(status::APPROVED, status::APPROVED),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            ensure_transition(status::REJECTED, status::PAID),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            ensure_transition(status::PAID, status::REJECTED),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn requests_cannot_be_reopened() {
        assert!(matches!(
            ensure_transition(status::APPROVED, status::PENDING),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            ensure_transition(status::PENDING, status::PENDING),
            Err(AppError::BadRequest(_))
        ));
    }
}
