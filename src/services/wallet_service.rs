use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::ensure_admin;
use crate::{
    constants::TX_COOLDOWN_HOURS,
    db::Database,
    error::{AppError, Result},
    models::{
        request::{status, WalletAddRequest, WithdrawalRequest},
        user::{role, User},
    },
    utils,
};

#[derive(Debug, Clone, Serialize)]
pub struct CooldownStatus {
    pub can_proceed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seconds_left: Option<i64>,
}

/// Cooldown arithmetic, evaluated against the persisted `last_tx_at`
/// on every attempt. Admins are exempt; everyone else waits out the
/// full window after any balance mutation, credits included.
pub fn check_cooldown(
    user_role: &str,
    last_tx_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> CooldownStatus {
    if user_role == role::ADMIN {
        return CooldownStatus {
            can_proceed: true,
            seconds_left: None,
        };
    }

    let Some(last) = last_tx_at else {
        return CooldownStatus {
            can_proceed: true,
            seconds_left: None,
        };
    };

    let window = Duration::hours(TX_COOLDOWN_HOURS);
    let elapsed = now - last;
    if elapsed < window {
        CooldownStatus {
            can_proceed: false,
            seconds_left: Some((window - elapsed).num_seconds()),
        }
    } else {
        CooldownStatus {
            can_proceed: true,
            seconds_left: None,
        }
    }
}

pub struct WalletService {
    db: Database,
}

impl WalletService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Gate shared by deposit and withdrawal submission. The client
    /// shows its own countdown, but this check is the authoritative one.
    fn ensure_can_transact(user: &User) -> Result<()> {
        if user.is_blocked {
            return Err(AppError::AccountBlocked);
        }
        let cooldown = check_cooldown(&user.role, user.last_tx_at, Utc::now());
        if !cooldown.can_proceed {
            return Err(AppError::CooldownActive {
                seconds_left: cooldown.seconds_left.unwrap_or(0),
            });
        }
        Ok(())
    }

    // ==================== DEPOSITS ====================

    /// Records a deposit claim. No balance effect until approval.
    pub async fn request_deposit(
        &self,
        caller: &User,
        amount_raw: &str,
        utr: &str,
    ) -> Result<WalletAddRequest> {
        Self::ensure_can_transact(caller)?;

        let amount = utils::parse_amount(amount_raw)?;
        let utr = utr.trim();
        if utr.is_empty() {
            return Err(AppError::BadRequest(
                "A payment reference (UTR) is required".to_string(),
            ));
        }

        let request = self.db.insert_wallet_add(&caller.id, amount, utr).await?;
        tracing::info!(user = %caller.username, amount = %amount, "deposit request submitted");
        Ok(request)
    }

    /// Approve: claim the PENDING row and credit the amount in one
    /// transaction, so a failed credit leaves the request PENDING and a
    /// settled request can never credit twice. Reject: terminal, no
    /// balance effect.
    pub async fn resolve_deposit(
        &self,
        admin: &User,
        request_id: &str,
        approve: bool,
    ) -> Result<WalletAddRequest> {
        ensure_admin(admin)?;

        let mut tx = self.db.pool().begin().await?;
        let request = if approve {
            let request =
                Database::claim_wallet_add_in(&mut tx, request_id, status::APPROVED).await?;
            Database::adjust_balance_in(&mut tx, &request.user_id, request.amount).await?;
            request
        } else {
            Database::claim_wallet_add_in(&mut tx, request_id, status::REJECTED).await?
        };
        tx.commit().await?;

        tracing::info!(
            request = %request.id,
            status = %request.status,
            amount = %request.amount,
            "deposit request settled"
        );
        Ok(request)
    }

    // ==================== WITHDRAWALS ====================

    /// Creates a withdrawal with a pessimistic hold: the debit happens
    /// now, atomically with the insert. If the conditional debit fails
    /// the whole request fails and nothing is recorded.
    pub async fn request_withdrawal(
        &self,
        caller: &User,
        amount_raw: &str,
        upi_id: &str,
    ) -> Result<WithdrawalRequest> {
        Self::ensure_can_transact(caller)?;

        let amount = utils::parse_amount(amount_raw)?;
        let upi_id = upi_id.trim();
        if upi_id.is_empty() {
            return Err(AppError::BadRequest(
                "A destination UPI id is required".to_string(),
            ));
        }

        let mut tx = self.db.pool().begin().await?;
        Database::adjust_balance_in(&mut tx, &caller.id, -amount).await?;
        let request =
            Database::insert_withdrawal_in(&mut tx, &caller.id, &caller.username, amount, upi_id)
                .await?;
        tx.commit().await?;

        tracing::info!(user = %caller.username, amount = %amount, "withdrawal hold placed");
        Ok(request)
    }

    /// PAID leaves the balance alone; the money already left the wallet
    /// at creation. Rejection refunds the held amount before the row
    /// turns terminal; a failed refund rolls the whole settlement back.
    pub async fn resolve_withdrawal(
        &self,
        admin: &User,
        request_id: &str,
        pay: bool,
    ) -> Result<WithdrawalRequest> {
        ensure_admin(admin)?;

        let mut tx = self.db.pool().begin().await?;
        let request = if pay {
            Database::claim_withdrawal_in(&mut tx, request_id, status::PAID).await?
        } else {
            let request =
                Database::claim_withdrawal_in(&mut tx, request_id, status::REJECTED).await?;
            Database::adjust_balance_in(&mut tx, &request.user_id, request.amount).await?;
            request
        };
        tx.commit().await?;

        tracing::info!(
            request = %request.id,
            status = %request.status,
            amount = %request.amount,
            "withdrawal request settled"
        );
        Ok(request)
    }

    // ==================== MANUAL CORRECTIONS ====================

    /// Direct signed adjustment, admin only. Still flows through the
    /// single conditional update, so the zero floor holds.
    pub async fn admin_adjust_balance(
        &self,
        admin: &User,
        user_id: &str,
        delta_raw: &str,
    ) -> Result<Decimal> {
        ensure_admin(admin)?;
        let delta = utils::parse_signed_amount(delta_raw)?;
        let balance = self.db.adjust_balance(user_id, delta).await?;
        tracing::info!(user = %user_id, delta = %delta, balance = %balance, "manual balance adjustment");
        Ok(balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{admin, player};
    use rust_decimal::Decimal;

    #[test]
    fn cooldown_exempts_admins() {
        let now = Utc::now();
        let status = check_cooldown(role::ADMIN, Some(now), now);
        assert!(status.can_proceed);
        assert!(status.seconds_left.is_none());
    }

    #[test]
    fn cooldown_allows_first_transaction() {
        let status = check_cooldown(role::PLAYER, None, Utc::now());
        assert!(status.can_proceed);
    }

    #[test]
    fn cooldown_denies_inside_window_with_remaining_time() {
        let now = Utc::now();
        let last = now - Duration::hours(2);
        let status = check_cooldown(role::PLAYER, Some(last), now);
        assert!(!status.can_proceed);
        let left = status.seconds_left.unwrap();
        // 3 hours remain of the 5 hour window.
        assert_eq!(left, Duration::hours(3).num_seconds());
    }

    #[test]
    fn cooldown_allows_once_window_elapsed() {
        let now = Utc::now();
        let last = now - Duration::hours(TX_COOLDOWN_HOURS);
        let status = check_cooldown(role::PLAYER, Some(last), now);
        assert!(status.can_proceed);
    }

    #[test]
    fn blocked_user_cannot_transact() {
        let mut user = player(Decimal::new(10000, 2), None);
        user.is_blocked = true;
        assert!(matches!(
            WalletService::ensure_can_transact(&user),
            Err(AppError::AccountBlocked)
        ));
    }

    #[test]
    fn recent_mutation_arms_the_gate() {
        let user = player(Decimal::ZERO, Some(Utc::now()));
        assert!(matches!(
            WalletService::ensure_can_transact(&user),
            Err(AppError::CooldownActive { .. })
        ));
    }

    #[test]
    fn admin_bypasses_the_gate() {
        let mut caller = admin();
        caller.last_tx_at = Some(Utc::now());
        assert!(WalletService::ensure_can_transact(&caller).is_ok());
    }
}
