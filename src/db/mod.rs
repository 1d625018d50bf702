use rust_decimal::Decimal;
use sqlx::{postgres::PgPoolOptions, PgConnection, PgPool, Row};
use uuid::Uuid;

use crate::{
    config::Config,
    constants::CONFIG_ROW_ID,
    error::{AppError, Result},
    models::{
        config::GlobalConfig,
        message::Message,
        request::{self, status, JoinRequest, WalletAddRequest, WithdrawalRequest},
        tournament::{self, Participant, Tournament},
        user::{role, User},
    },
    utils,
};

/// Startup may refresh an existing admin account but must never
/// promote one a player registered first.
pub(crate) fn ensure_bootstrap_account(existing: Option<&User>) -> Result<()> {
    match existing {
        Some(user) if !user.is_admin() => Err(AppError::Internal(format!(
            "Username '{}' is held by a non-admin account; choose a different ADMIN_USERNAME",
            user.username
        ))),
        _ => Ok(()),
    }
}

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .connect(&config.database_url)
            .await?;

        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

// ==================== USER QUERIES ====================
impl Database {
    pub async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        user_role: &str,
    ) -> Result<User> {
        let id = Uuid::new_v4().to_string();
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(username)
        .bind(password_hash)
        .bind(user_role)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY username ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    /// Blocking never applies to admin accounts.
    pub async fn set_user_blocked(&self, user_id: &str, blocked: bool) -> Result<bool> {
        let result = sqlx::query("UPDATE users SET is_blocked = $2 WHERE id = $1 AND role <> $3")
            .bind(user_id)
            .bind(blocked)
            .bind(role::ADMIN)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn set_chat_blocked(&self, user_id: &str, blocked: bool) -> Result<bool> {
        let result = sqlx::query("UPDATE users SET is_chat_blocked = $2 WHERE id = $1")
            .bind(user_id)
            .bind(blocked)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Seed or refresh the admin account from config at startup. The
    /// upsert refreshes the password of an existing admin but never
    /// changes a role: pointing ADMIN_USERNAME at a name a player
    /// already registered is a deployment mistake and fails the boot.
    pub async fn ensure_admin_user(&self, username: &str, password_hash: &str) -> Result<User> {
        ensure_bootstrap_account(self.get_user_by_username(username).await?.as_ref())?;

        let id = Uuid::new_v4().to_string();
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, password_hash, role)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (username) DO UPDATE
            SET password_hash = EXCLUDED.password_hash
            WHERE users.role = $4
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(username)
        .bind(password_hash)
        .bind(role::ADMIN)
        .fetch_optional(&self.pool)
        .await?;

        user.ok_or_else(|| {
            AppError::Internal(format!(
                "Username '{}' is held by a non-admin account; choose a different ADMIN_USERNAME",
                username
            ))
        })
    }
}

// ==================== WALLET QUERIES ====================
impl Database {
    /// The only sanctioned path to a balance write. One conditional
    /// UPDATE so that concurrent debits cannot both pass the zero
    /// floor: the non-negative guard and the write are a single
    /// statement at the storage layer. Every success, credits included,
    /// stamps `last_tx_at`, which arms the cooldown window.
    pub(crate) async fn adjust_balance_in(
        conn: &mut PgConnection,
        user_id: &str,
        delta: Decimal,
    ) -> Result<Decimal> {
        let delta = utils::round2(delta);

        let row = sqlx::query(
            r#"
            UPDATE users
            SET wallet_balance = ROUND(wallet_balance + $2, 2),
                last_tx_at = NOW()
            WHERE id = $1 AND wallet_balance + $2 >= 0
            RETURNING wallet_balance
            "#,
        )
        .bind(user_id)
        .bind(delta)
        .fetch_optional(&mut *conn)
        .await?;

        match row {
            Some(row) => Ok(row.try_get("wallet_balance")?),
            None => {
                let exists: bool =
                    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
                        .bind(user_id)
                        .fetch_one(&mut *conn)
                        .await?;
                if exists {
                    Err(AppError::InsufficientFunds)
                } else {
                    Err(AppError::NotFound(format!("User {} not found", user_id)))
                }
            }
        }
    }

    pub async fn adjust_balance(&self, user_id: &str, delta: Decimal) -> Result<Decimal> {
        let mut tx = self.pool.begin().await?;
        let balance = Self::adjust_balance_in(&mut tx, user_id, delta).await?;
        tx.commit().await?;
        Ok(balance)
    }
}

// ==================== TOURNAMENT QUERIES ====================
impl Database {
    pub async fn insert_tournament(&self, t: &Tournament) -> Result<Tournament> {
        let inserted = sqlx::query_as::<_, Tournament>(
            r#"
            INSERT INTO tournaments
                (id, name, game_name, mode, rules, banner_url, date, time, day,
                 prize_pool, entry_fee, max_slots, status)
            VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13)
            RETURNING *
            "#,
        )
        .bind(&t.id)
        .bind(&t.name)
        .bind(&t.game_name)
        .bind(&t.mode)
        .bind(&t.rules)
        .bind(&t.banner_url)
        .bind(&t.date)
        .bind(&t.time)
        .bind(&t.day)
        .bind(t.prize_pool)
        .bind(t.entry_fee)
        .bind(t.max_slots)
        .bind(&t.status)
        .fetch_one(&self.pool)
        .await?;
        Ok(inserted)
    }

    pub async fn get_tournament(&self, id: &str) -> Result<Option<Tournament>> {
        let t = sqlx::query_as::<_, Tournament>("SELECT * FROM tournaments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(t)
    }

    pub async fn list_tournaments(&self) -> Result<Vec<Tournament>> {
        let ts = sqlx::query_as::<_, Tournament>(
            "SELECT * FROM tournaments ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(ts)
    }

    pub async fn delete_tournament(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM tournaments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Assigning room credentials flips the tournament LIVE. Completed
    /// tournaments are immutable.
    pub async fn set_room_credentials(
        &self,
        id: &str,
        game_id: &str,
        game_password: &str,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE tournaments
            SET game_id = $2, game_password = $3, status = $4
            WHERE id = $1 AND status <> $5
            "#,
        )
        .bind(id)
        .bind(game_id)
        .bind(game_password)
        .bind(tournament::status::LIVE)
        .bind(tournament::status::COMPLETED)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// One-shot settlement, LIVE only: an UPCOMING match has not been
    /// played and a COMPLETED one has already paid its winner. Returns
    /// the prize pool.
    pub(crate) async fn complete_tournament_in(
        conn: &mut PgConnection,
        id: &str,
        winner_id: &str,
    ) -> Result<Decimal> {
        let row = sqlx::query(
            r#"
            UPDATE tournaments
            SET status = $3, winner_id = $2
            WHERE id = $1 AND status = $4
            RETURNING prize_pool
            "#,
        )
        .bind(id)
        .bind(winner_id)
        .bind(tournament::status::COMPLETED)
        .bind(tournament::status::LIVE)
        .fetch_optional(&mut *conn)
        .await?;

        match row {
            Some(row) => Ok(row.try_get("prize_pool")?),
            None => {
                let current: Option<String> =
                    sqlx::query_scalar("SELECT status FROM tournaments WHERE id = $1")
                        .bind(id)
                        .fetch_optional(&mut *conn)
                        .await?;
                match current {
                    Some(current) => match tournament::ensure_settleable(&current) {
                        Err(e) => Err(e),
                        Ok(()) => Err(AppError::Internal(format!(
                            "Settlement of tournament {} failed unexpectedly",
                            id
                        ))),
                    },
                    None => Err(AppError::NotFound(format!("Tournament {} not found", id))),
                }
            }
        }
    }
}

// ==================== PARTICIPANT QUERIES ====================
impl Database {
    pub async fn list_participants(&self, tournament_id: &str) -> Result<Vec<Participant>> {
        let rows = sqlx::query_as::<_, Participant>(
            "SELECT * FROM participants WHERE tournament_id = $1 ORDER BY slot_no ASC",
        )
        .bind(tournament_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn count_participants(&self, tournament_id: &str) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM participants WHERE tournament_id = $1")
                .bind(tournament_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    pub async fn is_participant(&self, tournament_id: &str, user_id: &str) -> Result<bool> {
        let found: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM participants WHERE tournament_id = $1 AND user_id = $2)",
        )
        .bind(tournament_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(found)
    }

    /// Entries serialize on the tournament row lock, so the capacity
    /// check reads a settled count and slot numbers stay unique. Two
    /// snapshot-isolated inserts could otherwise both pass a count
    /// predicate at `max_slots - 1`. The primary key still rejects a
    /// double entry, and the (tournament_id, slot_no) constraint backs
    /// the lock up.
    pub(crate) async fn insert_participant_in(
        conn: &mut PgConnection,
        tournament_id: &str,
        user_id: &str,
        game_name: &str,
        game_uid: &str,
    ) -> Result<()> {
        let max_slots: Option<i32> =
            sqlx::query_scalar("SELECT max_slots FROM tournaments WHERE id = $1 FOR UPDATE")
                .bind(tournament_id)
                .fetch_optional(&mut *conn)
                .await?;
        let max_slots = max_slots
            .ok_or_else(|| AppError::NotFound(format!("Tournament {} not found", tournament_id)))?;

        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM participants WHERE tournament_id = $1")
                .bind(tournament_id)
                .fetch_one(&mut *conn)
                .await?;
        tournament::ensure_capacity(count, max_slots)?;

        sqlx::query(
            r#"
            INSERT INTO participants (tournament_id, user_id, game_name, game_uid, slot_no)
            SELECT $1, $2, $3, $4, COALESCE(MAX(slot_no), 0) + 1
            FROM participants
            WHERE tournament_id = $1
            "#,
        )
        .bind(tournament_id)
        .bind(user_id)
        .bind(game_name)
        .bind(game_uid)
        .execute(&mut *conn)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err)
                if db_err.code().as_deref() == Some("23505")
                    && db_err.constraint() == Some("participants_pkey") =>
            {
                AppError::AlreadyJoined("You already hold a slot in this tournament".to_string())
            }
            _ => AppError::Database(e),
        })?;
        Ok(())
    }
}

// ==================== JOIN REQUEST QUERIES ====================
impl Database {
    pub async fn insert_join_request(
        &self,
        tournament_id: &str,
        user_id: &str,
        game_name: &str,
        game_uid: &str,
        utr_number: &str,
    ) -> Result<JoinRequest> {
        let id = Uuid::new_v4().to_string();
        let req = sqlx::query_as::<_, JoinRequest>(
            r#"
            INSERT INTO join_requests (id, tournament_id, user_id, game_name, game_uid, utr_number, status)
            VALUES ($1,$2,$3,$4,$5,$6,$7)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(tournament_id)
        .bind(user_id)
        .bind(game_name)
        .bind(game_uid)
        .bind(utr_number)
        .bind(status::PENDING)
        .fetch_one(&self.pool)
        .await?;
        Ok(req)
    }

    /// `scope` limits to one user's requests; admins pass None.
    pub async fn list_join_requests(&self, scope: Option<&str>) -> Result<Vec<JoinRequest>> {
        let rows = match scope {
            Some(user_id) => {
                sqlx::query_as::<_, JoinRequest>(
                    "SELECT * FROM join_requests WHERE user_id = $1 ORDER BY created_at DESC",
                )
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, JoinRequest>(
                    "SELECT * FROM join_requests ORDER BY created_at DESC",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(rows)
    }

    pub async fn has_pending_join_request(
        &self,
        tournament_id: &str,
        user_id: &str,
    ) -> Result<bool> {
        let found: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM join_requests
                WHERE tournament_id = $1 AND user_id = $2 AND status = $3
            )
            "#,
        )
        .bind(tournament_id)
        .bind(user_id)
        .bind(status::PENDING)
        .fetch_one(&self.pool)
        .await?;
        Ok(found)
    }

    /// Claims a PENDING request into a terminal state. Zero rows means
    /// the request is missing or was already settled; either way there
    /// is nothing left to transition.
    pub(crate) async fn claim_join_request_in(
        conn: &mut PgConnection,
        id: &str,
        new_status: &str,
    ) -> Result<JoinRequest> {
        let req = sqlx::query_as::<_, JoinRequest>(
            "UPDATE join_requests SET status = $2 WHERE id = $1 AND status = $3 RETURNING *",
        )
        .bind(id)
        .bind(new_status)
        .bind(status::PENDING)
        .fetch_optional(&mut *conn)
        .await?;

        match req {
            Some(req) => Ok(req),
            None => Err(Self::claim_failure(&mut *conn, "join_requests", id, new_status).await?),
        }
    }

    /// Shared diagnosis for a failed claim: distinguishes a missing row
    /// from one already in a terminal state.
    async fn claim_failure(
        conn: &mut PgConnection,
        table: &str,
        id: &str,
        requested: &str,
    ) -> Result<AppError> {
        // Table names come from a fixed internal set, never user input.
        let query = format!("SELECT status FROM {} WHERE id = $1", table);
        let current: Option<String> = sqlx::query_scalar(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(match current {
            Some(current) => match request::ensure_transition(&current, requested) {
                Err(e) => e,
                Ok(()) => AppError::Internal(format!("Claim of request {} failed unexpectedly", id)),
            },
            None => AppError::NotFound(format!("Request {} not found", id)),
        })
    }
}

// ==================== WITHDRAWAL QUERIES ====================
impl Database {
    pub(crate) async fn insert_withdrawal_in(
        conn: &mut PgConnection,
        user_id: &str,
        username: &str,
        amount: Decimal,
        upi_id: &str,
    ) -> Result<WithdrawalRequest> {
        let id = Uuid::new_v4().to_string();
        let req = sqlx::query_as::<_, WithdrawalRequest>(
            r#"
            INSERT INTO withdrawals (id, user_id, username, amount, upi_id, status)
            VALUES ($1,$2,$3,$4,$5,$6)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(user_id)
        .bind(username)
        .bind(amount)
        .bind(upi_id)
        .bind(status::PENDING)
        .fetch_one(&mut *conn)
        .await?;
        Ok(req)
    }

    pub async fn list_withdrawals(&self, scope: Option<&str>) -> Result<Vec<WithdrawalRequest>> {
        let rows = match scope {
            Some(user_id) => {
                sqlx::query_as::<_, WithdrawalRequest>(
                    "SELECT * FROM withdrawals WHERE user_id = $1 ORDER BY created_at DESC",
                )
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, WithdrawalRequest>(
                    "SELECT * FROM withdrawals ORDER BY created_at DESC",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(rows)
    }

    pub(crate) async fn claim_withdrawal_in(
        conn: &mut PgConnection,
        id: &str,
        new_status: &str,
    ) -> Result<WithdrawalRequest> {
        let req = sqlx::query_as::<_, WithdrawalRequest>(
            "UPDATE withdrawals SET status = $2 WHERE id = $1 AND status = $3 RETURNING *",
        )
        .bind(id)
        .bind(new_status)
        .bind(status::PENDING)
        .fetch_optional(&mut *conn)
        .await?;

        match req {
            Some(req) => Ok(req),
            None => Err(Self::claim_failure(&mut *conn, "withdrawals", id, new_status).await?),
        }
    }
}

// ==================== WALLET ADD QUERIES ====================
impl Database {
    pub async fn insert_wallet_add(
        &self,
        user_id: &str,
        amount: Decimal,
        utr: &str,
    ) -> Result<WalletAddRequest> {
        let id = Uuid::new_v4().to_string();
        let req = sqlx::query_as::<_, WalletAddRequest>(
            r#"
            INSERT INTO wallet_adds (id, user_id, amount, utr, status)
            VALUES ($1,$2,$3,$4,$5)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(user_id)
        .bind(amount)
        .bind(utr)
        .bind(status::PENDING)
        .fetch_one(&self.pool)
        .await?;
        Ok(req)
    }

    pub async fn list_wallet_adds(&self, scope: Option<&str>) -> Result<Vec<WalletAddRequest>> {
        let rows = match scope {
            Some(user_id) => {
                sqlx::query_as::<_, WalletAddRequest>(
                    "SELECT * FROM wallet_adds WHERE user_id = $1 ORDER BY created_at DESC",
                )
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, WalletAddRequest>(
                    "SELECT * FROM wallet_adds ORDER BY created_at DESC",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(rows)
    }

    pub(crate) async fn claim_wallet_add_in(
        conn: &mut PgConnection,
        id: &str,
        new_status: &str,
    ) -> Result<WalletAddRequest> {
        let req = sqlx::query_as::<_, WalletAddRequest>(
            "UPDATE wallet_adds SET status = $2 WHERE id = $1 AND status = $3 RETURNING *",
        )
        .bind(id)
        .bind(new_status)
        .bind(status::PENDING)
        .fetch_optional(&mut *conn)
        .await?;

        match req {
            Some(req) => Ok(req),
            None => Err(Self::claim_failure(&mut *conn, "wallet_adds", id, new_status).await?),
        }
    }
}

// ==================== MESSAGE QUERIES ====================
impl Database {
    pub async fn insert_message(
        &self,
        sender_id: &str,
        sender_name: &str,
        receiver_id: &str,
        body: &str,
    ) -> Result<Message> {
        let id = Uuid::new_v4().to_string();
        let msg = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (id, sender_id, sender_name, receiver_id, body)
            VALUES ($1,$2,$3,$4,$5)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(sender_id)
        .bind(sender_name)
        .bind(receiver_id)
        .bind(body)
        .fetch_one(&self.pool)
        .await?;
        Ok(msg)
    }

    pub async fn get_conversation(&self, uid1: &str, uid2: &str) -> Result<Vec<Message>> {
        let rows = sqlx::query_as::<_, Message>(
            r#"
            SELECT * FROM messages
            WHERE (sender_id = $1 AND receiver_id = $2)
               OR (sender_id = $2 AND receiver_id = $1)
            ORDER BY created_at ASC
            "#,
        )
        .bind(uid1)
        .bind(uid2)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn mark_messages_read(&self, receiver_id: &str, peer_id: &str) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE messages SET read = true WHERE receiver_id = $1 AND sender_id = $2 AND read = false",
        )
        .bind(receiver_id)
        .bind(peer_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}

// ==================== CONFIG QUERIES ====================
impl Database {
    pub async fn get_config(&self) -> Result<GlobalConfig> {
        let config = sqlx::query_as::<_, GlobalConfig>(
            "SELECT upi_id, qr_url, chat_disabled, auto_payment_enabled FROM config WHERE id = $1",
        )
        .bind(CONFIG_ROW_ID)
        .fetch_optional(&self.pool)
        .await?;
        Ok(config.unwrap_or_default())
    }

    pub async fn save_config(&self, config: &GlobalConfig) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO config (id, upi_id, qr_url, chat_disabled, auto_payment_enabled)
            VALUES ($1,$2,$3,$4,$5)
            ON CONFLICT (id) DO UPDATE
            SET upi_id = EXCLUDED.upi_id,
                qr_url = EXCLUDED.qr_url,
                chat_disabled = EXCLUDED.chat_disabled,
                auto_payment_enabled = EXCLUDED.auto_payment_enabled
            "#,
        )
        .bind(CONFIG_ROW_ID)
        .bind(&config.upi_id)
        .bind(&config.qr_url)
        .bind(config.chat_disabled)
        .bind(config.auto_payment_enabled)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use crate::services::test_support::{admin, player};

    #[tokio::test]
    async fn database_new_returns_error_on_invalid_url() {
        let config = test_config("not-a-url");
        let result = Database::new(&config).await;
        assert!(result.is_err());
    }

    #[test]
    fn bootstrap_refuses_a_player_owned_username() {
        let existing = player(Decimal::ZERO, None);
        let result = ensure_bootstrap_account(Some(&existing));
        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[test]
    fn bootstrap_accepts_fresh_or_admin_usernames() {
        assert!(ensure_bootstrap_account(None).is_ok());
        let existing = admin();
        assert!(ensure_bootstrap_account(Some(&existing)).is_ok());
    }
}
