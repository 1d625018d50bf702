use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use super::ensure_admin;
use crate::{
    db::Database,
    error::{AppError, Result},
    models::{
        request::{status as request_status, JoinRequest},
        tournament::{
            ensure_capacity, status, CreateTournamentRequest, JoinTournamentRequest, Tournament,
            TournamentView,
        },
        user::User,
    },
    utils,
};

/// What a join attempt produced: either an immediate slot (wallet
/// entry) or a pending request awaiting admin verification.
#[derive(Debug, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum JoinOutcome {
    Joined,
    PendingApproval { request: JoinRequest },
}

pub struct TournamentService {
    db: Database,
}

impl TournamentService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    // ==================== LIFECYCLE ====================

    pub async fn create_tournament(
        &self,
        admin: &User,
        req: CreateTournamentRequest,
    ) -> Result<Tournament> {
        ensure_admin(admin)?;

        if req.name.trim().is_empty() {
            return Err(AppError::BadRequest("Tournament name is required".to_string()));
        }
        if req.max_slots <= 0 {
            return Err(AppError::BadRequest(
                "max_slots must be greater than zero".to_string(),
            ));
        }

        let tournament = Tournament {
            id: Uuid::new_v4().to_string(),
            name: req.name.trim().to_string(),
            game_name: req.game_name,
            mode: req.mode,
            rules: req.rules,
            banner_url: req.banner_url,
            date: req.date,
            time: req.time,
            day: req.day,
            prize_pool: utils::parse_non_negative_amount(&req.prize_pool)?,
            entry_fee: utils::parse_non_negative_amount(&req.entry_fee)?,
            max_slots: req.max_slots,
            status: status::UPCOMING.to_string(),
            game_id: None,
            game_password: None,
            winner_id: None,
            created_at: Utc::now(),
        };

        let tournament = self.db.insert_tournament(&tournament).await?;
        tracing::info!(tournament = %tournament.id, name = %tournament.name, "tournament created");
        Ok(tournament)
    }

    pub async fn delete_tournament(&self, admin: &User, id: &str) -> Result<()> {
        ensure_admin(admin)?;
        if !self.db.delete_tournament(id).await? {
            return Err(AppError::NotFound(format!("Tournament {} not found", id)));
        }
        Ok(())
    }

    /// Room credentials go out when the match starts; this is the
    /// UPCOMING -> LIVE transition.
    pub async fn assign_room(
        &self,
        admin: &User,
        id: &str,
        game_id: &str,
        game_password: &str,
    ) -> Result<Tournament> {
        ensure_admin(admin)?;

        if game_id.trim().is_empty() || game_password.trim().is_empty() {
            return Err(AppError::BadRequest(
                "Room id and password are both required".to_string(),
            ));
        }

        if !self
            .db
            .set_room_credentials(id, game_id.trim(), game_password.trim())
            .await?
        {
            return match self.db.get_tournament(id).await? {
                Some(_) => Err(AppError::BadRequest(
                    "Completed tournaments cannot go live".to_string(),
                )),
                None => Err(AppError::NotFound(format!("Tournament {} not found", id))),
            };
        }

        self.db
            .get_tournament(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Tournament {} not found", id)))
    }

    pub async fn list_views(&self) -> Result<Vec<TournamentView>> {
        let tournaments = self.db.list_tournaments().await?;
        let mut views = Vec::with_capacity(tournaments.len());
        for tournament in tournaments {
            let participants = self.db.list_participants(&tournament.id).await?;
            views.push(TournamentView {
                tournament,
                participants,
            });
        }
        Ok(views)
    }

    // ==================== ENTRY FLOW ====================

    /// Shared preconditions for both entry modes: the tournament takes
    /// entries, the caller is in good standing, and the caller holds
    /// neither a slot nor a pending request here.
    async fn ensure_can_enter(&self, caller: &User, tournament: &Tournament) -> Result<()> {
        if caller.is_blocked {
            return Err(AppError::AccountBlocked);
        }
        if tournament.status == status::COMPLETED {
            return Err(AppError::BadRequest(
                "This tournament has already finished".to_string(),
            ));
        }
        if self.db.is_participant(&tournament.id, &caller.id).await? {
            return Err(AppError::AlreadyJoined(
                "You already hold a slot in this tournament".to_string(),
            ));
        }
        if self
            .db
            .has_pending_join_request(&tournament.id, &caller.id)
            .await?
        {
            return Err(AppError::AlreadyJoined(
                "Your join request for this tournament is still pending".to_string(),
            ));
        }
        let count = self.db.count_participants(&tournament.id).await?;
        ensure_capacity(count, tournament.max_slots)?;
        Ok(())
    }

    pub async fn join(
        &self,
        caller: &User,
        tournament_id: &str,
        req: JoinTournamentRequest,
    ) -> Result<JoinOutcome> {
        let tournament = self
            .db
            .get_tournament(tournament_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Tournament {} not found", tournament_id)))?;

        let game_name = req.game_name.trim();
        let game_uid = req.game_uid.trim();
        if game_name.is_empty() || game_uid.is_empty() {
            return Err(AppError::BadRequest(
                "In-game name and uid are required".to_string(),
            ));
        }

        self.ensure_can_enter(caller, &tournament).await?;

        if req.pay_via_wallet {
            // Slot insert and fee debit commit together; an
            // insufficient-funds failure leaves no participant row.
            let mut tx = self.db.pool().begin().await?;
            Database::insert_participant_in(&mut tx, &tournament.id, &caller.id, game_name, game_uid)
                .await?;
            Database::adjust_balance_in(&mut tx, &caller.id, -tournament.entry_fee).await?;
            tx.commit().await?;

            tracing::info!(
                user = %caller.username,
                tournament = %tournament.id,
                fee = %tournament.entry_fee,
                "wallet-funded entry"
            );
            Ok(JoinOutcome::Joined)
        } else {
            let utr = req
                .utr_number
                .as_deref()
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| {
                    AppError::BadRequest(
                        "A payment reference (UTR) is required for proof-of-payment entry"
                            .to_string(),
                    )
                })?;

            let request = self
                .db
                .insert_join_request(&tournament.id, &caller.id, game_name, game_uid, utr)
                .await?;

            tracing::info!(
                user = %caller.username,
                tournament = %tournament.id,
                "proof-of-payment entry submitted"
            );
            Ok(JoinOutcome::PendingApproval { request })
        }
    }

    /// Approval claims the PENDING request and inserts the participant
    /// in one transaction; capacity or double-entry failures leave the
    /// request untouched for the admin to reject instead.
    pub async fn approve_join(&self, admin: &User, request_id: &str) -> Result<JoinRequest> {
        ensure_admin(admin)?;

        let mut tx = self.db.pool().begin().await?;
        let request =
            Database::claim_join_request_in(&mut tx, request_id, request_status::APPROVED).await?;
        Database::insert_participant_in(
            &mut tx,
            &request.tournament_id,
            &request.user_id,
            &request.game_name,
            &request.game_uid,
        )
        .await?;
        tx.commit().await?;

        tracing::info!(request = %request.id, tournament = %request.tournament_id, "join request approved");
        Ok(request)
    }

    /// Terminal, with no balance effect: no debit ever happened for a
    /// proof-based entry.
    pub async fn reject_join(&self, admin: &User, request_id: &str) -> Result<JoinRequest> {
        ensure_admin(admin)?;

        let mut tx = self.db.pool().begin().await?;
        let request =
            Database::claim_join_request_in(&mut tx, request_id, request_status::REJECTED).await?;
        tx.commit().await?;

        tracing::info!(request = %request.id, "join request rejected");
        Ok(request)
    }

    // ==================== PRIZE PAYOUT ====================

    /// One-shot settlement of a LIVE tournament: it flips COMPLETED and
    /// the winner is credited the prize pool in the same transaction. A
    /// second attempt finds the tournament already completed.
    pub async fn set_winner(
        &self,
        admin: &User,
        tournament_id: &str,
        winner_id: &str,
    ) -> Result<Tournament> {
        ensure_admin(admin)?;

        if !self.db.is_participant(tournament_id, winner_id).await? {
            return Err(AppError::BadRequest(
                "The selected winner is not a participant of this tournament".to_string(),
            ));
        }

        let mut tx = self.db.pool().begin().await?;
        let prize = Database::complete_tournament_in(&mut tx, tournament_id, winner_id).await?;
        Database::adjust_balance_in(&mut tx, winner_id, prize).await?;
        tx.commit().await?;

        tracing::info!(tournament = %tournament_id, winner = %winner_id, prize = %prize, "prize paid out");

        self.db
            .get_tournament(tournament_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Tournament {} not found", tournament_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wallet_entry_serializes_as_joined() {
        let json = serde_json::to_value(JoinOutcome::Joined).unwrap();
        assert_eq!(json["result"], "joined");
    }

    #[test]
    fn proof_entry_carries_the_pending_request() {
        let request = JoinRequest {
            id: "r-1".to_string(),
            tournament_id: "t-1".to_string(),
            user_id: "u-1".to_string(),
            game_name: "sniper".to_string(),
            game_uid: "12345".to_string(),
            utr_number: "UTR0001".to_string(),
            status: request_status::PENDING.to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(JoinOutcome::PendingApproval { request }).unwrap();
        assert_eq!(json["result"], "pending_approval");
        assert_eq!(json["request"]["status"], "PENDING");
    }
}
