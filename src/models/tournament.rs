use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::{AppError, Result};

pub mod status {
    pub const UPCOMING: &str = "UPCOMING";
    pub const LIVE: &str = "LIVE";
    pub const COMPLETED: &str = "COMPLETED";
}

/// Capacity invariant for entries: the participant count never reaches
/// past `max_slots`. Shared by the entry pre-check and the locked
/// insert path.
pub(crate) fn ensure_capacity(count: i64, max_slots: i32) -> Result<()> {
    if count >= max_slots as i64 {
        return Err(AppError::SlotFull);
    }
    Ok(())
}

/// Prizes settle from LIVE only: UPCOMING has no played match yet and
/// COMPLETED has already paid out.
pub(crate) fn ensure_settleable(current: &str) -> Result<()> {
    match current {
        status::LIVE => Ok(()),
        status::COMPLETED => Err(AppError::BadRequest(
            "Tournament is already completed".to_string(),
        )),
        _ => Err(AppError::BadRequest(
            "Tournament has not gone live yet".to_string(),
        )),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tournament {
    pub id: String,
    pub name: String,
    pub game_name: String,
    pub mode: String,
    pub rules: String,
    pub banner_url: Option<String>,
    pub date: String,
    pub time: String,
    pub day: String,
    pub prize_pool: Decimal,
    pub entry_fee: Decimal,
    pub max_slots: i32,
    pub status: String,
    pub game_id: Option<String>,
    pub game_password: Option<String>,
    pub winner_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Participant {
    pub tournament_id: String,
    pub user_id: String,
    pub game_name: String,
    pub game_uid: String,
    pub slot_no: i32,
    pub joined_at: DateTime<Utc>,
}

/// Tournament plus its participant roster, the shape the dashboard polls.
#[derive(Debug, Serialize)]
pub struct TournamentView {
    #[serde(flatten)]
    pub tournament: Tournament,
    pub participants: Vec<Participant>,
}

// ==================== DTOS ====================

#[derive(Debug, Deserialize)]
pub struct CreateTournamentRequest {
    pub name: String,
    pub game_name: String,
    pub mode: String,
    #[serde(default)]
    pub rules: String,
    pub banner_url: Option<String>,
    pub date: String,
    pub time: String,
    #[serde(default)]
    pub day: String,
    /// Decimal strings; strictly parsed.
    pub prize_pool: String,
    pub entry_fee: String,
    pub max_slots: i32,
}

#[derive(Debug, Deserialize)]
pub struct JoinTournamentRequest {
    /// In-game identity of the entrant.
    pub game_name: String,
    pub game_uid: String,
    /// External payment reference; required for proof-of-payment entries.
    pub utr_number: Option<String>,
    /// True debits the entry fee from the wallet immediately.
    pub pay_via_wallet: bool,
}

#[derive(Debug, Deserialize)]
pub struct RoomCredentialsRequest {
    pub game_id: String,
    pub game_password: String,
}

#[derive(Debug, Deserialize)]
pub struct SetWinnerRequest {
    pub winner_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_holds_below_max_slots() {
        assert!(ensure_capacity(0, 8).is_ok());
        assert!(ensure_capacity(7, 8).is_ok());
    }

    #[test]
    fn full_tournament_rejects_further_entries() {
        assert!(matches!(ensure_capacity(8, 8), Err(AppError::SlotFull)));
        assert!(matches!(ensure_capacity(9, 8), Err(AppError::SlotFull)));
    }

    #[test]
    fn only_live_tournaments_settle() {
        assert!(ensure_settleable(status::LIVE).is_ok());
        assert!(matches!(
            ensure_settleable(status::UPCOMING),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            ensure_settleable(status::COMPLETED),
            Err(AppError::BadRequest(_))
        ));
    }
}
