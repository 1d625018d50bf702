use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};

use crate::{
    error::Result,
    models::{
        request::JoinRequest,
        tournament::{
            CreateTournamentRequest, JoinTournamentRequest, RoomCredentialsRequest,
            SetWinnerRequest, Tournament, TournamentView,
        },
        ApiResponse,
    },
    services::{JoinOutcome, TournamentService},
};

use super::{require_admin, require_user, AppState};

// ==================== PUBLIC LISTING ====================

/// GET /api/v1/tournaments
///
/// The roster poll. No auth needed; room credentials live on the
/// tournament rows and are only populated once LIVE.
pub async fn list_tournaments(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<TournamentView>>>> {
    let service = TournamentService::new(state.db.clone());
    let views = service.list_views().await?;
    Ok(Json(ApiResponse::success(views)))
}

// ==================== ADMIN LIFECYCLE ====================

/// POST /api/v1/tournaments
pub async fn create_tournament(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateTournamentRequest>,
) -> Result<Json<ApiResponse<Tournament>>> {
    let admin = require_admin(&headers, &state).await?;
    let service = TournamentService::new(state.db.clone());
    let tournament = service.create_tournament(&admin, req).await?;
    Ok(Json(ApiResponse::success(tournament)))
}

/// DELETE /api/v1/tournaments/{id}
pub async fn delete_tournament(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    let admin = require_admin(&headers, &state).await?;
    let service = TournamentService::new(state.db.clone());
    service.delete_tournament(&admin, &id).await?;
    Ok(Json(ApiResponse::success(())))
}

/// POST /api/v1/tournaments/{id}/room
pub async fn assign_room(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(req): Json<RoomCredentialsRequest>,
) -> Result<Json<ApiResponse<Tournament>>> {
    let admin = require_admin(&headers, &state).await?;
    let service = TournamentService::new(state.db.clone());
    let tournament = service
        .assign_room(&admin, &id, &req.game_id, &req.game_password)
        .await?;
    Ok(Json(ApiResponse::success(tournament)))
}

/// POST /api/v1/tournaments/{id}/winner
pub async fn set_winner(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(req): Json<SetWinnerRequest>,
) -> Result<Json<ApiResponse<Tournament>>> {
    let admin = require_admin(&headers, &state).await?;
    let service = TournamentService::new(state.db.clone());
    let tournament = service.set_winner(&admin, &id, &req.winner_id).await?;
    Ok(Json(ApiResponse::success(tournament)))
}

// ==================== ENTRY ====================

/// POST /api/v1/tournaments/{id}/join
pub async fn join_tournament(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(req): Json<JoinTournamentRequest>,
) -> Result<Json<ApiResponse<JoinOutcome>>> {
    let user = require_user(&headers, &state).await?;
    let service = TournamentService::new(state.db.clone());
    let outcome = service.join(&user, &id, req).await?;
    Ok(Json(ApiResponse::success(outcome)))
}

/// GET /api/v1/tournaments/requests
pub async fn list_join_requests(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<Vec<JoinRequest>>>> {
    let user = require_user(&headers, &state).await?;
    let scope = if user.is_admin() {
        None
    } else {
        Some(user.id.as_str())
    };
    let requests = state.db.list_join_requests(scope).await?;
    Ok(Json(ApiResponse::success(requests)))
}

/// POST /api/v1/tournaments/requests/{id}/approve
pub async fn approve_join_request(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<JoinRequest>>> {
    let admin = require_admin(&headers, &state).await?;
    let service = TournamentService::new(state.db.clone());
    let request = service.approve_join(&admin, &id).await?;
    Ok(Json(ApiResponse::success(request)))
}

/// POST /api/v1/tournaments/requests/{id}/reject
pub async fn reject_join_request(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<JoinRequest>>> {
    let admin = require_admin(&headers, &state).await?;
    let service = TournamentService::new(state.db.clone());
    let request = service.reject_join(&admin, &id).await?;
    Ok(Json(ApiResponse::success(request)))
}
