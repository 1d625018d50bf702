use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};

use crate::{
    error::Result,
    models::{
        request::{NewDepositRequest, NewWithdrawalRequest, WalletAddRequest, WithdrawalRequest},
        user::{AdjustBalanceRequest, BalanceResponse},
        ApiResponse,
    },
    services::WalletService,
};

use super::{require_admin, require_user, AppState};

// ==================== DEPOSITS ====================

/// POST /api/v1/wallet/deposits
pub async fn create_deposit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<NewDepositRequest>,
) -> Result<Json<ApiResponse<WalletAddRequest>>> {
    let user = require_user(&headers, &state).await?;
    let service = WalletService::new(state.db.clone());
    let deposit = service.request_deposit(&user, &req.amount, &req.utr).await?;
    Ok(Json(ApiResponse::success(deposit)))
}

/// GET /api/v1/wallet/deposits
///
/// Players see their own history; admins see everything.
pub async fn list_deposits(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<Vec<WalletAddRequest>>>> {
    let user = require_user(&headers, &state).await?;
    let scope = if user.is_admin() {
        None
    } else {
        Some(user.id.as_str())
    };
    let deposits = state.db.list_wallet_adds(scope).await?;
    Ok(Json(ApiResponse::success(deposits)))
}

/// POST /api/v1/wallet/deposits/{id}/approve
pub async fn approve_deposit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<WalletAddRequest>>> {
    let admin = require_admin(&headers, &state).await?;
    let service = WalletService::new(state.db.clone());
    let deposit = service.resolve_deposit(&admin, &id, true).await?;
    Ok(Json(ApiResponse::success(deposit)))
}

/// POST /api/v1/wallet/deposits/{id}/reject
pub async fn reject_deposit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<WalletAddRequest>>> {
    let admin = require_admin(&headers, &state).await?;
    let service = WalletService::new(state.db.clone());
    let deposit = service.resolve_deposit(&admin, &id, false).await?;
    Ok(Json(ApiResponse::success(deposit)))
}

// ==================== WITHDRAWALS ====================

/// POST /api/v1/wallet/withdrawals
pub async fn create_withdrawal(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<NewWithdrawalRequest>,
) -> Result<Json<ApiResponse<WithdrawalRequest>>> {
    let user = require_user(&headers, &state).await?;
    let service = WalletService::new(state.db.clone());
    let withdrawal = service
        .request_withdrawal(&user, &req.amount, &req.upi_id)
        .await?;
    Ok(Json(ApiResponse::success(withdrawal)))
}

/// GET /api/v1/wallet/withdrawals
pub async fn list_withdrawals(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<Vec<WithdrawalRequest>>>> {
    let user = require_user(&headers, &state).await?;
    let scope = if user.is_admin() {
        None
    } else {
        Some(user.id.as_str())
    };
    let withdrawals = state.db.list_withdrawals(scope).await?;
    Ok(Json(ApiResponse::success(withdrawals)))
}

/// POST /api/v1/wallet/withdrawals/{id}/pay
pub async fn pay_withdrawal(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<WithdrawalRequest>>> {
    let admin = require_admin(&headers, &state).await?;
    let service = WalletService::new(state.db.clone());
    let withdrawal = service.resolve_withdrawal(&admin, &id, true).await?;
    Ok(Json(ApiResponse::success(withdrawal)))
}

/// POST /api/v1/wallet/withdrawals/{id}/reject
pub async fn reject_withdrawal(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<WithdrawalRequest>>> {
    let admin = require_admin(&headers, &state).await?;
    let service = WalletService::new(state.db.clone());
    let withdrawal = service.resolve_withdrawal(&admin, &id, false).await?;
    Ok(Json(ApiResponse::success(withdrawal)))
}

// ==================== ADMIN ADJUSTMENT ====================

/// POST /api/v1/wallet/users/{user_id}/adjust
///
/// Manual correction path; the delta is signed and still subject to the
/// non-negative balance floor.
pub async fn adjust_balance(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<String>,
    Json(req): Json<AdjustBalanceRequest>,
) -> Result<Json<ApiResponse<BalanceResponse>>> {
    let admin = require_admin(&headers, &state).await?;
    let service = WalletService::new(state.db.clone());
    let wallet_balance = service
        .admin_adjust_balance(&admin, &user_id, &req.delta)
        .await?;
    Ok(Json(ApiResponse::success(BalanceResponse {
        user_id,
        wallet_balance,
    })))
}
