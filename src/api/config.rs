use axum::{extract::State, http::HeaderMap, Json};

use crate::{
    error::Result,
    models::{
        config::{GlobalConfig, UpdateConfigRequest},
        ApiResponse,
    },
};

use super::{require_admin, AppState};

/// GET /api/v1/config
///
/// Public: clients need the payment handle and QR before they can
/// submit a deposit.
pub async fn get_config(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<GlobalConfig>>> {
    let config = state.db.get_config().await?;
    Ok(Json(ApiResponse::success(config)))
}

/// PUT /api/v1/config
pub async fn update_config(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<UpdateConfigRequest>,
) -> Result<Json<ApiResponse<GlobalConfig>>> {
    require_admin(&headers, &state).await?;

    let config = GlobalConfig {
        upi_id: req.upi_id,
        qr_url: req.qr_url,
        chat_disabled: req.chat_disabled,
        auto_payment_enabled: req.auto_payment_enabled,
    };
    state.db.save_config(&config).await?;

    tracing::info!(chat_disabled = config.chat_disabled, "settings updated");
    Ok(Json(ApiResponse::success(config)))
}
