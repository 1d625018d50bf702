use axum::http::HeaderValue;
use axum::{
    routing::{delete, get, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod config;
mod constants;
mod db;
mod error;
mod models;
mod services;
mod utils;

use config::Config;
use constants::API_VERSION;
use db::Database;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "arena_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    config.validate()?;

    tracing::info!("Starting Arena Backend Server");
    tracing::info!("Environment: {}", config.environment);
    tracing::info!("API Version: {}", API_VERSION);

    let db = Database::new(&config).await?;

    tracing::info!("Running database migrations...");
    db.run_migrations().await?;

    // Admin account comes from the environment, never from a code
    // constant, and is refreshed on every boot.
    let admin_hash = utils::hash_password(&config.admin_password);
    let admin = db
        .ensure_admin_user(&config.admin_username, &admin_hash)
        .await?;
    tracing::info!(admin = %admin.username, "admin account ready");

    let app_state = api::AppState {
        db,
        config: config.clone(),
    };

    let app = build_router(app_state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_router(state: api::AppState) -> Router {
    let cors = cors_from_config(&state.config);

    Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        // Authentication
        .route("/api/v1/auth/register", post(api::auth::register))
        .route("/api/v1/auth/login", post(api::auth::login))
        .route("/api/v1/profile", get(api::profile::me))
        // Wallet
        .route(
            "/api/v1/wallet/deposits",
            post(api::wallet::create_deposit).get(api::wallet::list_deposits),
        )
        .route(
            "/api/v1/wallet/deposits/{id}/approve",
            post(api::wallet::approve_deposit),
        )
        .route(
            "/api/v1/wallet/deposits/{id}/reject",
            post(api::wallet::reject_deposit),
        )
        .route(
            "/api/v1/wallet/withdrawals",
            post(api::wallet::create_withdrawal).get(api::wallet::list_withdrawals),
        )
        .route(
            "/api/v1/wallet/withdrawals/{id}/pay",
            post(api::wallet::pay_withdrawal),
        )
        .route(
            "/api/v1/wallet/withdrawals/{id}/reject",
            post(api::wallet::reject_withdrawal),
        )
        .route(
            "/api/v1/wallet/users/{user_id}/adjust",
            post(api::wallet::adjust_balance),
        )
        // Tournaments
        .route(
            "/api/v1/tournaments",
            get(api::tournaments::list_tournaments).post(api::tournaments::create_tournament),
        )
        .route(
            "/api/v1/tournaments/requests",
            get(api::tournaments::list_join_requests),
        )
        .route(
            "/api/v1/tournaments/requests/{id}/approve",
            post(api::tournaments::approve_join_request),
        )
        .route(
            "/api/v1/tournaments/requests/{id}/reject",
            post(api::tournaments::reject_join_request),
        )
        .route(
            "/api/v1/tournaments/{id}",
            delete(api::tournaments::delete_tournament),
        )
        .route(
            "/api/v1/tournaments/{id}/join",
            post(api::tournaments::join_tournament),
        )
        .route(
            "/api/v1/tournaments/{id}/room",
            post(api::tournaments::assign_room),
        )
        .route(
            "/api/v1/tournaments/{id}/winner",
            post(api::tournaments::set_winner),
        )
        // Users (admin)
        .route("/api/v1/users", get(api::users::list_users))
        .route("/api/v1/users/{id}/block", post(api::users::set_blocked))
        .route(
            "/api/v1/users/{id}/chat-block",
            post(api::users::set_chat_blocked),
        )
        // Settings
        .route(
            "/api/v1/config",
            get(api::config::get_config).put(api::config::update_config),
        )
        // Messages
        .route("/api/v1/messages", post(api::messages::send_message))
        .route("/api/v1/messages/read", post(api::messages::mark_read))
        .route(
            "/api/v1/messages/{peer_id}",
            get(api::messages::get_conversation),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn cors_from_config(config: &Config) -> CorsLayer {
    let raw = config.cors_allowed_origins.trim();
    if raw.is_empty() || raw == "*" {
        return CorsLayer::very_permissive();
    }

    let allowed: Vec<HeaderValue> = raw
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse::<HeaderValue>().ok())
        .collect();

    if allowed.is_empty() {
        tracing::warn!("No valid CORS origins parsed; falling back to permissive");
        return CorsLayer::very_permissive();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}
