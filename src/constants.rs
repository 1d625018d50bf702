pub const API_VERSION: &str = "1.0.0";

/// Window after any wallet-affecting mutation during which a non-admin
/// user cannot submit a new deposit or withdrawal request.
pub const TX_COOLDOWN_HOURS: i64 = 5;

/// Registration with this username is rejected; the account is seeded
/// from config at startup instead.
pub const RESERVED_ADMIN_USERNAME: &str = "admin";

/// The `config` table is a singleton row.
pub const CONFIG_ROW_ID: i32 = 1;

/// Suggested client poll interval, surfaced on the health endpoint.
pub const POLL_INTERVAL_SECONDS: u64 = 5;
