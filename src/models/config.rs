use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Singleton application settings row, readable by all clients and
/// written only by the admin. `auto_payment_enabled` is stored and
/// served but drives nothing; gateway integration is out of scope.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GlobalConfig {
    pub upi_id: String,
    pub qr_url: String,
    pub chat_disabled: bool,
    pub auto_payment_enabled: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            upi_id: "admin@upi".to_string(),
            qr_url: String::new(),
            chat_disabled: false,
            auto_payment_enabled: false,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateConfigRequest {
    pub upi_id: String,
    #[serde(default)]
    pub qr_url: String,
    #[serde(default)]
    pub chat_disabled: bool,
    #[serde(default)]
    pub auto_payment_enabled: bool,
}
