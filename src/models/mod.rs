pub mod config;
pub mod message;
pub mod request;
pub mod tournament;
pub mod user;

pub use config::GlobalConfig;
pub use message::Message;
pub use request::{JoinRequest, WalletAddRequest, WithdrawalRequest};
pub use tournament::{Participant, Tournament, TournamentView};
pub use user::User;

use serde::Serialize;

// ==================== API RESPONSE ====================
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_response_success_sets_flag() {
        let response = ApiResponse::success("ok");
        assert!(response.success);
        assert_eq!(response.data, "ok");
    }
}
