use rust_decimal::{Decimal, RoundingStrategy};
use sha2::{Digest, Sha256};
use std::str::FromStr;

use crate::error::{AppError, Result};

/// Round a currency value to two decimal places, half-up.
/// Every balance and every request amount passes through this before
/// it is persisted or compared.
pub fn round2(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Strict decimal parser for user-supplied currency amounts. Malformed
/// input is rejected outright rather than coerced; the UI-era habit of
/// stripping non-digit characters is gone.
pub fn parse_amount(raw: &str) -> Result<Decimal> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(AppError::InvalidAmount("amount is empty".to_string()));
    }

    let amount = Decimal::from_str(value)
        .map_err(|_| AppError::InvalidAmount(format!("'{}' is not a valid number", value)))?;

    if amount <= Decimal::ZERO {
        return Err(AppError::InvalidAmount(
            "amount must be greater than zero".to_string(),
        ));
    }

    Ok(round2(amount))
}

/// Like `parse_amount` but admits zero, for entry fees and prize pools
/// of free tournaments.
pub fn parse_non_negative_amount(raw: &str) -> Result<Decimal> {
    let value = raw.trim();
    if value.is_empty() {
        return Ok(Decimal::ZERO);
    }

    let amount = Decimal::from_str(value)
        .map_err(|_| AppError::InvalidAmount(format!("'{}' is not a valid number", value)))?;

    if amount < Decimal::ZERO {
        return Err(AppError::InvalidAmount(
            "amount must not be negative".to_string(),
        ));
    }

    Ok(round2(amount))
}

/// Signed delta for manual admin corrections; zero is rejected.
pub fn parse_signed_amount(raw: &str) -> Result<Decimal> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(AppError::InvalidAmount("amount is empty".to_string()));
    }

    let amount = Decimal::from_str(value)
        .map_err(|_| AppError::InvalidAmount(format!("'{}' is not a valid number", value)))?;

    if amount.is_zero() {
        return Err(AppError::InvalidAmount(
            "amount must not be zero".to_string(),
        ));
    }

    Ok(round2(amount))
}

pub fn hash_password(password: &str) -> String {
    let digest = Sha256::digest(password.as_bytes());
    hex::encode(digest)
}

pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    hash_password(password) == stored_hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_is_half_up() {
        assert_eq!(round2(Decimal::from_str("10.005").unwrap()).to_string(), "10.01");
        assert_eq!(round2(Decimal::from_str("10.004").unwrap()).to_string(), "10.00");
        assert_eq!(round2(Decimal::from_str("99.995").unwrap()).to_string(), "100.00");
    }

    #[test]
    fn parse_amount_accepts_plain_decimals() {
        assert_eq!(parse_amount("250").unwrap().to_string(), "250.00");
        assert_eq!(parse_amount(" 40.5 ").unwrap().to_string(), "40.50");
    }

    #[test]
    fn parse_amount_rejects_garbage() {
        assert!(matches!(parse_amount(""), Err(AppError::InvalidAmount(_))));
        assert!(matches!(parse_amount("abc"), Err(AppError::InvalidAmount(_))));
        assert!(matches!(parse_amount("₹100"), Err(AppError::InvalidAmount(_))));
        assert!(matches!(parse_amount("10,00"), Err(AppError::InvalidAmount(_))));
    }

    #[test]
    fn parse_amount_rejects_non_positive() {
        assert!(matches!(parse_amount("0"), Err(AppError::InvalidAmount(_))));
        assert!(matches!(parse_amount("-5"), Err(AppError::InvalidAmount(_))));
        assert!(matches!(parse_amount("0.00"), Err(AppError::InvalidAmount(_))));
    }

    #[test]
    fn password_hash_round_trip() {
        let hash = hash_password("hunter2");
        assert!(verify_password("hunter2", &hash));
        assert!(!verify_password("hunter3", &hash));
    }
}
