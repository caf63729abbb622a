// src/amount.rs
//! Fixed-point handling of token amounts.
//!
//! Grant records carry amounts as decimal strings in human units. They are
//! parsed into `rust_decimal::Decimal` so monetary comparisons never go
//! through binary floating point, and scaled to the token's smallest unit
//! only at the submission boundary.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;
use thiserror::Error;

/// Largest token-decimals scale a `Decimal` mantissa can carry.
const MAX_SCALE: u32 = 28;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AmountError {
    #[error("invalid numeric string: {0:?}")]
    InvalidNumericString(String),

    #[error("amount {amount} cannot be scaled to {decimals} decimals")]
    Unrepresentable { amount: Decimal, decimals: u32 },
}

/// Parse a decimal-string amount.
pub fn parse_amount(raw: &str) -> Result<Decimal, AmountError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AmountError::InvalidNumericString(raw.to_string()));
    }
    Decimal::from_str(trimmed).map_err(|_| AmountError::InvalidNumericString(raw.to_string()))
}

/// Scale a human-unit amount to the token's smallest unit.
///
/// The result truncates anything below the smallest unit; negative amounts
/// and scales beyond `Decimal` range are rejected.
pub fn to_base_units(amount: Decimal, decimals: u32) -> Result<u128, AmountError> {
    if amount.is_sign_negative() || decimals > MAX_SCALE {
        return Err(AmountError::Unrepresentable { amount, decimals });
    }
    let factor = Decimal::from_i128_with_scale(10i128.pow(decimals), 0);
    let scaled = amount
        .checked_mul(factor)
        .ok_or(AmountError::Unrepresentable { amount, decimals })?;
    scaled
        .trunc()
        .to_u128()
        .ok_or(AmountError::Unrepresentable { amount, decimals })
}

/// Round to the 2-decimal display convention, midpoints away from zero.
pub fn round_display(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
