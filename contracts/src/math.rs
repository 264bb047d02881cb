//! Fixed-point valuation primitives for the IDRW engine.
//!
//! All amounts and USD values are 18-decimal fixed point (`U256`). Every
//! conversion floors, which is conservative for both the user's minting
//! power and the solvency check. Overflow is an error, never a wrap.

use odra::casper_types::U256;

use crate::errors::EngineError;

/// Fixed-point scale (1e18)
pub const PRICE_SCALE: u128 = 1_000_000_000_000_000_000;

/// Fixed-point decimals for amounts, prices, and USD values
pub const PRICE_DECIMALS: u8 = 18;

/// Ratio arithmetic operates on whole percents
pub const PERCENT_SCALE: u64 = 100;

/// Scale a raw feed answer to an 18-decimal USD price.
///
/// A failed feed call or a non-positive answer is a hard failure of the
/// calling operation; there is no fallback price.
pub fn normalize_price(price: i64, decimals: u8) -> Result<U256, EngineError> {
    if price <= 0 {
        return Err(EngineError::OracleUnavailable);
    }

    let raw = U256::from(price as u64);
    if decimals <= PRICE_DECIMALS {
        let factor = U256::from(10u64)
            .checked_pow(U256::from(PRICE_DECIMALS - decimals))
            .ok_or(EngineError::ArithmeticOverflow)?;
        raw.checked_mul(factor)
            .ok_or(EngineError::ArithmeticOverflow)
    } else {
        let divisor = U256::from(10u64)
            .checked_pow(U256::from(decimals - PRICE_DECIMALS))
            .ok_or(EngineError::ArithmeticOverflow)?;
        raw.checked_div(divisor)
            .ok_or(EngineError::ArithmeticOverflow)
    }
}

/// USD value of a collateral amount at a normalized (1e18) price.
///
/// `value = amount * price / 1e18`, floored.
pub fn collateral_value_usd(amount: U256, price: U256) -> Result<U256, EngineError> {
    amount
        .checked_mul(price)
        .and_then(|v| v.checked_div(U256::from(PRICE_SCALE)))
        .ok_or(EngineError::ArithmeticOverflow)
}

/// Collateral amount equivalent to a USD value at a normalized (1e18) price.
///
/// Inverse of [`collateral_value_usd`] up to one smallest fixed-point unit.
pub fn collateral_amount_from_usd(usd_value: U256, price: U256) -> Result<U256, EngineError> {
    if price.is_zero() {
        return Err(EngineError::OracleUnavailable);
    }
    usd_value
        .checked_mul(U256::from(PRICE_SCALE))
        .and_then(|v| v.checked_div(price))
        .ok_or(EngineError::ArithmeticOverflow)
}

/// Collateralization predicate: `value * 100 >= debt * ratio_percent`.
///
/// Vacuously true when `debt` is zero.
pub fn is_ratio_satisfied(
    total_value_usd: U256,
    debt: U256,
    ratio_percent: u32,
) -> Result<bool, EngineError> {
    if debt.is_zero() {
        return Ok(true);
    }

    let scaled_value = total_value_usd
        .checked_mul(U256::from(PERCENT_SCALE))
        .ok_or(EngineError::ArithmeticOverflow)?;
    let scaled_debt = debt
        .checked_mul(U256::from(ratio_percent))
        .ok_or(EngineError::ArithmeticOverflow)?;

    Ok(scaled_value >= scaled_debt)
}

/// Largest additional debt that keeps the ratio satisfied.
///
/// `max = value * 100 / ratio_percent - debt`, floored at zero when the
/// position is already at or past the limit.
pub fn max_mintable(
    total_value_usd: U256,
    debt: U256,
    ratio_percent: u32,
) -> Result<U256, EngineError> {
    let capacity = total_value_usd
        .checked_mul(U256::from(PERCENT_SCALE))
        .and_then(|v| v.checked_div(U256::from(ratio_percent)))
        .ok_or(EngineError::ArithmeticOverflow)?;

    if capacity <= debt {
        Ok(U256::zero())
    } else {
        Ok(capacity - debt)
    }
}
