//! Fixed-point helpers for basis-point and decimal-scaled arithmetic
use odra::prelude::*;
use odra::casper_types::U256;

/// Basis points denominator (100% = 10_000)
pub const PERCENTAGE_FACTOR: u64 = 10_000;

/// Mask bit reserved for the underlying asset of a credit manager
pub const UNDERLYING_TOKEN_MASK: u64 = 1;

/// Arithmetic failures
#[odra::odra_error]
pub enum MathError {
    /// Overflow error
    Overflow = 500,
    /// Underflow error
    Underflow = 501,
    /// Division by zero
    DivisionByZero = 502,
}

/// Checked math operations for U256
pub struct SafeMath;

impl SafeMath {
    pub fn add(a: U256, b: U256) -> Result<U256, MathError> {
        a.checked_add(b).ok_or(MathError::Overflow)
    }

    pub fn sub(a: U256, b: U256) -> Result<U256, MathError> {
        a.checked_sub(b).ok_or(MathError::Underflow)
    }

    pub fn mul(a: U256, b: U256) -> Result<U256, MathError> {
        a.checked_mul(b).ok_or(MathError::Overflow)
    }

    pub fn div(a: U256, b: U256) -> Result<U256, MathError> {
        if b.is_zero() {
            return Err(MathError::DivisionByZero);
        }
        Ok(a / b)
    }

    /// a * b / c without losing the intermediate product
    pub fn mul_div(a: U256, b: U256, c: U256) -> Result<U256, MathError> {
        Self::div(Self::mul(a, b)?, c)
    }
}

/// Percentage math in basis points
pub struct PercentMath;

impl PercentMath {
    /// value * bps / PERCENTAGE_FACTOR, rounding down
    pub fn percent_mul(value: U256, bps: u32) -> Result<U256, MathError> {
        SafeMath::mul_div(value, U256::from(bps), U256::from(PERCENTAGE_FACTOR))
    }
}

/// Unit conversion between tokens of different precision
pub struct DecimalMath;

impl DecimalMath {
    /// 10^decimals
    pub fn unit(decimals: u8) -> Result<U256, MathError> {
        U256::from(10u64)
            .checked_pow(U256::from(decimals))
            .ok_or(MathError::Overflow)
    }

    /// Re-expresses `amount` of a token with `from_decimals` precision in units
    /// of a token with `to_decimals` precision. Pure unit scaling, no price.
    pub fn rescale(amount: U256, from_decimals: u8, to_decimals: u8) -> Result<U256, MathError> {
        if from_decimals == to_decimals {
            return Ok(amount);
        }
        SafeMath::mul_div(amount, Self::unit(to_decimals)?, Self::unit(from_decimals)?)
    }
}
