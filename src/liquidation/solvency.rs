//! Solvency math of the gatekeeper: bad debt and aliased valuation
use odra::prelude::*;
use odra::casper_types::U256;
use crate::interfaces::CollateralDebtData;
use crate::math::{MathError, PercentMath, SafeMath, PERCENTAGE_FACTOR, UNDERLYING_TOKEN_MASK};

/// Balances at or below this are dust and carry no weighted value
pub const DUST_BALANCE: u64 = 1;

/// Valuation of one aliased collateral token of an account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasedPosition {
    /// USD value at the token's own price
    pub value_usd: U256,
    /// USD value at the alias price
    pub aliased_value_usd: U256,
    pub liquidation_threshold: u32,
    /// Quota converted to USD, for quoted tokens
    pub quota_usd: Option<U256>,
}

impl AliasedPosition {
    /// min(value * lt / PF, quota), as the credit manager weighs collateral
    fn weighted(&self, value_usd: U256) -> Result<U256, MathError> {
        let weighted = PercentMath::percent_mul(value_usd, self.liquidation_threshold)?;
        Ok(capped(weighted, self.quota_usd))
    }
}

/// True when liquidation proceeds cannot cover debt plus interest:
/// total_value * liquidation_discount < (debt + accrued_interest) * PERCENTAGE_FACTOR
pub fn is_bad_debt(data: &CollateralDebtData, liquidation_discount: u32) -> Result<bool, MathError> {
    let proceeds = SafeMath::mul(data.total_value, U256::from(liquidation_discount))?;
    let owed = SafeMath::mul(
        SafeMath::add(data.debt, data.accrued_interest)?,
        U256::from(PERCENTAGE_FACTOR),
    )?;
    Ok(proceeds < owed)
}

/// Total weighted value with each aliased position revalued at its alias price
pub fn aliased_twv_usd(twv_usd: U256, positions: &[AliasedPosition]) -> Result<U256, MathError> {
    positions.iter().try_fold(twv_usd, |twv, position| {
        let weighted = position.weighted(position.value_usd)?;
        let aliased = position.weighted(position.aliased_value_usd)?;
        SafeMath::add(twv.saturating_sub(weighted), aliased)
    })
}

pub fn is_liquidatable(twv_usd: U256, total_debt_usd: U256) -> bool {
    twv_usd < total_debt_usd
}

/// Single-bit masks of the enabled collateral tokens, lowest bit first.
/// The underlying is never included.
pub fn collateral_masks(enabled_tokens_mask: U256) -> Vec<U256> {
    let collateral = enabled_tokens_mask & !U256::from(UNDERLYING_TOKEN_MASK);
    (0..256u32)
        .filter(|bit| collateral.bit(*bit as usize))
        .map(|bit| U256::one() << bit)
        .collect()
}

pub fn capped(value: U256, cap: Option<U256>) -> U256 {
    match cap {
        Some(cap) => value.min(cap),
        None => value,
    }
}
