//! Sanity probes - read-only snapshots of the parameter a queued call changes
//!
//! A probe is captured when a change is queued and evaluated again right
//! before execution. Execution is refused if the two readings differ.
use odra::prelude::*;
use odra::casper_types::U256;

/// Parameter read by a probe
#[odra::odra_type]
pub enum SanityProbe {
    /// Facade `expiration_date`
    ExpirationDate,
    /// Facade `max_debt_per_block_multiplier`
    MaxDebtPerBlockMultiplier,
    /// Facade `debt_limits().0`
    MinDebt,
    /// Facade `debt_limits().1`
    MaxDebt,
    /// Pool `credit_manager_debt_limit(key)`
    CreditManagerDebtLimit,
    /// Fingerprint of credit manager `lt_params(key)`
    LtParams,
    /// Quota keeper `limit` of token `key`
    TokenLimit,
    /// Quota keeper `quota_increase_fee` of token `key`
    TokenQuotaIncreaseFee,
    /// Pool `total_debt_limit`
    TotalDebtLimit,
    /// Pool `withdraw_fee`
    WithdrawFee,
    /// Gauge `min_rate` of token `key`
    MinQuotaRate,
    /// Gauge `max_rate` of token `key`
    MaxQuotaRate,
    /// Fingerprint of oracle `price_feed_params(key)`
    PriceFeedParams,
    /// LP feed `lower_bound`
    PriceFeedLowerBound,
}

/// Probe bound to the contract it reads
#[odra::odra_type]
pub struct SanityCheck {
    pub probe: SanityProbe,
    /// Contract the probe reads from
    pub subject: Address,
    /// Token or credit manager the reading is scoped to
    pub key: Option<Address>,
}

impl SanityCheck {
    pub fn new(probe: SanityProbe, subject: Address) -> Self {
        Self {
            probe,
            subject,
            key: None,
        }
    }

    pub fn keyed(probe: SanityProbe, subject: Address, key: Address) -> Self {
        Self {
            probe,
            subject,
            key: Some(key),
        }
    }
}

/// Compresses a hash of a structured reading into a comparable value
pub fn fingerprint(hash: [u8; 32]) -> U256 {
    U256::from_big_endian(&hash)
}
