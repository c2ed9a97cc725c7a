//! Pool, quota keeper and gauge interfaces
use odra::prelude::*;
use odra::casper_types::U256;

/// Quota parameters of a collateral token
#[odra::odra_type]
pub struct TokenQuotaParams {
    pub rate: u32,
    pub cumulative_index_lu: U256,
    pub quota_increase_fee: u32,
    pub total_quoted: U256,
    pub limit: U256,
    pub is_active: bool,
}

/// Rate bounds voted on in a gauge
#[odra::odra_type]
pub struct QuotaRateParams {
    pub min_rate: u32,
    pub max_rate: u32,
    pub total_votes_lp_side: U256,
    pub total_votes_ca_side: U256,
}

#[odra::external_contract]
pub trait Pool {
    fn credit_manager_borrowed(&self, credit_manager: Address) -> U256;
    fn credit_manager_debt_limit(&self, credit_manager: Address) -> U256;
    fn total_debt_limit(&self) -> U256;
    fn withdraw_fee(&self) -> u32;
    fn pool_quota_keeper(&self) -> Address;
}

#[odra::external_contract]
pub trait PoolQuotaKeeper {
    fn get_token_quota_params(&self, token: Address) -> TokenQuotaParams;
    fn gauge(&self) -> Address;
    /// Quota of a credit account in a token, denominated in the pool underlying
    fn get_quota(&self, credit_account: Address, token: Address) -> U256;
}

#[odra::external_contract]
pub trait Gauge {
    fn quota_rate_params(&self, token: Address) -> QuotaRateParams;
}
