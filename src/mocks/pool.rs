//! Pool suite mock - pool, quota keeper and gauge in one contract
use odra::prelude::*;
use odra::casper_types::U256;
use crate::interfaces::{QuotaRateParams, TokenQuotaParams};

#[odra::module]
pub struct MockPoolSuite {
    borrowed: Mapping<Address, U256>,
    credit_manager_debt_limits: Mapping<Address, U256>,
    total_debt_limit: Var<U256>,
    withdraw_fee: Var<u32>,
    quota_params: Mapping<Address, TokenQuotaParams>,
    rate_params: Mapping<Address, QuotaRateParams>,
    /// (credit account, token) -> quota
    quotas: Mapping<(Address, Address), U256>,
}

#[odra::module]
impl MockPoolSuite {
    // ========================================================================
    // Pool
    // ========================================================================

    pub fn credit_manager_borrowed(&self, credit_manager: Address) -> U256 {
        self.borrowed.get(&credit_manager).unwrap_or_default()
    }

    pub fn credit_manager_debt_limit(&self, credit_manager: Address) -> U256 {
        self.credit_manager_debt_limits.get(&credit_manager).unwrap_or_default()
    }

    pub fn total_debt_limit(&self) -> U256 {
        self.total_debt_limit.get_or_default()
    }

    pub fn withdraw_fee(&self) -> u32 {
        self.withdraw_fee.get_or_default()
    }

    pub fn pool_quota_keeper(&self) -> Address {
        self.env().self_address()
    }

    pub fn set_credit_manager_debt_limit(&mut self, credit_manager: Address, debt_limit: U256) {
        self.credit_manager_debt_limits.set(&credit_manager, debt_limit);
    }

    pub fn set_total_debt_limit(&mut self, total_debt_limit: U256) {
        self.total_debt_limit.set(total_debt_limit);
    }

    pub fn set_withdraw_fee(&mut self, withdraw_fee: u32) {
        self.withdraw_fee.set(withdraw_fee);
    }

    // ========================================================================
    // Quota keeper
    // ========================================================================

    pub fn get_token_quota_params(&self, token: Address) -> TokenQuotaParams {
        self.quota_params.get(&token).unwrap_or(TokenQuotaParams {
            rate: 0,
            cumulative_index_lu: U256::zero(),
            quota_increase_fee: 0,
            total_quoted: U256::zero(),
            limit: U256::zero(),
            is_active: false,
        })
    }

    pub fn gauge(&self) -> Address {
        self.env().self_address()
    }

    pub fn get_quota(&self, credit_account: Address, token: Address) -> U256 {
        self.quotas.get(&(credit_account, token)).unwrap_or_default()
    }

    pub fn set_token_limit(&mut self, token: Address, limit: U256) {
        let mut params = self.get_token_quota_params(token);
        params.limit = limit;
        self.quota_params.set(&token, params);
    }

    pub fn set_token_quota_increase_fee(&mut self, token: Address, quota_increase_fee: u32) {
        let mut params = self.get_token_quota_params(token);
        params.quota_increase_fee = quota_increase_fee;
        self.quota_params.set(&token, params);
    }

    // ========================================================================
    // Gauge
    // ========================================================================

    pub fn quota_rate_params(&self, token: Address) -> QuotaRateParams {
        self.rate_params.get(&token).unwrap_or(QuotaRateParams {
            min_rate: 0,
            max_rate: 0,
            total_votes_lp_side: U256::zero(),
            total_votes_ca_side: U256::zero(),
        })
    }

    pub fn change_quota_min_rate(&mut self, token: Address, min_rate: u32) {
        let mut params = self.quota_rate_params(token);
        params.min_rate = min_rate;
        self.rate_params.set(&token, params);
    }

    pub fn change_quota_max_rate(&mut self, token: Address, max_rate: u32) {
        let mut params = self.quota_rate_params(token);
        params.max_rate = max_rate;
        self.rate_params.set(&token, params);
    }

    // ========================================================================
    // Scenario setup
    // ========================================================================

    pub fn set_borrowed(&mut self, credit_manager: Address, amount: U256) {
        self.borrowed.set(&credit_manager, amount);
    }

    pub fn set_quota(&mut self, credit_account: Address, token: Address, quota: U256) {
        self.quotas.set(&(credit_account, token), quota);
    }
}
