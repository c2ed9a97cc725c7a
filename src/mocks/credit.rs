//! Credit suite mock - credit manager, credit facade and credit configurator in one contract
use odra::prelude::*;
use odra::casper_types::U256;
use odra::List;
use crate::interfaces::{
    CollateralCalcTask, CollateralDebtData, CreditManagerFees, LtParams, MultiCall,
};
use super::MockError;

/// Arguments of the last facade liquidation
#[odra::odra_type]
pub struct LiquidationRecord {
    pub liquidator: Address,
    pub credit_account: Address,
    pub to: Address,
    pub calls: Vec<MultiCall>,
}

#[odra::module]
pub struct MockCreditSuite {
    underlying: Var<Address>,
    pool: Var<Address>,
    price_oracle: Var<Address>,
    fees: Var<CreditManagerFees>,

    // Facade parameters
    expiration_date: Var<u64>,
    max_debt_per_block_multiplier: Var<u8>,
    min_debt: Var<U256>,
    max_debt: Var<U256>,

    /// Collateral tokens by mask bit, the underlying sits at bit 0
    collateral_tokens: List<Address>,
    lt_params: Mapping<Address, LtParams>,
    forbidden_adapters: Mapping<Address, bool>,

    debt_data: Mapping<Address, CollateralDebtData>,
    last_liquidation: Var<LiquidationRecord>,
    liquidations: Var<u32>,
}

#[odra::module]
impl MockCreditSuite {
    pub fn init(&mut self, underlying: Address, pool: Address, price_oracle: Address) {
        self.underlying.set(underlying);
        self.pool.set(pool);
        self.price_oracle.set(price_oracle);
        self.fees.set(CreditManagerFees {
            fee_interest: 1_000,
            fee_liquidation: 150,
            liquidation_discount: 9_600,
            fee_liquidation_expired: 100,
            liquidation_discount_expired: 9_800,
        });
        self.collateral_tokens.push(underlying);
        self.set_lt(underlying, 9_000);
    }

    // ========================================================================
    // Credit manager
    // ========================================================================

    pub fn underlying(&self) -> Address {
        self.underlying.get_or_revert_with(MockError::NotConfigured)
    }

    pub fn pool(&self) -> Address {
        self.pool.get_or_revert_with(MockError::NotConfigured)
    }

    pub fn credit_facade(&self) -> Address {
        self.env().self_address()
    }

    pub fn credit_configurator(&self) -> Address {
        self.env().self_address()
    }

    pub fn price_oracle(&self) -> Address {
        self.price_oracle.get_or_revert_with(MockError::NotConfigured)
    }

    pub fn fees(&self) -> CreditManagerFees {
        self.fees.get_or_revert_with(MockError::NotConfigured)
    }

    pub fn calc_debt_and_collateral(
        &self,
        credit_account: Address,
        _task: CollateralCalcTask,
    ) -> CollateralDebtData {
        self.debt_data
            .get(&credit_account)
            .unwrap_or_revert_with(&self.env(), MockError::NotConfigured)
    }

    pub fn collateral_token_by_mask(&self, token_mask: U256) -> (Address, u32) {
        let token = self
            .collateral_tokens
            .get(token_mask.trailing_zeros())
            .unwrap_or_revert_with(&self.env(), MockError::NotConfigured);
        (token, self.current_lt(token))
    }

    pub fn lt_params(&self, token: Address) -> LtParams {
        self.lt_params
            .get(&token)
            .unwrap_or_revert_with(&self.env(), MockError::NotConfigured)
    }

    // ========================================================================
    // Credit facade
    // ========================================================================

    pub fn expiration_date(&self) -> u64 {
        self.expiration_date.get_or_default()
    }

    pub fn max_debt_per_block_multiplier(&self) -> u8 {
        self.max_debt_per_block_multiplier.get_or_default()
    }

    pub fn debt_limits(&self) -> (U256, U256) {
        (self.min_debt.get_or_default(), self.max_debt.get_or_default())
    }

    /// Records the liquidation instead of settling it
    pub fn liquidate_credit_account(&mut self, credit_account: Address, to: Address, calls: Vec<MultiCall>) {
        self.last_liquidation.set(LiquidationRecord {
            liquidator: self.env().caller(),
            credit_account,
            to,
            calls,
        });
        let count = self.liquidations.get_or_default();
        self.liquidations.set(count + 1);
    }

    // ========================================================================
    // Credit configurator
    // ========================================================================

    pub fn set_expiration_date(&mut self, expiration_date: u64) {
        self.expiration_date.set(expiration_date);
    }

    pub fn set_max_debt_per_block_multiplier(&mut self, max_debt_per_block_multiplier: u8) {
        self.max_debt_per_block_multiplier.set(max_debt_per_block_multiplier);
    }

    pub fn set_min_debt_limit(&mut self, min_debt: U256) {
        self.min_debt.set(min_debt);
    }

    pub fn set_max_debt_limit(&mut self, max_debt: U256) {
        self.max_debt.set(max_debt);
    }

    pub fn ramp_liquidation_threshold(
        &mut self,
        token: Address,
        lt_final: u32,
        timestamp_ramp_start: u64,
        ramp_duration: u64,
    ) {
        let lt_initial = self.current_lt(token);
        self.lt_params.set(
            &token,
            LtParams {
                lt_initial,
                lt_final,
                timestamp_ramp_start,
                ramp_duration,
            },
        );
    }

    pub fn forbid_adapter(&mut self, adapter: Address) {
        self.forbidden_adapters.set(&adapter, true);
    }

    // ========================================================================
    // Scenario setup
    // ========================================================================

    /// Registers a collateral token and returns its mask
    pub fn add_collateral_token(&mut self, token: Address, liquidation_threshold: u32) -> U256 {
        self.collateral_tokens.push(token);
        self.set_lt(token, liquidation_threshold);
        U256::one() << (self.collateral_tokens.len() - 1)
    }

    pub fn set_fees(&mut self, fees: CreditManagerFees) {
        self.fees.set(fees);
    }

    pub fn set_collateral_debt_data(&mut self, credit_account: Address, data: CollateralDebtData) {
        self.debt_data.set(&credit_account, data);
    }

    pub fn is_adapter_forbidden(&self, adapter: Address) -> bool {
        self.forbidden_adapters.get(&adapter).unwrap_or(false)
    }

    pub fn last_liquidation(&self) -> Option<LiquidationRecord> {
        self.last_liquidation.get()
    }

    pub fn liquidations(&self) -> u32 {
        self.liquidations.get_or_default()
    }

    fn current_lt(&self, token: Address) -> u32 {
        self.lt_params
            .get(&token)
            .map(|params| params.lt_final)
            .unwrap_or_default()
    }

    fn set_lt(&mut self, token: Address, lt: u32) {
        self.lt_params.set(
            &token,
            LtParams {
                lt_initial: lt,
                lt_final: lt,
                timestamp_ramp_start: 0,
                ramp_duration: 0,
            },
        );
    }
}
