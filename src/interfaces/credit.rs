//! Credit manager and credit facade interfaces
use odra::prelude::*;
use odra::casper_types::bytesrepr::{self, FromBytes, ToBytes};
use odra::casper_types::{CLTyped, RuntimeArgs, U256};

/// Facade entry point that moves collateral out of a credit account
pub const WITHDRAW_COLLATERAL: &str = "withdraw_collateral";

/// Facade entry point that pushes signed prices into on-demand feeds
pub const ON_DEMAND_PRICE_UPDATES: &str = "on_demand_price_updates";

/// Single call inside a facade multicall bundle
#[odra::odra_type]
pub struct MultiCall {
    /// Contract the call is routed to
    pub target: Address,
    /// Entry point name
    pub entry_point: String,
    /// Serialized named arguments
    pub args: Vec<u8>,
}

impl MultiCall {
    pub fn encode(
        target: Address,
        entry_point: &str,
        args: &RuntimeArgs,
    ) -> Result<Self, bytesrepr::Error> {
        Ok(Self {
            target,
            entry_point: String::from(entry_point),
            args: args.to_bytes()?,
        })
    }

    pub fn decode_args(&self) -> Result<RuntimeArgs, bytesrepr::Error> {
        bytesrepr::deserialize(self.args.clone())
    }

    /// Named argument of the call, None if absent or undecodable
    pub fn arg<T: CLTyped + FromBytes>(&self, name: &str) -> Option<T> {
        let args = self.decode_args().ok()?;
        args.get(name)?.clone().into_t::<T>().ok()
    }

    pub fn is_call_to(&self, target: Address, entry_point: &str) -> bool {
        self.target == target && self.entry_point == entry_point
    }
}

/// What `calc_debt_and_collateral` has to compute
#[odra::odra_type]
pub enum CollateralCalcTask {
    GenericParams,
    DebtOnly,
    DebtCollateral,
    FullCollateralCheckLazy,
}

/// Debt and collateral figures of a credit account
#[odra::odra_type]
pub struct CollateralDebtData {
    /// Principal
    pub debt: U256,
    /// Base and quota interest accrued since the last update
    pub accrued_interest: U256,
    /// Protocol fees on the accrued interest
    pub accrued_fees: U256,
    /// Debt plus interest plus fees, in USD
    pub total_debt_usd: U256,
    /// Collateral value in underlying
    pub total_value: U256,
    /// Collateral value in USD
    pub total_value_usd: U256,
    /// Collateral value weighted by liquidation thresholds, in USD
    pub twv_usd: U256,
    /// Collateral tokens enabled on the account
    pub enabled_tokens_mask: U256,
    /// Enabled tokens whose value is capped by the account's quota
    pub quoted_tokens_mask: U256,
}

/// Fee parameters of a credit manager, in basis points
#[odra::odra_type]
pub struct CreditManagerFees {
    pub fee_interest: u32,
    pub fee_liquidation: u32,
    /// Share of collateral value a liquidator pays back (100% minus premium)
    pub liquidation_discount: u32,
    pub fee_liquidation_expired: u32,
    pub liquidation_discount_expired: u32,
}

/// Liquidation threshold of a collateral token and its ramp
#[odra::odra_type]
pub struct LtParams {
    pub lt_initial: u32,
    pub lt_final: u32,
    pub timestamp_ramp_start: u64,
    pub ramp_duration: u64,
}

/// Credit manager: owns credit accounts and their collateral accounting
#[odra::external_contract]
pub trait CreditManager {
    fn underlying(&self) -> Address;
    fn pool(&self) -> Address;
    fn credit_facade(&self) -> Address;
    fn credit_configurator(&self) -> Address;
    fn price_oracle(&self) -> Address;
    fn fees(&self) -> CreditManagerFees;
    fn calc_debt_and_collateral(
        &self,
        credit_account: Address,
        task: CollateralCalcTask,
    ) -> CollateralDebtData;
    /// Token and current liquidation threshold for a single-bit mask
    fn collateral_token_by_mask(&self, token_mask: U256) -> (Address, u32);
    fn lt_params(&self, token: Address) -> LtParams;
}

/// Credit facade: user-facing entry of a credit manager
#[odra::external_contract]
pub trait CreditFacade {
    fn expiration_date(&self) -> u64;
    fn max_debt_per_block_multiplier(&self) -> u8;
    /// (min_debt, max_debt)
    fn debt_limits(&self) -> (U256, U256);
    fn liquidate_credit_account(
        &mut self,
        credit_account: Address,
        to: Address,
        calls: Vec<MultiCall>,
    );
}
