//! Price oracle and LP price feed interfaces
use odra::prelude::*;
use odra::casper_types::U256;

/// Signed price payload for an on-demand feed
#[odra::odra_type]
pub struct PriceUpdate {
    pub token: Address,
    /// Whether the update targets the reserve feed
    pub reserve: bool,
    pub data: Vec<u8>,
}

/// Price feed configuration of a token
#[odra::odra_type]
pub struct PriceFeedParams {
    pub price_feed: Address,
    pub staleness_period: u32,
    pub skip_check: bool,
    pub token_decimals: u8,
}

#[odra::external_contract]
pub trait PriceOracle {
    /// USD value of `amount` of `token`
    fn convert_to_usd(&self, amount: U256, token: Address) -> U256;
    fn update_prices(&mut self, updates: Vec<PriceUpdate>);
    fn price_feed_params(&self, token: Address) -> PriceFeedParams;
}

/// Bounded LP price feed
#[odra::external_contract]
pub trait LpPriceFeed {
    fn lower_bound(&self) -> U256;
    fn update_bounds_allowed(&self) -> bool;
}
