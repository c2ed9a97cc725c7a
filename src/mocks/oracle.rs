//! Price oracle and LP price feed mocks
//!
//! Prices are USD per whole token, scaled by 1e8.
use odra::prelude::*;
use odra::casper_types::U256;
use crate::interfaces::{PriceFeedParams, PriceUpdate};
use crate::timelock::controller::ControllerTimelockContractRef;
use super::MockError;

/// Stored price of a token
#[odra::odra_type]
pub struct TokenPrice {
    pub price: U256,
    pub decimals: u8,
}

#[odra::module]
pub struct MockPriceOracle {
    prices: Mapping<Address, TokenPrice>,
    feeds: Mapping<Address, PriceFeedParams>,
    /// Payload of the last bulk update
    last_updates: Var<Vec<PriceUpdate>>,
    update_calls: Var<u32>,
}

#[odra::module]
impl MockPriceOracle {
    pub fn set_price(&mut self, token: Address, price: U256, decimals: u8) {
        self.prices.set(&token, TokenPrice { price, decimals });
    }

    /// amount * price / 10^decimals
    pub fn convert_to_usd(&self, amount: U256, token: Address) -> U256 {
        let feed = self
            .prices
            .get(&token)
            .unwrap_or_revert_with(&self.env(), MockError::NotConfigured);
        let unit = U256::from(10u64).pow(U256::from(feed.decimals));
        amount * feed.price / unit
    }

    pub fn update_prices(&mut self, updates: Vec<PriceUpdate>) {
        self.last_updates.set(updates);
        let calls = self.update_calls.get_or_default();
        self.update_calls.set(calls + 1);
    }

    pub fn last_updates(&self) -> Vec<PriceUpdate> {
        self.last_updates.get_or_default()
    }

    pub fn update_calls(&self) -> u32 {
        self.update_calls.get_or_default()
    }

    pub fn price_feed_params(&self, token: Address) -> PriceFeedParams {
        self.feeds
            .get(&token)
            .unwrap_or_revert_with(&self.env(), MockError::NotConfigured)
    }

    pub fn set_price_feed(&mut self, token: Address, price_feed: Address, staleness_period: u32) {
        let token_decimals = self.prices.get(&token).map(|p| p.decimals).unwrap_or_default();
        self.feeds.set(
            &token,
            PriceFeedParams {
                price_feed,
                staleness_period,
                skip_check: false,
                token_decimals,
            },
        );
    }
}

#[odra::module]
pub struct MockLpPriceFeed {
    lower_bound: Var<U256>,
    bounds_update_forbidden: Var<bool>,
}

#[odra::module]
impl MockLpPriceFeed {
    pub fn init(&mut self, lower_bound: U256) {
        self.lower_bound.set(lower_bound);
    }

    pub fn lower_bound(&self) -> U256 {
        self.lower_bound.get_or_default()
    }

    pub fn update_bounds_allowed(&self) -> bool {
        !self.bounds_update_forbidden.get_or_default()
    }

    pub fn set_limiter(&mut self, lower_bound: U256) {
        if self.bounds_update_forbidden.get_or_default() {
            self.env().revert(MockError::BoundsUpdateForbidden);
        }
        self.lower_bound.set(lower_bound);
    }

    pub fn forbid_bounds_update(&mut self) {
        self.bounds_update_forbidden.set(true);
    }
}

/// LP feed whose limiter setter calls back into the timelock
#[odra::module]
pub struct ReentrantLpPriceFeed {
    lower_bound: Var<U256>,
    timelock: Var<Address>,
    tx_hash: Var<[u8; 32]>,
}

#[odra::module]
impl ReentrantLpPriceFeed {
    pub fn lower_bound(&self) -> U256 {
        self.lower_bound.get_or_default()
    }

    pub fn update_bounds_allowed(&self) -> bool {
        true
    }

    /// Transaction to execute again from inside `set_limiter`
    pub fn arm(&mut self, timelock: Address, tx_hash: [u8; 32]) {
        self.timelock.set(timelock);
        self.tx_hash.set(tx_hash);
    }

    pub fn set_limiter(&mut self, lower_bound: U256) {
        if let (Some(timelock), Some(tx_hash)) = (self.timelock.get(), self.tx_hash.get()) {
            ControllerTimelockContractRef::new(self.env(), timelock).execute_transaction(tx_hash);
        }
        self.lower_bound.set(lower_bound);
    }
}
