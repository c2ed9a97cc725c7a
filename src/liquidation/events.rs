//! Events for the liquidation gatekeeper
use odra::prelude::*;
use odra::casper_types::U256;

#[odra::event]
pub struct SetWhitelistedStatus {
    pub account: Address,
    pub whitelisted: bool,
}

/// Event emitted when a token alias is set or cleared
#[odra::event]
pub struct SetAlias {
    pub token: Address,
    pub alias: Option<Address>,
}

#[odra::event]
pub struct AllowTemporaryPublicLiquidations {
    /// Deadline of the public window
    pub until: u64,
}

#[odra::event]
pub struct AllowTemporaryPolicyWaive {
    /// Deadline of the waiver window
    pub until: u64,
}

/// Event emitted when a liquidation is forwarded to the credit facade
#[odra::event]
pub struct LiquidationExecuted {
    pub credit_manager: Address,
    pub credit_account: Address,
    pub liquidator: Address,
    pub bad_debt: bool,
    pub with_approval: bool,
}

#[odra::event]
pub struct GatekeeperPaused {
    pub account: Address,
}

#[odra::event]
pub struct GatekeeperUnpaused {
    pub account: Address,
}

#[odra::event]
pub struct FundsWithdrawn {
    pub token: Address,
    pub amount: U256,
    pub to: Address,
}
