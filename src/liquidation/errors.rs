//! Error types for the liquidation gatekeeper
use odra::prelude::*;

#[odra::odra_error]
pub enum LiquidationError {
    /// Liquidations are paused
    Paused = 400,
    /// Caller is not a whitelisted liquidator and public mode is off
    CallerNotWhitelisted = 401,
    /// Bundle withdraws collateral to someone other than the gatekeeper
    WithdrawalToExternalAddress = 402,
    /// Bad debt liquidation without waiver or aliased insolvency
    PolicyViolatingLiquidation = 403,
    /// Bundle sub-call arguments cannot be decoded
    MalformedMultiCall = 404,
    /// Token transfer returned false
    TransferFailed = 405,
    /// Token approval returned false
    ApprovalFailed = 406,
    /// Access control contract was never set
    AclNotSet = 407,
}
