//! Reference deployments of the external protocol contracts
//!
//! Minimal, storage-backed stand-ins for the credit system, pools, oracles and
//! tokens. They expose the same entry points the governance contracts consume
//! plus setters to drive test scenarios.

pub mod credit;
pub mod oracle;
pub mod pool;
pub mod token;

pub use credit::MockCreditSuite;
pub use oracle::{MockLpPriceFeed, MockPriceOracle, ReentrantLpPriceFeed};
pub use pool::MockPoolSuite;
pub use token::TestToken;

/// Errors raised by the mocks
#[odra::odra_error]
pub enum MockError {
    InsufficientBalance = 900,
    InsufficientAllowance = 901,
    /// Queried a value that was never configured
    NotConfigured = 902,
    /// Bounds updates were forbidden on the feed
    BoundsUpdateForbidden = 903,
}
