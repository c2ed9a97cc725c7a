//! Liquidation Gatekeeper - policy-checked emergency liquidations
//!
//! Whitelisted liquidators (or anyone, during a public window) liquidate
//! credit accounts through the gatekeeper. Bad debt liquidations are only
//! let through under a waiver or when aliased prices confirm insolvency.

pub mod gatekeeper;
pub mod registry;
pub mod solvency;
pub mod errors;
pub mod events;


pub use gatekeeper::LiquidationGatekeeper;
pub use registry::{LiquidatorRegistry, TokenAlias};
pub use errors::LiquidationError;
pub use events::*;
