//! Interfaces of the external protocol contracts this crate governs
//!
//! The credit system, pools, quota keepers, gauges, price oracles and tokens
//! are owned by other deployments. Only the entry points called from here are
//! declared.

pub mod credit;
pub mod oracle;
pub mod pool;
pub mod token;

pub use credit::*;
pub use oracle::*;
pub use pool::*;
pub use token::*;
