//! Controller Timelock - delayed, policy-gated configuration changes
//!
//! Semi-trusted operators queue parameter changes against credit managers,
//! pools, quota keepers, gauges and price oracles. Every change is bounded by
//! a policy, delayed by the policy delay and checked for drift before it is
//! applied.

pub mod controller;
pub mod policy;
pub mod queue;
pub mod sanity;
pub mod errors;
pub mod events;


pub use controller::ControllerTimelock;
pub use policy::{AddressSetEntry, Policy, PolicyId, PolicyKind, PolicyState, PolicyStore, UintRange};
pub use queue::{QueuedTransaction, TransactionQueue, GRACE_PERIOD};
pub use sanity::{SanityCheck, SanityProbe};
pub use errors::TimelockError;
pub use events::*;
