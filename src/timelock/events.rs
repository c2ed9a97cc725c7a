//! Events for the controller timelock
use odra::prelude::*;
use odra::casper_types::U256;
use super::policy::PolicyId;

// ============================================================================
// Queue Events
// ============================================================================

/// Event emitted when a parameter change is queued
#[odra::event]
pub struct QueueTransaction {
    pub tx_hash: [u8; 32],
    pub initiator: Address,
    pub target: Address,
    pub signature: String,
    pub data: Vec<u8>,
    /// Earliest execution time
    pub eta: u64,
}

/// Event emitted when a queued change is applied
#[odra::event]
pub struct ExecuteTransaction {
    pub tx_hash: [u8; 32],
    pub executed_by: Address,
}

/// Event emitted when a queued change is vetoed
#[odra::event]
pub struct CancelTransaction {
    pub tx_hash: [u8; 32],
}

// ============================================================================
// Admin Events
// ============================================================================

#[odra::event]
pub struct SetVetoAdmin {
    pub veto_admin: Address,
}

#[odra::event]
pub struct AddExecutor {
    pub executor: Address,
}

#[odra::event]
pub struct RemoveExecutor {
    pub executor: Address,
}

#[odra::event]
pub struct SetPolicyAdmin {
    pub policy: PolicyId,
    pub admin: Address,
}

#[odra::event]
pub struct SetPolicyDelay {
    pub policy: PolicyId,
    pub delay: u64,
}

#[odra::event]
pub struct SetPolicyRange {
    pub policy: PolicyId,
    pub min: U256,
    pub max: U256,
}

#[odra::event]
pub struct AddAddressToSet {
    pub policy: PolicyId,
    pub key: Address,
    pub value: Address,
}

#[odra::event]
pub struct RemoveAddressFromSet {
    pub policy: PolicyId,
    pub key: Address,
    pub value: Address,
}
