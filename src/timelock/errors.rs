//! Error types for the controller timelock
use odra::prelude::*;

/// Errors raised by the policy store and the transaction queue
#[odra::odra_error]
pub enum TimelockError {
    // Authorization
    /// Caller is not the admin of the policy
    CallerNotPolicyAdmin = 300,
    /// Caller is neither the initiator nor a registered executor
    CallerNotExecutor = 301,
    /// Caller is not the veto admin
    CallerNotVetoAdmin = 302,

    // Policy
    /// Policy has no admin
    PolicyNotFound = 303,
    /// Value lies outside the policy range
    ValueOutOfRange = 304,
    /// Value is not permitted for the key
    AddressNotInSet = 305,
    /// Range with min above max
    InvalidRange = 306,
    /// Operation does not apply to this kind of policy
    PolicyKindMismatch = 307,

    // Timing
    /// Transaction is not yet executable or its grace period has passed
    OutsideExecutionWindow = 308,

    // Consistency
    /// Parameter moved since the transaction was queued
    StaleParameterChanged = 309,

    // Queue state
    /// No pending transaction with this hash
    TransactionNotQueued = 310,
    /// Identical transaction is still pending
    TransactionAlreadyQueued = 311,

    // Execution
    /// Queued call could not be executed
    ExecutionReverted = 312,
    /// Target state does not allow the change
    ParameterChecksFailed = 313,
    /// Call arguments could not be serialized
    EncodingFailed = 314,

    // Configuration
    /// Access control contract was never set
    AclNotSet = 315,
}
