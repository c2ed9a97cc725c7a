#![cfg_attr(not(test), no_std)]
#![cfg_attr(not(test), no_main)]
extern crate alloc;

// Shared building blocks
pub mod acl;
pub mod collections;
pub mod math;

// Interfaces of the governed protocol contracts
pub mod interfaces;

// Controller timelock
pub mod timelock;

// Liquidation gatekeeper
pub mod liquidation;

// Reference deployments of external contracts
#[cfg(test)]
pub mod mocks;
