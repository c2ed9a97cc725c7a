//! Access Control - Role registry shared by the governance contracts
//!
//! A single configurator owns the registry and grants the operational roles.
//! Consumers never read role state directly: they hold the registry address
//! and resolve an [`Authority`] for the caller of every entry point.

use odra::prelude::*;
use odra::ContractRef;

/// Operational roles managed by the registry
#[odra::odra_type]
pub enum Role {
    /// Fully trusted root role, owns the registry
    Configurator,
    /// Opens temporary relaxation windows
    Controller,
    /// May pause guarded contracts
    PausableAdmin,
    /// May unpause guarded contracts
    UnpausableAdmin,
}

/// Authorization failures
#[odra::odra_error]
pub enum AccessError {
    /// Caller is not the configurator
    CallerNotConfigurator = 100,
    /// Caller does not hold the controller role
    CallerNotController = 101,
    /// Caller may not pause
    CallerNotPausableAdmin = 102,
    /// Caller may not unpause
    CallerNotUnpausableAdmin = 103,
    /// The configurator role is transferred, never granted
    CannotGrantConfigurator = 104,
}

/// Event emitted when a role is granted
#[odra::event]
pub struct RoleGranted {
    pub role: Role,
    pub account: Address,
    pub granted_by: Address,
}

/// Event emitted when a role is revoked
#[odra::event]
pub struct RoleRevoked {
    pub role: Role,
    pub account: Address,
    pub revoked_by: Address,
}

/// Event emitted when the configurator role changes hands
#[odra::event]
pub struct ConfiguratorTransferred {
    pub previous: Address,
    pub configurator: Address,
}

/// Access Control contract
#[odra::module]
pub struct AccessControl {
    /// Current configurator
    configurator: Var<Address>,
    /// Role membership: (role, account) -> member
    members: Mapping<(Role, Address), bool>,
}

#[odra::module]
impl AccessControl {
    /// Initialize the registry, the deployer becomes the configurator
    pub fn init(&mut self) {
        let caller = self.env().caller();
        self.configurator.set(caller);
    }

    pub fn configurator(&self) -> Address {
        self.configurator.get_or_revert_with(AccessError::CallerNotConfigurator)
    }

    pub fn has_role(&self, role: Role, account: Address) -> bool {
        match role {
            Role::Configurator => self.is_configurator(account),
            _ => self.members.get(&(role, account)).unwrap_or(false),
        }
    }

    pub fn is_configurator(&self, account: Address) -> bool {
        self.configurator.get() == Some(account)
    }

    pub fn is_controller(&self, account: Address) -> bool {
        self.members.get(&(Role::Controller, account)).unwrap_or(false)
    }

    pub fn is_pausable_admin(&self, account: Address) -> bool {
        self.members.get(&(Role::PausableAdmin, account)).unwrap_or(false)
    }

    pub fn is_unpausable_admin(&self, account: Address) -> bool {
        self.members.get(&(Role::UnpausableAdmin, account)).unwrap_or(false)
    }

    /// Grant an operational role (configurator only, no-op if already held)
    pub fn grant_role(&mut self, role: Role, account: Address) {
        let caller = self.only_configurator();
        if role == Role::Configurator {
            self.env().revert(AccessError::CannotGrantConfigurator);
        }
        if self.has_role(role.clone(), account) {
            return;
        }
        self.members.set(&(role.clone(), account), true);
        self.env().emit_event(RoleGranted {
            role,
            account,
            granted_by: caller,
        });
    }

    /// Revoke an operational role (configurator only, no-op if not held)
    pub fn revoke_role(&mut self, role: Role, account: Address) {
        let caller = self.only_configurator();
        if role == Role::Configurator {
            self.env().revert(AccessError::CannotGrantConfigurator);
        }
        if !self.has_role(role.clone(), account) {
            return;
        }
        self.members.set(&(role.clone(), account), false);
        self.env().emit_event(RoleRevoked {
            role,
            account,
            revoked_by: caller,
        });
    }

    /// Hand the configurator role to another account
    pub fn transfer_configurator(&mut self, new_configurator: Address) {
        let previous = self.only_configurator();
        if previous == new_configurator {
            return;
        }
        self.configurator.set(new_configurator);
        self.env().emit_event(ConfiguratorTransferred {
            previous,
            configurator: new_configurator,
        });
    }

    fn only_configurator(&self) -> Address {
        let caller = self.env().caller();
        if !self.is_configurator(caller) {
            self.env().revert(AccessError::CallerNotConfigurator);
        }
        caller
    }
}

/// Role queries consumed by guarded contracts
#[odra::external_contract]
pub trait AccessControlList {
    fn is_configurator(&self, account: Address) -> bool;
    fn is_controller(&self, account: Address) -> bool;
    fn is_pausable_admin(&self, account: Address) -> bool;
    fn is_unpausable_admin(&self, account: Address) -> bool;
}

/// Caller of the current entry point, resolved against the role registry
pub struct Authority {
    caller: Address,
    acl: AccessControlListContractRef,
}

impl Authority {
    pub fn new(caller: Address, acl: AccessControlListContractRef) -> Self {
        Self { caller, acl }
    }

    pub fn caller(&self) -> Address {
        self.caller
    }

    pub fn is_configurator(&self) -> bool {
        self.acl.is_configurator(self.caller)
    }

    pub fn is_controller(&self) -> bool {
        self.acl.is_controller(self.caller)
    }

    /// Configurator implicitly holds both pause roles
    pub fn can_pause(&self) -> bool {
        self.acl.is_pausable_admin(self.caller) || self.is_configurator()
    }

    pub fn can_unpause(&self) -> bool {
        self.acl.is_unpausable_admin(self.caller) || self.is_configurator()
    }

    /// First failing requirement, if any
    pub fn require_configurator(&self) -> Result<Address, AccessError> {
        if self.is_configurator() {
            Ok(self.caller)
        } else {
            Err(AccessError::CallerNotConfigurator)
        }
    }

    pub fn require_controller(&self) -> Result<Address, AccessError> {
        if self.is_controller() {
            Ok(self.caller)
        } else {
            Err(AccessError::CallerNotController)
        }
    }
}
