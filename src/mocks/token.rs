//! CEP-18 test token with open minting
use odra::prelude::*;
use odra::casper_types::U256;
use super::MockError;

/// Event emitted on transfers, mints and burns
#[odra::event]
pub struct Transfer {
    pub from: Option<Address>,
    pub to: Option<Address>,
    pub value: U256,
}

/// Event emitted on approvals
#[odra::event]
pub struct Approval {
    pub owner: Address,
    pub spender: Address,
    pub value: U256,
}

#[odra::module]
pub struct TestToken {
    symbol: Var<String>,
    decimals: Var<u8>,
    total_supply: Var<U256>,
    balances: Mapping<Address, U256>,
    /// (owner, spender) -> amount
    allowances: Mapping<(Address, Address), U256>,
    /// Transfers and approvals report failure without moving anything
    failing: Var<bool>,
}

#[odra::module]
impl TestToken {
    pub fn init(&mut self, symbol: String, decimals: u8) {
        self.symbol.set(symbol);
        self.decimals.set(decimals);
        self.total_supply.set(U256::zero());
    }

    pub fn symbol(&self) -> String {
        self.symbol.get_or_default()
    }

    pub fn decimals(&self) -> u8 {
        self.decimals.get_or_default()
    }

    pub fn total_supply(&self) -> U256 {
        self.total_supply.get_or_default()
    }

    pub fn balance_of(&self, owner: Address) -> U256 {
        self.balances.get(&owner).unwrap_or_default()
    }

    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances.get(&(owner, spender)).unwrap_or_default()
    }

    pub fn transfer(&mut self, to: Address, amount: U256) -> bool {
        if self.failing.get_or_default() {
            return false;
        }
        let caller = self.env().caller();
        self.transfer_internal(caller, to, amount);
        true
    }

    pub fn approve(&mut self, spender: Address, amount: U256) -> bool {
        if self.failing.get_or_default() {
            return false;
        }
        let owner = self.env().caller();
        self.allowances.set(&(owner, spender), amount);
        self.env().emit_event(Approval {
            owner,
            spender,
            value: amount,
        });
        true
    }

    pub fn transfer_from(&mut self, from: Address, to: Address, amount: U256) -> bool {
        let spender = self.env().caller();
        let allowance = self.allowance(from, spender);
        if allowance < amount {
            self.env().revert(MockError::InsufficientAllowance);
        }
        self.allowances.set(&(from, spender), allowance - amount);
        self.transfer_internal(from, to, amount);
        true
    }

    /// Anyone may mint
    pub fn mint(&mut self, to: Address, amount: U256) {
        let supply = self.total_supply();
        self.total_supply.set(supply + amount);
        let balance = self.balance_of(to);
        self.balances.set(&to, balance + amount);
        self.env().emit_event(Transfer {
            from: None,
            to: Some(to),
            value: amount,
        });
    }

    pub fn set_failing(&mut self, failing: bool) {
        self.failing.set(failing);
    }

    fn transfer_internal(&mut self, from: Address, to: Address, amount: U256) {
        let balance = self.balance_of(from);
        if balance < amount {
            self.env().revert(MockError::InsufficientBalance);
        }
        self.balances.set(&from, balance - amount);
        let to_balance = self.balance_of(to);
        self.balances.set(&to, to_balance + amount);
        self.env().emit_event(Transfer {
            from: Some(from),
            to: Some(to),
            value: amount,
        });
    }
}
