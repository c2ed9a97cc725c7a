//! Enumerable storage collections
use odra::prelude::*;
use odra::List;

/// Set of addresses that can be enumerated, with O(1) membership checks.
///
/// Members are kept densely packed in a list; removal swaps the last member
/// into the freed slot.
#[odra::module]
pub struct AddressSet {
    /// Packed members
    members: List<Address>,
    /// member -> 1-based position in `members` (0 = absent)
    positions: Mapping<Address, u32>,
}

#[odra::module]
impl AddressSet {
    pub fn contains(&self, account: Address) -> bool {
        self.positions.get(&account).unwrap_or_default() != 0
    }

    pub fn len(&self) -> u32 {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.len() == 0
    }

    /// Returns false if the address was already a member
    pub fn add(&mut self, account: Address) -> bool {
        if self.contains(account) {
            return false;
        }
        self.members.push(account);
        self.positions.set(&account, self.members.len());
        true
    }

    /// Returns false if the address was not a member
    pub fn remove(&mut self, account: Address) -> bool {
        let position = self.positions.get(&account).unwrap_or_default();
        if position == 0 {
            return false;
        }

        let last_index = self.members.len() - 1;
        let index = position - 1;
        if index != last_index {
            if let Some(last) = self.members.get(last_index) {
                self.members.replace(index, last);
                self.positions.set(&last, position);
            }
        }
        self.members.pop();
        self.positions.set(&account, 0);
        true
    }

    pub fn values(&self) -> Vec<Address> {
        self.members.iter().collect()
    }
}
