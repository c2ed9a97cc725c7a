//! Whitelist and price alias registry
use odra::prelude::*;
use crate::collections::AddressSet;

/// Token valued at another token's price in the aliased solvency check
#[odra::odra_type]
pub struct TokenAlias {
    pub token: Address,
    pub alias: Address,
}

/// Trusted liquidators and token aliases, both enumerable
#[odra::module]
pub struct LiquidatorRegistry {
    whitelist: SubModule<AddressSet>,
    /// Tokens with an alias
    aliased_tokens: SubModule<AddressSet>,
    /// Only meaningful for members of `aliased_tokens`
    aliases: Mapping<Address, Address>,
}

#[odra::module]
impl LiquidatorRegistry {
    pub fn is_whitelisted(&self, account: Address) -> bool {
        self.whitelist.contains(account)
    }

    pub fn whitelisted(&self) -> Vec<Address> {
        self.whitelist.values()
    }

    /// Returns false when the status is unchanged
    pub fn set_whitelisted(&mut self, account: Address, whitelisted: bool) -> bool {
        if whitelisted {
            self.whitelist.add(account)
        } else {
            self.whitelist.remove(account)
        }
    }

    pub fn alias_of(&self, token: Address) -> Option<Address> {
        if self.aliased_tokens.contains(token) {
            self.aliases.get(&token)
        } else {
            None
        }
    }

    pub fn aliases(&self) -> Vec<TokenAlias> {
        self.aliased_tokens
            .values()
            .into_iter()
            .filter_map(|token| {
                self.aliases
                    .get(&token)
                    .map(|alias| TokenAlias { token, alias })
            })
            .collect()
    }

    /// Returns false when the alias is unchanged
    pub fn set_alias(&mut self, token: Address, alias: Option<Address>) -> bool {
        if self.alias_of(token) == alias {
            return false;
        }
        match alias {
            Some(alias) => {
                self.aliases.set(&token, alias);
                self.aliased_tokens.add(token);
            }
            None => {
                self.aliased_tokens.remove(token);
            }
        }
        true
    }
}
