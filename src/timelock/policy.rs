//! Policy store - admins, delays and bounds of every parameter change kind
use odra::prelude::*;
use odra::casper_types::U256;
use super::errors::TimelockError;

/// Parameter change kinds governed by the timelock
#[odra::odra_type]
pub enum PolicyId {
    ExpirationDate,
    LpPriceFeedLimiter,
    MaxDebtPerBlockMultiplier,
    MinDebt,
    MaxDebt,
    CreditManagerDebtLimit,
    LiquidationThreshold,
    RampDuration,
    ForbidAdapter,
    TokenLimit,
    TokenQuotaIncreaseFee,
    TotalDebtLimit,
    WithdrawFee,
    MinQuotaRate,
    MaxQuotaRate,
    ForbidBoundsUpdate,
    PriceFeed,
}

impl PolicyId {
    /// Every policy, in registration order
    pub const ALL: [PolicyId; 17] = [
        PolicyId::ExpirationDate,
        PolicyId::LpPriceFeedLimiter,
        PolicyId::MaxDebtPerBlockMultiplier,
        PolicyId::MinDebt,
        PolicyId::MaxDebt,
        PolicyId::CreditManagerDebtLimit,
        PolicyId::LiquidationThreshold,
        PolicyId::RampDuration,
        PolicyId::ForbidAdapter,
        PolicyId::TokenLimit,
        PolicyId::TokenQuotaIncreaseFee,
        PolicyId::TotalDebtLimit,
        PolicyId::WithdrawFee,
        PolicyId::MinQuotaRate,
        PolicyId::MaxQuotaRate,
        PolicyId::ForbidBoundsUpdate,
        PolicyId::PriceFeed,
    ];

    pub fn kind(&self) -> PolicyKind {
        match self {
            PolicyId::ForbidAdapter | PolicyId::ForbidBoundsUpdate | PolicyId::PriceFeed => {
                PolicyKind::AddressSet
            }
            _ => PolicyKind::UintRange,
        }
    }
}

/// How a policy constrains submitted values
#[odra::odra_type]
pub enum PolicyKind {
    /// Value must lie in an inclusive numeric range
    UintRange,
    /// Value must be permitted for a key
    AddressSet,
}

/// Admin and delay bound to a policy
#[odra::odra_type]
pub struct Policy {
    pub admin: Address,
    /// Minimum time between queuing and execution
    pub delay: u64,
}

/// Inclusive numeric bounds, (0, 0) until configured
#[odra::odra_type]
#[derive(Default)]
pub struct UintRange {
    pub min: U256,
    pub max: U256,
}

impl UintRange {
    pub fn new(min: U256, max: U256) -> Result<Self, TimelockError> {
        if min > max {
            return Err(TimelockError::InvalidRange);
        }
        Ok(Self { min, max })
    }

    pub fn contains(&self, value: U256) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Values permitted for one key of an address-set policy
#[odra::odra_type]
pub struct AddressSetEntry {
    pub key: Address,
    pub values: Vec<Address>,
}

/// Snapshot of one policy for off-chain observers
#[odra::odra_type]
pub struct PolicyState {
    pub id: PolicyId,
    pub admin: Address,
    pub delay: u64,
    pub kind: PolicyKind,
    /// Set for range policies
    pub range: Option<UintRange>,
    /// Filled for address-set policies
    pub address_set: Vec<AddressSetEntry>,
}

/// Storage of policies and their bounds
#[odra::module]
pub struct PolicyStore {
    policies: Mapping<PolicyId, Policy>,
    ranges: Mapping<PolicyId, UintRange>,
    /// Keys with at least one permitted value, per policy
    keys: Mapping<PolicyId, Vec<Address>>,
    permitted: Mapping<(PolicyId, Address), Vec<Address>>,
}

#[odra::module]
impl PolicyStore {
    pub fn register(&mut self, id: PolicyId, admin: Address, delay: u64) {
        self.policies.set(&id, Policy { admin, delay });
    }

    pub fn policy(&self, id: PolicyId) -> Policy {
        self.policies
            .get(&id)
            .unwrap_or_revert_with(&self.env(), TimelockError::PolicyNotFound)
    }

    /// Reverts unless `caller` administers the policy
    pub fn require_admin(&self, id: PolicyId, caller: Address) -> Policy {
        let policy = self.policy(id);
        if policy.admin != caller {
            self.env().revert(TimelockError::CallerNotPolicyAdmin);
        }
        policy
    }

    pub fn range(&self, id: PolicyId) -> UintRange {
        self.ranges.get(&id).unwrap_or_default()
    }

    pub fn check_range(&self, id: PolicyId, value: U256) {
        self.require_kind(&id, PolicyKind::UintRange);
        if !self.range(id).contains(value) {
            self.env().revert(TimelockError::ValueOutOfRange);
        }
    }

    pub fn check_address_in_set(&self, id: PolicyId, key: Address, value: Address) {
        self.require_kind(&id, PolicyKind::AddressSet);
        if !self.permitted(id, key).contains(&value) {
            self.env().revert(TimelockError::AddressNotInSet);
        }
    }

    pub fn keys(&self, id: PolicyId) -> Vec<Address> {
        self.keys.get(&id).unwrap_or_default()
    }

    pub fn permitted(&self, id: PolicyId, key: Address) -> Vec<Address> {
        self.permitted.get(&(id, key)).unwrap_or_default()
    }

    /// Returns false when nothing changed
    pub fn set_admin(&mut self, id: PolicyId, admin: Address) -> bool {
        let mut policy = self.policy(id.clone());
        if policy.admin == admin {
            return false;
        }
        policy.admin = admin;
        self.policies.set(&id, policy);
        true
    }

    pub fn set_delay(&mut self, id: PolicyId, delay: u64) -> bool {
        let mut policy = self.policy(id.clone());
        if policy.delay == delay {
            return false;
        }
        policy.delay = delay;
        self.policies.set(&id, policy);
        true
    }

    pub fn set_range(&mut self, id: PolicyId, min: U256, max: U256) -> bool {
        self.policy(id.clone());
        self.require_kind(&id, PolicyKind::UintRange);
        let range = match UintRange::new(min, max) {
            Ok(range) => range,
            Err(error) => self.env().revert(error),
        };
        if self.range(id.clone()) == range {
            return false;
        }
        self.ranges.set(&id, range);
        true
    }

    pub fn add_address(&mut self, id: PolicyId, key: Address, value: Address) -> bool {
        self.policy(id.clone());
        self.require_kind(&id, PolicyKind::AddressSet);

        let mut values = self.permitted(id.clone(), key);
        if values.contains(&value) {
            return false;
        }
        if values.is_empty() {
            let mut keys = self.keys(id.clone());
            keys.push(key);
            self.keys.set(&id, keys);
        }
        values.push(value);
        self.permitted.set(&(id, key), values);
        true
    }

    /// Dropping the last value of a key also drops the key
    pub fn remove_address(&mut self, id: PolicyId, key: Address, value: Address) -> bool {
        self.policy(id.clone());
        self.require_kind(&id, PolicyKind::AddressSet);

        let mut values = self.permitted(id.clone(), key);
        let Some(index) = values.iter().position(|v| *v == value) else {
            return false;
        };
        values.swap_remove(index);
        if values.is_empty() {
            let mut keys = self.keys(id.clone());
            keys.retain(|k| *k != key);
            self.keys.set(&id, keys);
        }
        self.permitted.set(&(id, key), values);
        true
    }

    /// Full snapshot of every registered policy
    pub fn state(&self) -> Vec<PolicyState> {
        PolicyId::ALL
            .iter()
            .filter_map(|id| {
                let policy = self.policies.get(id)?;
                let kind = id.kind();
                let (range, address_set) = match kind {
                    PolicyKind::UintRange => (Some(self.range(id.clone())), Vec::new()),
                    PolicyKind::AddressSet => {
                        let entries = self
                            .keys(id.clone())
                            .into_iter()
                            .map(|key| AddressSetEntry {
                                key,
                                values: self.permitted(id.clone(), key),
                            })
                            .collect();
                        (None, entries)
                    }
                };
                Some(PolicyState {
                    id: id.clone(),
                    admin: policy.admin,
                    delay: policy.delay,
                    kind,
                    range,
                    address_set,
                })
            })
            .collect()
    }

    fn require_kind(&self, id: &PolicyId, kind: PolicyKind) {
        if id.kind() != kind {
            self.env().revert(TimelockError::PolicyKindMismatch);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use odra::host::{Deployer, HostEnv, NoArgs};

    fn setup() -> (HostEnv, PolicyStoreHostRef) {
        let env = odra_test::env();
        let mut store = PolicyStore::deploy(&env, NoArgs);
        for id in PolicyId::ALL.iter() {
            store.register(id.clone(), env.get_account(0), 1_000);
        }
        (env, store)
    }

    #[test]
    fn test_policy_kinds() {
        let address_sets = PolicyId::ALL
            .iter()
            .filter(|id| id.kind() == PolicyKind::AddressSet)
            .count();
        assert_eq!(address_sets, 3);
        assert_eq!(PolicyId::PriceFeed.kind(), PolicyKind::AddressSet);
        assert_eq!(PolicyId::RampDuration.kind(), PolicyKind::UintRange);
    }

    #[test]
    fn test_range_bounds_inclusive() {
        let range = UintRange::new(U256::from(10u64), U256::from(20u64)).unwrap();
        assert!(range.contains(U256::from(10u64)));
        assert!(range.contains(U256::from(20u64)));
        assert!(!range.contains(U256::from(21u64)));
        assert!(!UintRange::default().contains(U256::one()));
        assert!(UintRange::new(U256::from(2u64), U256::one()).is_err());
    }

    #[test]
    fn test_unconfigured_range_rejects() {
        let (_, store) = setup();
        assert_eq!(
            store.try_check_range(PolicyId::MinDebt, U256::from(5u64)),
            Err(TimelockError::ValueOutOfRange.into())
        );
    }

    #[test]
    fn test_unregistered_policy() {
        let env = odra_test::env();
        let store = PolicyStore::deploy(&env, NoArgs);
        assert_eq!(
            store.try_require_admin(PolicyId::MinDebt, env.get_account(0)),
            Err(TimelockError::PolicyNotFound.into())
        );
    }

    #[test]
    fn test_range_on_address_set_policy() {
        let (_, mut store) = setup();
        assert_eq!(
            store.try_set_range(PolicyId::PriceFeed, U256::zero(), U256::one()),
            Err(TimelockError::PolicyKindMismatch.into())
        );
        assert_eq!(
            store.try_set_range(PolicyId::MinDebt, U256::from(2u64), U256::one()),
            Err(TimelockError::InvalidRange.into())
        );
    }

    #[test]
    fn test_address_set_add_remove_keys() {
        let (env, mut store) = setup();
        let token = env.get_account(1);
        let (feed_a, feed_b) = (env.get_account(2), env.get_account(3));

        assert!(store.add_address(PolicyId::PriceFeed, token, feed_a));
        assert!(!store.add_address(PolicyId::PriceFeed, token, feed_a));
        assert!(store.add_address(PolicyId::PriceFeed, token, feed_b));
        assert_eq!(store.keys(PolicyId::PriceFeed), vec![token]);
        store.check_address_in_set(PolicyId::PriceFeed, token, feed_b);

        assert!(store.remove_address(PolicyId::PriceFeed, token, feed_a));
        assert_eq!(store.keys(PolicyId::PriceFeed), vec![token]);
        assert!(store.remove_address(PolicyId::PriceFeed, token, feed_b));
        assert!(store.keys(PolicyId::PriceFeed).is_empty());
        assert_eq!(
            store.try_check_address_in_set(PolicyId::PriceFeed, token, feed_b),
            Err(TimelockError::AddressNotInSet.into())
        );
    }

    #[test]
    fn test_state_snapshot() {
        let (env, mut store) = setup();
        store.set_range(PolicyId::WithdrawFee, U256::zero(), U256::from(100u64));
        store.add_address(PolicyId::ForbidAdapter, env.get_account(4), env.get_account(5));

        let state = store.state();
        assert_eq!(state.len(), 17);
        let fee = state.iter().find(|s| s.id == PolicyId::WithdrawFee).unwrap();
        assert_eq!(fee.range, Some(UintRange { min: U256::zero(), max: U256::from(100u64) }));
        let forbid = state.iter().find(|s| s.id == PolicyId::ForbidAdapter).unwrap();
        assert_eq!(forbid.range, None);
        assert_eq!(forbid.address_set[0].values, vec![env.get_account(5)]);
    }
}
