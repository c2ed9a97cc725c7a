//! Controller Timelock - policy-gated, delayed parameter changes
//!
//! Operators do not call managed contracts directly. Each change is submitted
//! through a dedicated entry point that checks the caller against the policy
//! admin and the value against the policy bounds, then queues the call. Once
//! the policy delay has passed, the initiator or an executor applies it.
use odra::prelude::*;
use odra::casper_types::bytesrepr::{self, ToBytes};
use odra::casper_types::{runtime_args, RuntimeArgs, U256};
use odra::{CallDef, ContractRef};

use crate::acl::{AccessControlListContractRef, Authority};
use crate::collections::AddressSet;
use crate::interfaces::{
    CreditFacadeContractRef, CreditManagerContractRef, GaugeContractRef,
    LpPriceFeedContractRef, PoolContractRef, PoolQuotaKeeperContractRef,
    PriceOracleContractRef,
};
use super::errors::TimelockError;
use super::events::*;
use super::policy::{Policy, PolicyId, PolicyState, PolicyStore, UintRange};
use super::queue::{QueuedTransaction, TransactionQueue};
use super::sanity::{fingerprint, SanityCheck, SanityProbe};

/// Controller Timelock contract
#[odra::module]
pub struct ControllerTimelock {
    /// Role registry
    acl: Var<Address>,
    /// May cancel any pending transaction
    veto_admin: Var<Address>,
    policies: SubModule<PolicyStore>,
    queue: SubModule<TransactionQueue>,
    /// May execute any pending transaction
    executors: SubModule<AddressSet>,
}

#[odra::module]
impl ControllerTimelock {
    /// Registers every policy with the deployer as admin and `delay` as delay
    pub fn init(&mut self, acl: Address, veto_admin: Address, delay: u64) {
        let caller = self.env().caller();
        self.acl.set(acl);
        self.veto_admin.set(veto_admin);
        for id in PolicyId::ALL.iter() {
            self.policies.register(id.clone(), caller, delay);
        }
    }

    // ========================================================================
    // Credit manager parameters
    // ========================================================================

    /// Queues a new expiration date; only allowed while the manager has no debt
    pub fn set_expiration_date(&mut self, credit_manager: Address, expiration_date: u64) -> [u8; 32] {
        let id = PolicyId::ExpirationDate;
        let policy = self.require_policy_admin(&id);
        self.policies.check_range(id.clone(), U256::from(expiration_date));

        let cm = self.credit_manager(credit_manager);
        let pool = PoolContractRef::new(self.env(), cm.pool());
        if !pool.credit_manager_borrowed(credit_manager).is_zero() {
            self.env().revert(TimelockError::ParameterChecksFailed);
        }

        self.queue_call(
            id,
            policy,
            cm.credit_configurator(),
            "set_expiration_date",
            runtime_args! { "expiration_date" => expiration_date },
            Some(SanityCheck::new(SanityProbe::ExpirationDate, cm.credit_facade())),
        )
    }

    pub fn set_max_debt_per_block_multiplier(&mut self, credit_manager: Address, multiplier: u8) -> [u8; 32] {
        let id = PolicyId::MaxDebtPerBlockMultiplier;
        let policy = self.require_policy_admin(&id);
        self.policies.check_range(id.clone(), U256::from(multiplier));

        let cm = self.credit_manager(credit_manager);
        self.queue_call(
            id,
            policy,
            cm.credit_configurator(),
            "set_max_debt_per_block_multiplier",
            runtime_args! { "max_debt_per_block_multiplier" => multiplier },
            Some(SanityCheck::new(SanityProbe::MaxDebtPerBlockMultiplier, cm.credit_facade())),
        )
    }

    pub fn set_min_debt_limit(&mut self, credit_manager: Address, min_debt: U256) -> [u8; 32] {
        let id = PolicyId::MinDebt;
        let policy = self.require_policy_admin(&id);
        self.policies.check_range(id.clone(), min_debt);

        let cm = self.credit_manager(credit_manager);
        self.queue_call(
            id,
            policy,
            cm.credit_configurator(),
            "set_min_debt_limit",
            runtime_args! { "min_debt" => min_debt },
            Some(SanityCheck::new(SanityProbe::MinDebt, cm.credit_facade())),
        )
    }

    pub fn set_max_debt_limit(&mut self, credit_manager: Address, max_debt: U256) -> [u8; 32] {
        let id = PolicyId::MaxDebt;
        let policy = self.require_policy_admin(&id);
        self.policies.check_range(id.clone(), max_debt);

        let cm = self.credit_manager(credit_manager);
        self.queue_call(
            id,
            policy,
            cm.credit_configurator(),
            "set_max_debt_limit",
            runtime_args! { "max_debt" => max_debt },
            Some(SanityCheck::new(SanityProbe::MaxDebt, cm.credit_facade())),
        )
    }

    pub fn set_credit_manager_debt_limit(&mut self, credit_manager: Address, debt_limit: U256) -> [u8; 32] {
        let id = PolicyId::CreditManagerDebtLimit;
        let policy = self.require_policy_admin(&id);
        self.policies.check_range(id.clone(), debt_limit);

        let pool = self.credit_manager(credit_manager).pool();
        self.queue_call(
            id,
            policy,
            pool,
            "set_credit_manager_debt_limit",
            runtime_args! { "credit_manager" => credit_manager, "debt_limit" => debt_limit },
            Some(SanityCheck::keyed(SanityProbe::CreditManagerDebtLimit, pool, credit_manager)),
        )
    }

    /// Queues a liquidation threshold ramp; the ramp may not start before the eta
    pub fn ramp_liquidation_threshold(
        &mut self,
        credit_manager: Address,
        token: Address,
        lt_final: u32,
        ramp_start: u64,
        ramp_duration: u64,
    ) -> [u8; 32] {
        let id = PolicyId::LiquidationThreshold;
        let policy = self.require_policy_admin(&id);
        self.policies.check_range(id.clone(), U256::from(lt_final));
        self.policies.check_range(PolicyId::RampDuration, U256::from(ramp_duration));

        let eta = self.env().get_block_time().saturating_add(policy.delay);
        if ramp_start < eta {
            self.env().revert(TimelockError::ParameterChecksFailed);
        }

        let cm = self.credit_manager(credit_manager);
        self.queue_call(
            id,
            policy,
            cm.credit_configurator(),
            "ramp_liquidation_threshold",
            runtime_args! {
                "token" => token,
                "lt_final" => lt_final,
                "timestamp_ramp_start" => ramp_start,
                "ramp_duration" => ramp_duration
            },
            Some(SanityCheck::keyed(SanityProbe::LtParams, credit_manager, token)),
        )
    }

    pub fn forbid_adapter(&mut self, credit_manager: Address, adapter: Address) -> [u8; 32] {
        let id = PolicyId::ForbidAdapter;
        let policy = self.require_policy_admin(&id);
        self.policies.check_address_in_set(id.clone(), credit_manager, adapter);

        let configurator = self.credit_manager(credit_manager).credit_configurator();
        self.queue_call(
            id,
            policy,
            configurator,
            "forbid_adapter",
            runtime_args! { "adapter" => adapter },
            None,
        )
    }

    // ========================================================================
    // Pool and quota parameters
    // ========================================================================

    pub fn set_token_limit(&mut self, pool: Address, token: Address, limit: U256) -> [u8; 32] {
        let id = PolicyId::TokenLimit;
        let policy = self.require_policy_admin(&id);
        self.policies.check_range(id.clone(), limit);

        let quota_keeper = PoolContractRef::new(self.env(), pool).pool_quota_keeper();
        self.queue_call(
            id,
            policy,
            quota_keeper,
            "set_token_limit",
            runtime_args! { "token" => token, "limit" => limit },
            Some(SanityCheck::keyed(SanityProbe::TokenLimit, quota_keeper, token)),
        )
    }

    pub fn set_token_quota_increase_fee(&mut self, pool: Address, token: Address, quota_increase_fee: u32) -> [u8; 32] {
        let id = PolicyId::TokenQuotaIncreaseFee;
        let policy = self.require_policy_admin(&id);
        self.policies.check_range(id.clone(), U256::from(quota_increase_fee));

        let quota_keeper = PoolContractRef::new(self.env(), pool).pool_quota_keeper();
        self.queue_call(
            id,
            policy,
            quota_keeper,
            "set_token_quota_increase_fee",
            runtime_args! { "token" => token, "quota_increase_fee" => quota_increase_fee },
            Some(SanityCheck::keyed(SanityProbe::TokenQuotaIncreaseFee, quota_keeper, token)),
        )
    }

    pub fn set_total_debt_limit(&mut self, pool: Address, total_debt_limit: U256) -> [u8; 32] {
        let id = PolicyId::TotalDebtLimit;
        let policy = self.require_policy_admin(&id);
        self.policies.check_range(id.clone(), total_debt_limit);

        self.queue_call(
            id,
            policy,
            pool,
            "set_total_debt_limit",
            runtime_args! { "total_debt_limit" => total_debt_limit },
            Some(SanityCheck::new(SanityProbe::TotalDebtLimit, pool)),
        )
    }

    pub fn set_withdraw_fee(&mut self, pool: Address, withdraw_fee: u32) -> [u8; 32] {
        let id = PolicyId::WithdrawFee;
        let policy = self.require_policy_admin(&id);
        self.policies.check_range(id.clone(), U256::from(withdraw_fee));

        self.queue_call(
            id,
            policy,
            pool,
            "set_withdraw_fee",
            runtime_args! { "withdraw_fee" => withdraw_fee },
            Some(SanityCheck::new(SanityProbe::WithdrawFee, pool)),
        )
    }

    pub fn set_min_quota_rate(&mut self, pool: Address, token: Address, rate: u32) -> [u8; 32] {
        let id = PolicyId::MinQuotaRate;
        let policy = self.require_policy_admin(&id);
        self.policies.check_range(id.clone(), U256::from(rate));

        let gauge = self.gauge_of(pool);
        self.queue_call(
            id,
            policy,
            gauge,
            "change_quota_min_rate",
            runtime_args! { "token" => token, "min_rate" => rate },
            Some(SanityCheck::keyed(SanityProbe::MinQuotaRate, gauge, token)),
        )
    }

    pub fn set_max_quota_rate(&mut self, pool: Address, token: Address, rate: u32) -> [u8; 32] {
        let id = PolicyId::MaxQuotaRate;
        let policy = self.require_policy_admin(&id);
        self.policies.check_range(id.clone(), U256::from(rate));

        let gauge = self.gauge_of(pool);
        self.queue_call(
            id,
            policy,
            gauge,
            "change_quota_max_rate",
            runtime_args! { "token" => token, "max_rate" => rate },
            Some(SanityCheck::keyed(SanityProbe::MaxQuotaRate, gauge, token)),
        )
    }

    // ========================================================================
    // Price feeds
    // ========================================================================

    pub fn set_lp_price_feed_limiter(&mut self, price_feed: Address, lower_bound: U256) -> [u8; 32] {
        let id = PolicyId::LpPriceFeedLimiter;
        let policy = self.require_policy_admin(&id);
        self.policies.check_range(id.clone(), lower_bound);

        self.queue_call(
            id,
            policy,
            price_feed,
            "set_limiter",
            runtime_args! { "lower_bound" => lower_bound },
            Some(SanityCheck::new(SanityProbe::PriceFeedLowerBound, price_feed)),
        )
    }

    pub fn forbid_bounds_update(&mut self, price_feed: Address) -> [u8; 32] {
        let id = PolicyId::ForbidBoundsUpdate;
        let policy = self.require_policy_admin(&id);
        self.policies.check_address_in_set(id.clone(), price_feed, price_feed);

        self.queue_call(
            id,
            policy,
            price_feed,
            "forbid_bounds_update",
            RuntimeArgs::new(),
            None,
        )
    }

    pub fn set_price_feed(
        &mut self,
        price_oracle: Address,
        token: Address,
        price_feed: Address,
        staleness_period: u32,
    ) -> [u8; 32] {
        let id = PolicyId::PriceFeed;
        let policy = self.require_policy_admin(&id);
        self.policies.check_address_in_set(id.clone(), token, price_feed);

        self.queue_call(
            id,
            policy,
            price_oracle,
            "set_price_feed",
            runtime_args! {
                "token" => token,
                "price_feed" => price_feed,
                "staleness_period" => staleness_period
            },
            Some(SanityCheck::keyed(SanityProbe::PriceFeedParams, price_oracle, token)),
        )
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Applies a pending transaction within its execution window
    pub fn execute_transaction(&mut self, tx_hash: [u8; 32]) {
        let tx = self.queue.pending(tx_hash);
        let caller = self.env().caller();
        if caller != tx.initiator && !self.executors.contains(caller) {
            self.env().revert(TimelockError::CallerNotExecutor);
        }
        if !tx.is_executable_at(self.env().get_block_time()) {
            self.env().revert(TimelockError::OutsideExecutionWindow);
        }
        if let Some(check) = &tx.sanity_check {
            if self.probe(check) != tx.sanity_check_value {
                self.env().revert(TimelockError::StaleParameterChanged);
            }
        }
        let args: RuntimeArgs = match bytesrepr::deserialize(tx.data.clone()) {
            Ok(args) => args,
            Err(_) => self.env().revert(TimelockError::ExecutionReverted),
        };

        // Consumed before the call so a reentrant execute finds nothing pending
        self.queue.consume(tx_hash);
        self.env()
            .call_contract::<()>(tx.target, CallDef::new(tx.signature, true, args));

        self.env().emit_event(ExecuteTransaction {
            tx_hash,
            executed_by: caller,
        });
    }

    /// Drops a pending transaction (veto admin only)
    pub fn cancel_transaction(&mut self, tx_hash: [u8; 32]) {
        if self.env().caller() != self.veto_admin() {
            self.env().revert(TimelockError::CallerNotVetoAdmin);
        }
        self.queue.consume(tx_hash);
        self.env().emit_event(CancelTransaction { tx_hash });
    }

    // ========================================================================
    // Configuration (configurator only)
    // ========================================================================

    pub fn set_veto_admin(&mut self, veto_admin: Address) {
        self.only_configurator();
        if self.veto_admin.get() == Some(veto_admin) {
            return;
        }
        self.veto_admin.set(veto_admin);
        self.env().emit_event(SetVetoAdmin { veto_admin });
    }

    pub fn add_executor(&mut self, executor: Address) {
        self.only_configurator();
        if self.executors.add(executor) {
            self.env().emit_event(AddExecutor { executor });
        }
    }

    pub fn remove_executor(&mut self, executor: Address) {
        self.only_configurator();
        if self.executors.remove(executor) {
            self.env().emit_event(RemoveExecutor { executor });
        }
    }

    pub fn set_policy_admin(&mut self, policy: PolicyId, admin: Address) {
        self.only_configurator();
        if self.policies.set_admin(policy.clone(), admin) {
            self.env().emit_event(SetPolicyAdmin { policy, admin });
        }
    }

    pub fn set_policy_delay(&mut self, policy: PolicyId, delay: u64) {
        self.only_configurator();
        if self.policies.set_delay(policy.clone(), delay) {
            self.env().emit_event(SetPolicyDelay { policy, delay });
        }
    }

    pub fn set_policy_range(&mut self, policy: PolicyId, min: U256, max: U256) {
        self.only_configurator();
        if self.policies.set_range(policy.clone(), min, max) {
            self.env().emit_event(SetPolicyRange { policy, min, max });
        }
    }

    pub fn add_address_to_set(&mut self, policy: PolicyId, key: Address, value: Address) {
        self.only_configurator();
        if self.policies.add_address(policy.clone(), key, value) {
            self.env().emit_event(AddAddressToSet { policy, key, value });
        }
    }

    pub fn remove_address_from_set(&mut self, policy: PolicyId, key: Address, value: Address) {
        self.only_configurator();
        if self.policies.remove_address(policy.clone(), key, value) {
            self.env().emit_event(RemoveAddressFromSet { policy, key, value });
        }
    }

    // ========================================================================
    // Views
    // ========================================================================

    pub fn acl(&self) -> Address {
        self.acl.get_or_revert_with(TimelockError::AclNotSet)
    }

    pub fn veto_admin(&self) -> Address {
        self.veto_admin.get_or_revert_with(TimelockError::CallerNotVetoAdmin)
    }

    pub fn executors(&self) -> Vec<Address> {
        self.executors.values()
    }

    pub fn is_executor(&self, account: Address) -> bool {
        self.executors.contains(account)
    }

    pub fn get_policy(&self, policy: PolicyId) -> Policy {
        self.policies.policy(policy)
    }

    pub fn get_policy_range(&self, policy: PolicyId) -> UintRange {
        self.policies.range(policy)
    }

    pub fn get_policy_keys(&self, policy: PolicyId) -> Vec<Address> {
        self.policies.keys(policy)
    }

    pub fn get_permitted_addresses(&self, policy: PolicyId, key: Address) -> Vec<Address> {
        self.policies.permitted(policy, key)
    }

    pub fn get_policy_state(&self) -> Vec<PolicyState> {
        self.policies.state()
    }

    pub fn get_queued_transaction(&self, tx_hash: [u8; 32]) -> Option<QueuedTransaction> {
        self.queue.get(tx_hash)
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn authority(&self) -> Authority {
        let acl = AccessControlListContractRef::new(self.env(), self.acl());
        Authority::new(self.env().caller(), acl)
    }

    fn only_configurator(&self) -> Address {
        match self.authority().require_configurator() {
            Ok(caller) => caller,
            Err(error) => self.env().revert(error),
        }
    }

    fn require_policy_admin(&self, id: &PolicyId) -> Policy {
        self.policies.require_admin(id.clone(), self.env().caller())
    }

    fn credit_manager(&self, credit_manager: Address) -> CreditManagerContractRef {
        CreditManagerContractRef::new(self.env(), credit_manager)
    }

    fn gauge_of(&self, pool: Address) -> Address {
        let quota_keeper = PoolContractRef::new(self.env(), pool).pool_quota_keeper();
        PoolQuotaKeeperContractRef::new(self.env(), quota_keeper).gauge()
    }

    /// Records the call with eta = now + delay and a sanity snapshot
    fn queue_call(
        &mut self,
        id: PolicyId,
        policy: Policy,
        target: Address,
        signature: &str,
        args: RuntimeArgs,
        sanity_check: Option<SanityCheck>,
    ) -> [u8; 32] {
        let initiator = self.env().caller();
        let data = match args.to_bytes() {
            Ok(data) => data,
            Err(_) => self.env().revert(TimelockError::EncodingFailed),
        };
        let signature = String::from(signature);
        let eta = self.env().get_block_time().saturating_add(policy.delay);
        let sanity_check_value = sanity_check
            .as_ref()
            .map(|check| self.probe(check))
            .unwrap_or_default();

        let tx_hash = self.queue.hash_of(
            id.clone(),
            initiator,
            target,
            signature.clone(),
            data.clone(),
        );
        self.queue.queue(
            tx_hash,
            QueuedTransaction {
                queued: true,
                policy: id,
                initiator,
                target,
                eta,
                signature: signature.clone(),
                data: data.clone(),
                sanity_check_value,
                sanity_check,
            },
        );

        self.env().emit_event(QueueTransaction {
            tx_hash,
            initiator,
            target,
            signature,
            data,
            eta,
        });
        tx_hash
    }

    /// Current reading of a sanity probe
    fn probe(&self, check: &SanityCheck) -> U256 {
        let env = self.env();
        let subject = check.subject;
        let key = || {
            check
                .key
                .unwrap_or_revert_with(&self.env(), TimelockError::ParameterChecksFailed)
        };
        match check.probe {
            SanityProbe::ExpirationDate => {
                U256::from(CreditFacadeContractRef::new(env, subject).expiration_date())
            }
            SanityProbe::MaxDebtPerBlockMultiplier => U256::from(
                CreditFacadeContractRef::new(env, subject).max_debt_per_block_multiplier(),
            ),
            SanityProbe::MinDebt => CreditFacadeContractRef::new(env, subject).debt_limits().0,
            SanityProbe::MaxDebt => CreditFacadeContractRef::new(env, subject).debt_limits().1,
            SanityProbe::CreditManagerDebtLimit => {
                PoolContractRef::new(env, subject).credit_manager_debt_limit(key())
            }
            SanityProbe::LtParams => {
                let params = CreditManagerContractRef::new(env, subject).lt_params(key());
                self.fingerprint_of(params.to_bytes())
            }
            SanityProbe::TokenLimit => {
                PoolQuotaKeeperContractRef::new(env, subject)
                    .get_token_quota_params(key())
                    .limit
            }
            SanityProbe::TokenQuotaIncreaseFee => U256::from(
                PoolQuotaKeeperContractRef::new(env, subject)
                    .get_token_quota_params(key())
                    .quota_increase_fee,
            ),
            SanityProbe::TotalDebtLimit => PoolContractRef::new(env, subject).total_debt_limit(),
            SanityProbe::WithdrawFee => U256::from(PoolContractRef::new(env, subject).withdraw_fee()),
            SanityProbe::MinQuotaRate => U256::from(
                GaugeContractRef::new(env, subject).quota_rate_params(key()).min_rate,
            ),
            SanityProbe::MaxQuotaRate => U256::from(
                GaugeContractRef::new(env, subject).quota_rate_params(key()).max_rate,
            ),
            SanityProbe::PriceFeedParams => {
                let params = PriceOracleContractRef::new(env, subject).price_feed_params(key());
                self.fingerprint_of(params.to_bytes())
            }
            SanityProbe::PriceFeedLowerBound => {
                LpPriceFeedContractRef::new(env, subject).lower_bound()
            }
        }
    }

    fn fingerprint_of(&self, encoded: Result<Vec<u8>, bytesrepr::Error>) -> U256 {
        match encoded {
            Ok(bytes) => fingerprint(self.env().hash(bytes)),
            Err(_) => self.env().revert(TimelockError::EncodingFailed),
        }
    }
}
