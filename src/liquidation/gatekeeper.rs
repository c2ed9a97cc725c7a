//! Liquidation Gatekeeper - emergency liquidator in front of credit facades
//!
//! Liquidations go through the gatekeeper, which names itself as recipient of
//! the premium and of any withdrawn collateral. Accounts in bad debt can only
//! be liquidated during a waiver window opened for whitelisted liquidators, or
//! when the account is still insolvent with aliased prices applied.
use odra::prelude::*;
use odra::casper_types::U256;
use odra::ContractRef;

use crate::acl::{AccessControlListContractRef, AccessError, Authority};
use crate::interfaces::{
    Cep18TokenContractRef, CollateralCalcTask, CollateralDebtData, CreditFacadeContractRef,
    CreditManagerContractRef, MultiCall, PoolContractRef, PoolQuotaKeeperContractRef,
    PriceOracleContractRef, PriceUpdate, ON_DEMAND_PRICE_UPDATES, WITHDRAW_COLLATERAL,
};
use crate::math::DecimalMath;
use super::errors::LiquidationError;
use super::events::*;
use super::registry::{LiquidatorRegistry, TokenAlias};
use super::solvency::{self, AliasedPosition};

/// Liquidation Gatekeeper contract
#[odra::module]
pub struct LiquidationGatekeeper {
    /// Role registry
    acl: Var<Address>,
    paused: Var<bool>,
    registry: SubModule<LiquidatorRegistry>,
    /// Anyone may liquidate until this time
    public_liquidations_allowed_until: Var<u64>,
    /// Whitelisted liquidators may liquidate bad debt until this time
    policy_waived_for_whitelist_until: Var<u64>,
}

#[odra::module]
impl LiquidationGatekeeper {
    pub fn init(&mut self, acl: Address) {
        self.acl.set(acl);
        self.paused.set(false);
    }

    // ========================================================================
    // Liquidation
    // ========================================================================

    /// Liquidates a credit account, whitelisted callers only unless public
    /// liquidations are temporarily allowed
    pub fn liquidate_credit_account(
        &mut self,
        credit_manager: Address,
        credit_account: Address,
        calls: Vec<MultiCall>,
    ) {
        self.when_not_paused();
        let caller = self.env().caller();
        let public = self.window_open(self.public_liquidations_allowed_until.get());
        if !public && !self.registry.is_whitelisted(caller) {
            self.env().revert(LiquidationError::CallerNotWhitelisted);
        }
        self.liquidate(credit_manager, credit_account, calls, false);
    }

    /// Same as `liquidate_credit_account`, with the gatekeeper approving the
    /// credit manager to pull its underlying during the liquidation.
    /// Never open to the public.
    pub fn liquidate_credit_account_with_approval(
        &mut self,
        credit_manager: Address,
        credit_account: Address,
        calls: Vec<MultiCall>,
    ) {
        self.when_not_paused();
        if !self.registry.is_whitelisted(self.env().caller()) {
            self.env().revert(LiquidationError::CallerNotWhitelisted);
        }
        self.liquidate(credit_manager, credit_account, calls, true);
    }

    // ========================================================================
    // Temporary windows (controller only)
    // ========================================================================

    /// Opens standard liquidations to everyone for `duration`, replacing any open window
    pub fn allow_temporary_public_liquidations(&mut self, duration: u64) {
        self.only_controller();
        let until = self.env().get_block_time().saturating_add(duration);
        self.public_liquidations_allowed_until.set(until);
        self.env().emit_event(AllowTemporaryPublicLiquidations { until });
    }

    /// Lets whitelisted liquidators skip the bad debt policy for `duration`
    pub fn allow_temporary_policy_waive(&mut self, duration: u64) {
        self.only_controller();
        let until = self.env().get_block_time().saturating_add(duration);
        self.policy_waived_for_whitelist_until.set(until);
        self.env().emit_event(AllowTemporaryPolicyWaive { until });
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    pub fn set_whitelisted(&mut self, account: Address, whitelisted: bool) {
        self.only_configurator();
        if self.registry.set_whitelisted(account, whitelisted) {
            self.env().emit_event(SetWhitelistedStatus { account, whitelisted });
        }
    }

    /// Sets or clears (`None`) the alias of a collateral token
    pub fn set_alias(&mut self, token: Address, alias: Option<Address>) {
        self.only_configurator();
        if self.registry.set_alias(token, alias) {
            self.env().emit_event(SetAlias { token, alias });
        }
    }

    pub fn pause(&mut self) {
        let authority = self.authority();
        if !authority.can_pause() {
            self.env().revert(AccessError::CallerNotPausableAdmin);
        }
        if self.is_paused() {
            return;
        }
        self.paused.set(true);
        self.env().emit_event(GatekeeperPaused {
            account: authority.caller(),
        });
    }

    pub fn unpause(&mut self) {
        let authority = self.authority();
        if !authority.can_unpause() {
            self.env().revert(AccessError::CallerNotUnpausableAdmin);
        }
        if !self.is_paused() {
            return;
        }
        self.paused.set(false);
        self.env().emit_event(GatekeeperUnpaused {
            account: authority.caller(),
        });
    }

    /// Sweeps collateral and premiums collected by liquidations
    pub fn withdraw_funds(&mut self, token: Address, amount: U256, to: Address) {
        self.only_configurator();
        self.safe_transfer(token, to, amount);
        self.env().emit_event(FundsWithdrawn { token, amount, to });
    }

    // ========================================================================
    // Views
    // ========================================================================

    pub fn acl(&self) -> Address {
        self.acl.get_or_revert_with(LiquidationError::AclNotSet)
    }

    pub fn is_paused(&self) -> bool {
        self.paused.get_or_default()
    }

    pub fn is_whitelisted(&self, account: Address) -> bool {
        self.registry.is_whitelisted(account)
    }

    pub fn whitelisted_accounts(&self) -> Vec<Address> {
        self.registry.whitelisted()
    }

    pub fn alias_of(&self, token: Address) -> Option<Address> {
        self.registry.alias_of(token)
    }

    pub fn aliases(&self) -> Vec<TokenAlias> {
        self.registry.aliases()
    }

    pub fn public_liquidations_allowed_until(&self) -> u64 {
        self.public_liquidations_allowed_until.get_or_default()
    }

    pub fn policy_waived_for_whitelist_until(&self) -> u64 {
        self.policy_waived_for_whitelist_until.get_or_default()
    }

    /// Whether the account is insolvent with aliased prices applied
    pub fn is_liquidatable_with_aliases(&self, credit_manager: Address, credit_account: Address) -> bool {
        let cm = CreditManagerContractRef::new(self.env(), credit_manager);
        let data = cm.calc_debt_and_collateral(credit_account, CollateralCalcTask::DebtCollateral);
        self.aliased_liquidatable(&cm, credit_account, &data)
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn liquidate(
        &mut self,
        credit_manager: Address,
        credit_account: Address,
        calls: Vec<MultiCall>,
        with_approval: bool,
    ) {
        let liquidator = self.env().caller();
        let cm = CreditManagerContractRef::new(self.env(), credit_manager);
        let facade = cm.credit_facade();

        self.check_withdrawals(facade, &calls);
        let calls = self.apply_price_updates(&cm, facade, calls);

        let data = cm.calc_debt_and_collateral(credit_account, CollateralCalcTask::DebtCollateral);
        let bad_debt = match solvency::is_bad_debt(&data, cm.fees().liquidation_discount) {
            Ok(bad_debt) => bad_debt,
            Err(error) => self.env().revert(error),
        };
        if bad_debt
            && !self.policy_waived_for(liquidator)
            && !self.aliased_liquidatable(&cm, credit_account, &data)
        {
            self.env().revert(LiquidationError::PolicyViolatingLiquidation);
        }

        let this = self.env().self_address();
        let underlying = with_approval.then(|| cm.underlying());
        if let Some(token) = underlying {
            self.safe_approve(token, credit_manager, U256::MAX);
        }
        CreditFacadeContractRef::new(self.env(), facade)
            .liquidate_credit_account(credit_account, this, calls);
        if let Some(token) = underlying {
            // Reset to 1 rather than 0
            self.safe_approve(token, credit_manager, U256::one());
        }

        self.env().emit_event(LiquidationExecuted {
            credit_manager,
            credit_account,
            liquidator,
            bad_debt,
            with_approval,
        });
    }

    /// Every collateral withdrawal in the bundle must pay out to the gatekeeper
    fn check_withdrawals(&self, facade: Address, calls: &[MultiCall]) {
        let this = self.env().self_address();
        for call in calls.iter().filter(|call| call.is_call_to(facade, WITHDRAW_COLLATERAL)) {
            let to: Address = call
                .arg("to")
                .unwrap_or_revert_with(&self.env(), LiquidationError::MalformedMultiCall);
            if to != this {
                self.env().revert(LiquidationError::WithdrawalToExternalAddress);
            }
        }
    }

    /// Pushes a leading price update call to the oracle and drops it from the bundle
    fn apply_price_updates(
        &self,
        cm: &CreditManagerContractRef,
        facade: Address,
        mut calls: Vec<MultiCall>,
    ) -> Vec<MultiCall> {
        let leading_update = calls
            .first()
            .map(|call| call.is_call_to(facade, ON_DEMAND_PRICE_UPDATES))
            .unwrap_or(false);
        if !leading_update {
            return calls;
        }
        let call = calls.remove(0);
        let updates: Vec<PriceUpdate> = call
            .arg("updates")
            .unwrap_or_revert_with(&self.env(), LiquidationError::MalformedMultiCall);
        PriceOracleContractRef::new(self.env(), cm.price_oracle()).update_prices(updates);
        calls
    }

    fn policy_waived_for(&self, liquidator: Address) -> bool {
        self.registry.is_whitelisted(liquidator)
            && self.window_open(self.policy_waived_for_whitelist_until.get())
    }

    /// Revalues aliased collateral at the alias price and compares the
    /// weighted value with the total debt
    fn aliased_liquidatable(
        &self,
        cm: &CreditManagerContractRef,
        credit_account: Address,
        data: &CollateralDebtData,
    ) -> bool {
        let oracle = PriceOracleContractRef::new(self.env(), cm.price_oracle());
        let underlying = cm.underlying();
        let quota_keeper = PoolContractRef::new(self.env(), cm.pool()).pool_quota_keeper();
        let quota_keeper = PoolQuotaKeeperContractRef::new(self.env(), quota_keeper);

        let mut positions = Vec::new();
        for mask in solvency::collateral_masks(data.enabled_tokens_mask) {
            let (token, liquidation_threshold) = cm.collateral_token_by_mask(mask);
            let Some(alias) = self.registry.alias_of(token) else {
                continue;
            };
            let token_ref = Cep18TokenContractRef::new(self.env(), token);
            let balance = token_ref.balance_of(credit_account);
            if balance <= U256::from(solvency::DUST_BALANCE) {
                continue;
            }

            let quota_usd = if (data.quoted_tokens_mask & mask).is_zero() {
                None
            } else {
                let quota = quota_keeper.get_quota(credit_account, token);
                Some(oracle.convert_to_usd(quota, underlying))
            };
            let alias_decimals = Cep18TokenContractRef::new(self.env(), alias).decimals();
            let alias_balance = match DecimalMath::rescale(balance, token_ref.decimals(), alias_decimals) {
                Ok(amount) => amount,
                Err(error) => self.env().revert(error),
            };

            positions.push(AliasedPosition {
                value_usd: oracle.convert_to_usd(balance, token),
                aliased_value_usd: oracle.convert_to_usd(alias_balance, alias),
                liquidation_threshold,
                quota_usd,
            });
        }

        match solvency::aliased_twv_usd(data.twv_usd, &positions) {
            Ok(twv_usd) => solvency::is_liquidatable(twv_usd, data.total_debt_usd),
            Err(error) => self.env().revert(error),
        }
    }

    fn safe_transfer(&self, token: Address, to: Address, amount: U256) {
        let mut token_ref = Cep18TokenContractRef::new(self.env(), token);
        if !token_ref.transfer(to, amount) {
            self.env().revert(LiquidationError::TransferFailed);
        }
    }

    fn safe_approve(&self, token: Address, spender: Address, amount: U256) {
        let mut token_ref = Cep18TokenContractRef::new(self.env(), token);
        if !token_ref.approve(spender, amount) {
            self.env().revert(LiquidationError::ApprovalFailed);
        }
    }

    /// Deadlines are inclusive; a window never opened is closed
    fn window_open(&self, until: Option<u64>) -> bool {
        until
            .map(|until| self.env().get_block_time() <= until)
            .unwrap_or(false)
    }

    fn when_not_paused(&self) {
        if self.is_paused() {
            self.env().revert(LiquidationError::Paused);
        }
    }

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

    fn only_controller(&self) -> Address {
        match self.authority().require_controller() {
            Ok(caller) => caller,
            Err(error) => self.env().revert(error),
        }
    }
}
