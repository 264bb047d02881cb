//! Collateral Accounting & Mint-Authorization Engine
//!
//! Tracks per-user collateral across the two collateral classes and per-user
//! IDRW debt, values positions through the oracle adapter, and enforces the
//! collateralization invariant on every action that can reduce collateral or
//! increase debt. The engine is the sole holder of mint/burn authority over
//! the IDRW token and custodies all deposited collateral.
//!
//! Every entry point validates and commits its own state before issuing any
//! cross-contract token call, so a failed operation leaves no observable
//! change and a re-entrant callback cannot see a partial position.

use odra::casper_types::{runtime_args, U256};
use odra::prelude::*;
use odra::CallDef;

use crate::errors::EngineError;
use crate::math;
use crate::oracle_adapter::OracleAdapter;
use crate::types::CollateralId;

/// Minimum collateralization ratio in whole percent (150%)
pub const COLLATERAL_RATIO_PERCENT: u32 = 150;

/// Collateral Accounting Engine
#[odra::module]
pub struct IdrwEngine {
    /// IDRW stablecoin contract address
    idrw_token: Var<Address>,
    /// WETH collateral token address
    weth_token: Var<Address>,
    /// WBTC collateral token address
    wbtc_token: Var<Address>,
    /// WETH/USD aggregator feed address
    weth_feed: Var<Address>,
    /// WBTC/USD aggregator feed address
    wbtc_feed: Var<Address>,
    /// Per-user, per-class collateral balances (18-decimal units)
    collateral: Mapping<(Address, CollateralId), U256>,
    /// Per-user outstanding IDRW debt
    debt: Mapping<Address, U256>,
    /// Total collateral held per class
    total_collateral: Mapping<CollateralId, U256>,
    /// Total outstanding IDRW debt
    total_debt: Var<U256>,
}

#[odra::module]
impl IdrwEngine {
    /// Initialize the engine with its token and feed handles.
    ///
    /// The collateral ratio is a protocol constant; there is no other
    /// configuration surface.
    pub fn init(
        &mut self,
        idrw_token: Address,
        weth_token: Address,
        wbtc_token: Address,
        weth_feed: Address,
        wbtc_feed: Address,
    ) {
        self.idrw_token.set(idrw_token);
        self.weth_token.set(weth_token);
        self.wbtc_token.set(wbtc_token);
        self.weth_feed.set(weth_feed);
        self.wbtc_feed.set(wbtc_feed);
        self.total_debt.set(U256::zero());
    }

    // ========== User Operations ==========

    /// Deposit collateral into the caller's position.
    ///
    /// Pulls `amount` of the collateral token from the caller into engine
    /// custody. No ratio check: a deposit only improves solvency.
    pub fn deposit(&mut self, collateral_id: CollateralId, amount: U256) {
        if amount.is_zero() {
            self.env().revert(EngineError::ZeroAmount);
        }

        let caller = self.env().caller();
        self.credit_collateral(caller, collateral_id, amount);

        self.pull_collateral(collateral_id, caller, amount);
    }

    /// Withdraw collateral from the caller's position.
    ///
    /// If the caller has outstanding debt, the remaining collateral value
    /// must still satisfy the ratio; the check precedes the token transfer.
    pub fn withdraw(&mut self, collateral_id: CollateralId, amount: U256) {
        if amount.is_zero() {
            self.env().revert(EngineError::ZeroAmount);
        }

        let caller = self.env().caller();
        self.debit_collateral(caller, collateral_id, amount);

        if !self.debt_of(caller).is_zero() {
            self.assert_ratio(caller);
        }

        self.push_collateral(collateral_id, caller, amount);
    }

    /// Mint IDRW against the caller's collateral.
    ///
    /// The debt increase is staged first and the ratio evaluated against the
    /// new debt; a violation reverts the whole operation.
    pub fn mint_idrw(&mut self, amount: U256) {
        if amount.is_zero() {
            self.env().revert(EngineError::ZeroAmount);
        }

        let caller = self.env().caller();
        let new_debt = self.checked(self.debt_of(caller).checked_add(amount));
        self.debt.set(&caller, new_debt);

        let new_total = self.checked(self.get_total_debt().checked_add(amount));
        self.total_debt.set(new_total);

        self.assert_ratio(caller);

        let idrw = self.idrw_token_address();
        let args = runtime_args! {
            "to" => caller,
            "amount" => amount,
        };
        self.env()
            .call_contract::<()>(idrw, CallDef::new("mint", true, args));
    }

    /// Repay outstanding IDRW debt.
    ///
    /// Burns `amount` from the caller through the engine's burn authority.
    pub fn repay(&mut self, amount: U256) {
        if amount.is_zero() {
            self.env().revert(EngineError::ZeroAmount);
        }

        let caller = self.env().caller();
        let debt = self.debt_of(caller);
        if amount > debt {
            self.env().revert(EngineError::RepayExceedsDebt);
        }

        self.debt.set(&caller, debt - amount);
        self.total_debt.set(self.get_total_debt() - amount);

        let idrw = self.idrw_token_address();
        let args = runtime_args! {
            "from" => caller,
            "amount" => amount,
        };
        self.env()
            .call_contract::<()>(idrw, CallDef::new("burn_from", true, args));
    }

    /// Move position value from one collateral class to the other.
    ///
    /// The destination amount is the floor-rounded USD equivalent at the
    /// destination price, pulled from the caller's external balance of the
    /// destination token. Debt is untouched, but rounding can shift the
    /// total backing, so the ratio is re-checked.
    pub fn switch_collateral(
        &mut self,
        from_id: CollateralId,
        to_id: CollateralId,
        amount: U256,
    ) {
        if from_id == to_id {
            self.env().revert(EngineError::SameCollateral);
        }
        if amount.is_zero() {
            self.env().revert(EngineError::ZeroAmount);
        }

        let caller = self.env().caller();

        let from_price = self.normalized_price(from_id);
        let to_price = self.normalized_price(to_id);
        let usd_value = self.unwrap_math(math::collateral_value_usd(amount, from_price));
        let to_amount = self.unwrap_math(math::collateral_amount_from_usd(usd_value, to_price));
        // Dust whose value floors to zero would debit the source for nothing.
        if to_amount.is_zero() {
            self.env().revert(EngineError::ZeroAmount);
        }

        self.debit_collateral(caller, from_id, amount);
        self.credit_collateral(caller, to_id, to_amount);

        if !self.debt_of(caller).is_zero() {
            self.assert_ratio(caller);
        }

        self.pull_collateral(to_id, caller, to_amount);
    }

    // ========== Queries ==========

    /// Get a user's collateral balance for a class
    pub fn collateral_balance(&self, user: Address, collateral_id: CollateralId) -> U256 {
        self.collateral.get(&(user, collateral_id)).unwrap_or(U256::zero())
    }

    /// Get a user's outstanding IDRW debt
    pub fn debt_of(&self, user: Address) -> U256 {
        self.debt.get(&user).unwrap_or(U256::zero())
    }

    /// Get a user's total collateral value in 18-decimal USD
    pub fn total_collateral_value_usd(&self, user: Address) -> U256 {
        let mut total = U256::zero();
        for collateral_id in [CollateralId::Weth, CollateralId::Wbtc] {
            let balance = self.collateral_balance(user, collateral_id);
            if balance.is_zero() {
                continue;
            }
            let price = self.normalized_price(collateral_id);
            let value = self.unwrap_math(math::collateral_value_usd(balance, price));
            total = self.checked(total.checked_add(value));
        }
        total
    }

    /// Largest IDRW amount the user could mint without breaking the ratio
    pub fn get_max_mintable_idrw(&self, user: Address) -> U256 {
        let total_value = self.total_collateral_value_usd(user);
        let debt = self.debt_of(user);
        self.unwrap_math(math::max_mintable(total_value, debt, COLLATERAL_RATIO_PERCENT))
    }

    /// USD value of an amount of a collateral class at the current price
    pub fn get_collateral_value_usd(&self, collateral_id: CollateralId, amount: U256) -> U256 {
        let price = self.normalized_price(collateral_id);
        self.unwrap_math(math::collateral_value_usd(amount, price))
    }

    /// Collateral amount equivalent to a USD value at the current price
    pub fn get_collateral_amount_from_usd(
        &self,
        collateral_id: CollateralId,
        usd_value: U256,
    ) -> U256 {
        let price = self.normalized_price(collateral_id);
        self.unwrap_math(math::collateral_amount_from_usd(usd_value, price))
    }

    /// Get the protocol collateralization ratio in whole percent
    pub fn collateral_ratio_percent(&self) -> u32 {
        COLLATERAL_RATIO_PERCENT
    }

    /// Get total collateral held for a class
    pub fn get_total_collateral(&self, collateral_id: CollateralId) -> U256 {
        self.total_collateral.get(&collateral_id).unwrap_or(U256::zero())
    }

    /// Get total outstanding IDRW debt
    pub fn get_total_debt(&self) -> U256 {
        self.total_debt.get().unwrap_or(U256::zero())
    }

    /// Get the IDRW token address
    pub fn get_idrw_token(&self) -> Option<Address> {
        self.idrw_token.get()
    }

    /// Get the collateral token address for a class
    pub fn get_collateral_token(&self, collateral_id: CollateralId) -> Option<Address> {
        match collateral_id {
            CollateralId::Weth => self.weth_token.get(),
            CollateralId::Wbtc => self.wbtc_token.get(),
        }
    }

    /// Get the price feed address for a class
    pub fn get_price_feed(&self, collateral_id: CollateralId) -> Option<Address> {
        match collateral_id {
            CollateralId::Weth => self.weth_feed.get(),
            CollateralId::Wbtc => self.wbtc_feed.get(),
        }
    }

    // ========== Internal: accounting ==========

    fn credit_collateral(&mut self, user: Address, collateral_id: CollateralId, amount: U256) {
        let balance = self.collateral_balance(user, collateral_id);
        let new_balance = self.checked(balance.checked_add(amount));
        self.collateral.set(&(user, collateral_id), new_balance);

        let total = self.get_total_collateral(collateral_id);
        let new_total = self.checked(total.checked_add(amount));
        self.total_collateral.set(&collateral_id, new_total);
    }

    fn debit_collateral(&mut self, user: Address, collateral_id: CollateralId, amount: U256) {
        let balance = self.collateral_balance(user, collateral_id);
        if balance < amount {
            self.env().revert(EngineError::InsufficientCollateral);
        }

        self.collateral.set(&(user, collateral_id), balance - amount);
        let total = self.get_total_collateral(collateral_id);
        self.total_collateral.set(&collateral_id, total - amount);
    }

    fn assert_ratio(&self, user: Address) {
        let total_value = self.total_collateral_value_usd(user);
        let debt = self.debt_of(user);
        let satisfied = self.unwrap_math(math::is_ratio_satisfied(
            total_value,
            debt,
            COLLATERAL_RATIO_PERCENT,
        ));
        if !satisfied {
            self.env().revert(EngineError::BreaksCollateralRatio);
        }
    }

    // ========== Internal: cross-contract ==========

    fn pull_collateral(&self, collateral_id: CollateralId, from: Address, amount: U256) {
        if amount.is_zero() {
            return;
        }
        let token = self.collateral_token_address(collateral_id);
        let args = runtime_args! {
            "owner" => from,
            "recipient" => self.env().self_address(),
            "amount" => amount,
        };
        let ok: bool = self
            .env()
            .call_contract(token, CallDef::new("transfer_from", true, args));
        if !ok {
            self.env().revert(EngineError::InsufficientTokenBalance);
        }
    }

    fn push_collateral(&self, collateral_id: CollateralId, to: Address, amount: U256) {
        let token = self.collateral_token_address(collateral_id);
        let args = runtime_args! {
            "recipient" => to,
            "amount" => amount,
        };
        let ok: bool = self
            .env()
            .call_contract(token, CallDef::new("transfer", true, args));
        if !ok {
            self.env().revert(EngineError::InsufficientTokenBalance);
        }
    }

    fn normalized_price(&self, collateral_id: CollateralId) -> U256 {
        let feed = self.feed_address(collateral_id);
        OracleAdapter::normalized_price(&self.env(), feed)
    }

    fn idrw_token_address(&self) -> Address {
        self.idrw_token
            .get()
            .unwrap_or_else(|| self.env().revert(EngineError::InvalidConfig))
    }

    fn collateral_token_address(&self, collateral_id: CollateralId) -> Address {
        self.get_collateral_token(collateral_id)
            .unwrap_or_else(|| self.env().revert(EngineError::InvalidConfig))
    }

    fn feed_address(&self, collateral_id: CollateralId) -> Address {
        self.get_price_feed(collateral_id)
            .unwrap_or_else(|| self.env().revert(EngineError::InvalidConfig))
    }

    fn unwrap_math<T>(&self, result: Result<T, EngineError>) -> T {
        result.unwrap_or_else(|error| self.env().revert(error))
    }

    fn checked(&self, value: Option<U256>) -> U256 {
        value.unwrap_or_else(|| self.env().revert(EngineError::ArithmeticOverflow))
    }
}
