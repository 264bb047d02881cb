//! Collateral token support.
//!
//! The engine consumes the two collateral assets through the standard CEP-18
//! surface declared here. `CollateralToken` is a reference implementation
//! (18 decimals, admin-mintable) standing in for the external WETH/WBTC
//! ledgers in tests and demos.

use odra::casper_types::U256;
use odra::prelude::*;

use crate::errors::EngineError;

/// CEP-18 token interface for cross-contract calls
#[odra::external_contract]
pub trait Cep18Token {
    fn transfer(&mut self, recipient: Address, amount: U256) -> bool;
    fn transfer_from(&mut self, owner: Address, recipient: Address, amount: U256) -> bool;
    fn approve(&mut self, spender: Address, amount: U256) -> bool;
    fn allowance(&self, owner: Address, spender: Address) -> U256;
    fn balance_of(&self, account: Address) -> U256;
    fn total_supply(&self) -> U256;
}

/// Reference CEP-18 collateral token
#[odra::module]
pub struct CollateralToken {
    /// Token name
    name: Var<String>,
    /// Token symbol
    symbol: Var<String>,
    /// Total supply
    total_supply: Var<U256>,
    /// Balance mapping
    balances: Mapping<Address, U256>,
    /// Allowance mapping (owner -> spender -> amount)
    allowances: Mapping<(Address, Address), U256>,
    /// Admin allowed to mint supply
    admin: Var<Address>,
}

#[odra::module]
impl CollateralToken {
    /// Initialize the token; the deployer becomes admin.
    pub fn init(&mut self, name: String, symbol: String) {
        self.name.set(name);
        self.symbol.set(symbol);
        self.total_supply.set(U256::zero());
        self.admin.set(self.env().caller());
    }

    /// Get token name
    pub fn name(&self) -> String {
        self.name.get().unwrap_or_default()
    }

    /// Get token symbol
    pub fn symbol(&self) -> String {
        self.symbol.get().unwrap_or_default()
    }

    /// Get decimals (fixed at 18)
    pub fn decimals(&self) -> u8 {
        18
    }

    /// Get total supply
    pub fn total_supply(&self) -> U256 {
        self.total_supply.get().unwrap_or(U256::zero())
    }

    /// Get balance of an account
    pub fn balance_of(&self, account: Address) -> U256 {
        self.balances.get(&account).unwrap_or(U256::zero())
    }

    /// Get allowance for spender
    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances.get(&(owner, spender)).unwrap_or(U256::zero())
    }

    /// Transfer tokens to recipient
    pub fn transfer(&mut self, recipient: Address, amount: U256) -> bool {
        let sender = self.env().caller();
        self.transfer_internal(sender, recipient, amount);
        true
    }

    /// Approve spender to spend tokens
    pub fn approve(&mut self, spender: Address, amount: U256) -> bool {
        let owner = self.env().caller();
        self.allowances.set(&(owner, spender), amount);
        true
    }

    /// Transfer tokens from owner to recipient (requires allowance)
    pub fn transfer_from(&mut self, owner: Address, recipient: Address, amount: U256) -> bool {
        let spender = self.env().caller();

        let current_allowance = self.allowance(owner, spender);
        if current_allowance < amount {
            self.env().revert(EngineError::InsufficientAllowance);
        }

        self.transfer_internal(owner, recipient, amount);
        self.allowances.set(&(owner, spender), current_allowance - amount);
        true
    }

    /// Mint supply to an account (admin only)
    pub fn mint(&mut self, to: Address, amount: U256) {
        self.require_admin();

        if amount.is_zero() {
            self.env().revert(EngineError::ZeroAmount);
        }

        let new_balance = self
            .balance_of(to)
            .checked_add(amount)
            .unwrap_or_else(|| self.env().revert(EngineError::ArithmeticOverflow));
        let new_supply = self
            .total_supply()
            .checked_add(amount)
            .unwrap_or_else(|| self.env().revert(EngineError::ArithmeticOverflow));

        self.balances.set(&to, new_balance);
        self.total_supply.set(new_supply);
    }

    fn transfer_internal(&mut self, from: Address, to: Address, amount: U256) {
        let from_balance = self.balance_of(from);
        if from_balance < amount {
            self.env().revert(EngineError::InsufficientTokenBalance);
        }

        self.balances.set(&from, from_balance - amount);

        let new_to_balance = self
            .balance_of(to)
            .checked_add(amount)
            .unwrap_or_else(|| self.env().revert(EngineError::ArithmeticOverflow));
        self.balances.set(&to, new_to_balance);
    }

    fn require_admin(&self) {
        let caller = self.env().caller();
        match self.admin.get() {
            Some(admin) if caller == admin => {}
            _ => self.env().revert(EngineError::NotAuthorized),
        }
    }
}
