//! IDRW Stablecoin Contract
//!
//! CEP-18 compatible stable token with engine-controlled minting and burning.
//! A single minter — the collateral engine — holds exclusive mint/burn
//! authority, installed once at setup by the admin.

use odra::casper_types::U256;
use odra::prelude::*;

use crate::errors::EngineError;

const TOKEN_NAME: &str = "IDRW";
const TOKEN_SYMBOL: &str = "IDRW";
const TOKEN_DECIMALS: u8 = 18;

/// IDRW Stablecoin Contract
#[odra::module]
pub struct Idrw {
    /// Token name
    name: Var<String>,
    /// Token symbol
    symbol: Var<String>,
    /// Decimals (18 for IDRW)
    decimals: Var<u8>,
    /// Total supply
    total_supply: Var<U256>,
    /// Balance mapping
    balances: Mapping<Address, U256>,
    /// Allowance mapping (owner -> spender -> amount)
    allowances: Mapping<(Address, Address), U256>,
    /// Admin address (hands over mint authority at setup)
    admin: Var<Address>,
    /// The single address holding mint/burn authority
    minter: Var<Option<Address>>,
}

#[odra::module]
impl Idrw {
    /// Initialize the stablecoin; the deployer becomes admin.
    pub fn init(&mut self) {
        self.name.set(String::from(TOKEN_NAME));
        self.symbol.set(String::from(TOKEN_SYMBOL));
        self.decimals.set(TOKEN_DECIMALS);
        self.total_supply.set(U256::zero());
        self.admin.set(self.env().caller());
        self.minter.set(None);
    }

    // ========== CEP-18 Standard Functions ==========

    /// Get token name
    pub fn name(&self) -> String {
        self.name.get().unwrap_or_else(|| String::from(TOKEN_NAME))
    }

    /// Get token symbol
    pub fn symbol(&self) -> String {
        self.symbol.get().unwrap_or_else(|| String::from(TOKEN_SYMBOL))
    }

    /// Get decimals
    pub fn decimals(&self) -> u8 {
        self.decimals.get().unwrap_or(TOKEN_DECIMALS)
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

    // ========== Engine Functions (Restricted) ==========

    /// Mint new tokens (minter only)
    pub fn mint(&mut self, to: Address, amount: U256) {
        self.require_minter();

        if amount.is_zero() {
            self.env().revert(EngineError::ZeroAmount);
        }
        // Casper has no zero address; the token contract itself is the
        // nearest invalid destination.
        if to == self.env().self_address() {
            self.env().revert(EngineError::ZeroAddress);
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

    /// Burn tokens from caller
    pub fn burn(&mut self, amount: U256) {
        let caller = self.env().caller();
        self.burn_internal(caller, amount);
    }

    /// Burn tokens from an account (minter only, used for repayment)
    pub fn burn_from(&mut self, from: Address, amount: U256) {
        self.require_minter();
        self.burn_internal(from, amount);
    }

    // ========== Authority Functions ==========

    /// Install the minter (admin only, once).
    ///
    /// Done at setup, after the engine is deployed. A second call reverts:
    /// re-pointing the minter would let supply drift away from the engine's
    /// debt accounting.
    pub fn transfer_mint_authority(&mut self, minter: Address) {
        self.require_admin();
        if self.minter().is_some() {
            self.env().revert(EngineError::NotAuthorized);
        }
        self.minter.set(Some(minter));
    }

    /// Get the current minter
    pub fn minter(&self) -> Option<Address> {
        self.minter.get().flatten()
    }

    /// Check if an address holds mint authority
    pub fn is_minter(&self, account: Address) -> bool {
        self.minter().map_or(false, |minter| minter == account)
    }

    /// Get the admin address
    pub fn get_admin(&self) -> Option<Address> {
        self.admin.get()
    }

    // ========== Internal Functions ==========

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

    fn burn_internal(&mut self, from: Address, amount: U256) {
        if amount.is_zero() {
            self.env().revert(EngineError::ZeroAmount);
        }

        let current_balance = self.balance_of(from);
        if current_balance < amount {
            self.env().revert(EngineError::InsufficientTokenBalance);
        }

        self.balances.set(&from, current_balance - amount);
        self.total_supply.set(self.total_supply() - amount);
    }

    fn require_minter(&self) {
        let caller = self.env().caller();
        if !self.is_minter(caller) {
            self.env().revert(EngineError::NotAuthorized);
        }
    }

    fn require_admin(&self) {
        let caller = self.env().caller();
        match self.admin.get() {
            Some(admin) if caller == admin => {}
            _ => self.env().revert(EngineError::NotAuthorized),
        }
    }
}
