//! Reference aggregator feed for collateral USD prices.
//!
//! Chainlink-style interface: a signed answer in the feed's native decimal
//! precision plus the update timestamp. The answer is settable by the feed
//! operator, so both live updates and oracle failures (zero or negative
//! answers) can be exercised against the engine.

use odra::prelude::*;

use crate::errors::EngineError;
use crate::types::PriceQuote;

/// Static price feed contract
#[odra::module]
pub struct StaticPriceFeed {
    /// Operator allowed to push answers
    operator: Var<Address>,
    /// Latest signed answer in the feed's native precision
    answer: Var<i64>,
    /// Decimal places for the answer
    decimals: Var<u8>,
    /// Timestamp of the latest update, in seconds
    updated_at: Var<u64>,
}

#[odra::module]
impl StaticPriceFeed {
    /// Initialize the feed with its first answer; the deployer becomes operator.
    pub fn init(&mut self, answer: i64, decimals: u8) {
        self.operator.set(self.env().caller());
        self.answer.set(answer);
        self.decimals.set(decimals);
        self.updated_at.set(self.env().get_block_time());
    }

    /// Latest round data for consumers.
    pub fn latest_round_data(&self) -> PriceQuote {
        PriceQuote {
            price: self.answer.get().unwrap_or(0),
            decimals: self.decimals.get().unwrap_or(0),
            updated_at: self.updated_at.get().unwrap_or(0),
        }
    }

    /// Push a new answer (operator only).
    ///
    /// Non-positive answers are accepted on purpose: consumers must treat
    /// them as an unavailable feed.
    pub fn set_answer(&mut self, answer: i64) {
        self.require_operator();
        self.answer.set(answer);
        self.updated_at.set(self.env().get_block_time());
    }

    /// Get the feed's decimal precision.
    pub fn get_decimals(&self) -> u8 {
        self.decimals.get().unwrap_or(0)
    }

    /// Get the feed operator.
    pub fn get_operator(&self) -> Option<Address> {
        self.operator.get()
    }

    fn require_operator(&self) {
        let caller = self.env().caller();
        match self.operator.get() {
            Some(operator) if caller == operator => {}
            _ => self.env().revert(EngineError::NotAuthorized),
        }
    }
}
