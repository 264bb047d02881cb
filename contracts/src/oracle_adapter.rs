//! Price oracle adapter.
//!
//! Wraps one aggregator feed per collateral class and normalizes the feed's
//! native decimal precision to a canonical 18-decimal USD price. Every
//! valuation re-queries the feed; nothing is cached, so price staleness is a
//! property of the upstream feed, not the engine.

use odra::casper_types::{runtime_args, U256};
use odra::prelude::*;

use crate::errors::EngineError;
use crate::math;
use crate::types::PriceQuote;

/// Aggregator feed trait for cross-contract calls
#[odra::external_contract]
pub trait AggregatorFeed {
    /// Latest answer with its native decimal precision and update time
    fn latest_round_data(&self) -> PriceQuote;
}

/// Helper for feed queries issued from the engine
pub struct OracleAdapter;

impl OracleAdapter {
    /// Read the raw quote from a feed contract.
    pub fn latest_quote(env: &odra::ContractEnv, feed: Address) -> PriceQuote {
        let call_def = odra::CallDef::new("latest_round_data", false, runtime_args! {});
        env.call_contract::<PriceQuote>(feed, call_def)
    }

    /// Read a feed and normalize its answer to an 18-decimal USD price.
    ///
    /// Reverts with `OracleUnavailable` on a non-positive answer; a failed
    /// feed call aborts the deploy on its own.
    pub fn normalized_price(env: &odra::ContractEnv, feed: Address) -> U256 {
        let quote = Self::latest_quote(env, feed);
        match math::normalize_price(quote.price, quote.decimals) {
            Ok(price) => price,
            Err(error) => env.revert(error),
        }
    }
}
