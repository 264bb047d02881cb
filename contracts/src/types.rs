//! Common types used across the IDRW engine.

use odra::prelude::*;

/// Collateral class identifier
#[odra::odra_type]
#[derive(Copy, PartialOrd, Ord)]
pub enum CollateralId {
    /// Wrapped Ether (CEP-18, 18 decimals)
    Weth,
    /// Wrapped Bitcoin (CEP-18, 18 decimals)
    Wbtc,
}

/// Raw price quote as returned by an aggregator feed.
///
/// Ephemeral: the engine re-queries the feed on every valuation and never
/// persists a quote, so staleness is a property of the upstream feed.
#[odra::odra_type]
#[derive(Copy)]
pub struct PriceQuote {
    /// Signed integer price in the feed's native precision
    pub price: i64,
    /// Decimal places for `price`
    pub decimals: u8,
    /// Timestamp of the feed's last update, in seconds
    pub updated_at: u64,
}
