//! IDRW-CDP Contracts
//!
//! Over-collateralized stablecoin issuance engine for Casper.
//!
//! ## Architecture
//!
//! - **IdrwEngine**: collateral accounting, 150% ratio enforcement, and
//!   exclusive mint/burn authority over IDRW
//! - **Idrw**: CEP-18 stablecoin with a single engine-held minter
//! - **OracleAdapter**: normalizes aggregator feed prices to 18-decimal USD
//! - **StaticPriceFeed**: settable reference aggregator feed
//! - **CollateralToken**: CEP-18 reference collateral (WETH/WBTC stand-in)
//!
//! ## Invariant
//!
//! For every user with nonzero debt, after every successful operation:
//! `total_collateral_value_usd * 100 >= debt * 150`. Any operation that
//! would violate this fails whole, with no state change.

#![cfg_attr(target_arch = "wasm32", no_std)]

#[cfg(target_arch = "wasm32")]
extern crate alloc;

// Re-export odra for downstream usage
pub use odra;

// Core module declarations
pub mod errors;
pub mod math;
pub mod types;

// Contract modules
pub mod collateral_token;
pub mod engine;
pub mod oracle_adapter;
pub mod price_feed;
pub mod stablecoin;
