//! Core data types for the wheel screener
//!
//! Defines fundamental types:
//! - RawOptionRow / ChainSnapshot: chain data as fetched
//! - OptionContract: normalized contract with derived screening metrics
//! - Strategy: cash-secured put vs covered call, resolved once per run
//! - Greeks: sensitivities computed alongside implied volatility

pub mod contract;
pub mod error;
pub mod greeks;
pub mod strategy;

pub use contract::*;
pub use error::*;
pub use greeks::*;
pub use strategy::*;
