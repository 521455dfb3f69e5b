//! Pricing model
//!
//! Black-Scholes pricing, Greeks, and the implied volatility solver the
//! screening pipeline inverts per contract.

pub mod black_scholes;

pub use black_scholes::*;
