//! # Wheel Screener - Option Income Contract Screening
//!
//! A screening library for the two income legs of the wheel: cash-secured
//! puts and covered calls on US equity options.
//!
//! ## Overview
//!
//! The screener turns one side of an option chain into a ranked candidate
//! list:
//! - **Normalize**: coerce raw chain rows, parse expirations, compute DTE
//! - **Returns**: mid premium, target price, total and annualized return
//! - **Volatility & Greeks**: invert Black-Scholes per contract, then
//!   delta/gamma/theta/vega at the solved vol
//! - **Probability of profit**: delta mapped through the normal CDF
//! - **Filter & rank**: liquidity and return thresholds, best annualized
//!   return first
//!
//! Contracts where a metric cannot be computed keep going with that metric
//! absent; one bad quote never sinks a batch.
//!
//! ## Key Components
//!
//! - **Data Fetching**: Yahoo Finance chains with local snapshot caching
//! - **Black-Scholes**: baseline pricing, IV solver, Greeks
//! - **Screening Pipeline**: pure batch stages behind a `Screener` facade
//! - **Reporting**: fixed-width console tables
//!
//! ## Usage
//!
//! ```rust,no_run
//! use wheel_screener::prelude::*;
//!
//! let today = chrono::Utc::now().date_naive();
//!
//! // Fetch the put side of the chain for the 7..45 day window
//! let snapshot = fetch_chain_snapshot("AAPL", OptionKind::Put, today, 7, 45).unwrap();
//!
//! // Screen for cash-secured puts struck 10% below spot
//! let request = ScreenRequest::cash_secured_put(10.0);
//! let outcome = screen_chain(&snapshot.rows, snapshot.current_price, today, request).unwrap();
//!
//! print_table(&outcome);
//! ```
//!
//! ## What This Screener Does
//!
//! - Ranks contracts by annualized premium return
//! - Solves implied volatility from mid quotes
//! - Estimates probability of profit from delta
//! - Caches chain snapshots for offline replay
//!
//! ## What This Screener Does NOT Do
//!
//! - Place or manage orders
//! - Predict future prices or volatility
//! - Model dividends or early exercise (European pricing throughout)
//! - Stream real-time data (Yahoo quotes are delayed)

pub mod core;
pub mod data;
pub mod models;
pub mod report;
pub mod screen;

/// Prelude with commonly used types
pub mod prelude {
    // Core types
    pub use crate::core::{
        ChainSnapshot, Greeks, OptionContract, OptionKind, RawOptionRow, ScreenError,
        ScreenResult, Strategy,
    };

    // Data fetching
    pub use crate::data::{
        fetch_chain_snapshot, CacheConfig, CachedFetcher, SnapshotCache, SpotQuote, YahooClient,
    };

    // Black-Scholes
    pub use crate::models::{
        greeks as bs_greeks, implied_volatility, norm_cdf, norm_pdf, price as bs_price,
    };

    // Screening pipeline
    pub use crate::screen::{
        compute_returns,
        estimate_pop,
        filter_and_rank,
        normalize,
        screen_chain,
        solve_iv_and_greeks,
        ScreenOutcome,
        // Config
        ScreenRequest,
        // Facade
        Screener,
        Thresholds,
    };

    // Reporting
    pub use crate::report::print_table;
}

// Re-export main types at crate root
pub use crate::core::{ScreenError, ScreenResult};
pub use crate::screen::{ScreenRequest, Screener};
