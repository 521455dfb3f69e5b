//! Contract Screening Pipeline
//!
//! Turns raw option-chain rows into a ranked list of wheel candidates.
//!
//! Six-stage pipeline:
//! 1. **Normalize**: coerce raw fields, parse expirations, compute DTE
//! 2. **Returns**: mid premium, target price, total and annualized return
//! 3. **Volatility**: invert Black-Scholes for implied vol per contract
//! 4. **Greeks**: delta/gamma/theta/vega at the solved vol
//! 5. **Probability of profit**: map delta through the normal CDF
//! 6. **Filter & rank**: threshold predicates, then sort by annualized
//!    return descending with DTE as the tiebreak
//!
//! Every stage is a pure transformation over one batch (one ticker, one side
//! of the chain); nothing here touches the network or the clock.

mod config;
mod filter;
mod normalize;
mod pop;
mod returns;
mod screener;
mod volatility;

pub use config::*;
pub use filter::*;
pub use normalize::*;
pub use pop::*;
pub use returns::*;
pub use screener::*;
pub use volatility::*;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::OptionContract;

/// Result of a full screening run over one batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenOutcome {
    /// Surviving contracts, ranked best-first
    pub contracts: Vec<OptionContract>,
    /// Underlying price the batch was screened against
    pub current_price: f64,
    /// Evaluation date used for DTE
    pub evaluation_date: NaiveDate,
    /// Raw rows received
    pub rows_in: usize,
    /// Rows dropped as invalid during normalization
    pub dropped: usize,
    /// Contracts with a solved implied volatility
    pub solved: usize,
    /// Configuration used
    pub request: ScreenRequest,
}

impl ScreenOutcome {
    /// Best-ranked contracts, at most `n`
    pub fn top(&self, n: usize) -> &[OptionContract] {
        &self.contracts[..self.contracts.len().min(n)]
    }

    /// Ticker of the batch, if any contract survived
    pub fn ticker(&self) -> Option<&str> {
        self.contracts.first().map(|c| c.ticker.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }
}
