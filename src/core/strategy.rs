//! Screening strategies
//!
//! A strategy is resolved once per run and carries everything that differs
//! between selling puts and selling calls: which side of the chain to look
//! at, how the target price scales off spot, and which side of the target a
//! strike must sit on.

use serde::{Deserialize, Serialize};

use super::contract::OptionKind;

/// Wheel strategy being screened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    /// Sell a put, hold cash to cover assignment
    CashSecuredPut,
    /// Sell a call against shares already held
    CoveredCall,
}

impl Strategy {
    /// Side of the chain this strategy screens
    pub fn option_kind(&self) -> OptionKind {
        match self {
            Strategy::CashSecuredPut => OptionKind::Put,
            Strategy::CoveredCall => OptionKind::Call,
        }
    }

    /// Target-price multiplier for a required stock move
    ///
    /// Puts target a drawdown (`1 - pct/100`), calls an upside move
    /// (`1 + pct/100`).
    pub fn target_multiplier(&self, stock_move_pct: f64) -> f64 {
        match self {
            Strategy::CashSecuredPut => 1.0 - stock_move_pct / 100.0,
            Strategy::CoveredCall => 1.0 + stock_move_pct / 100.0,
        }
    }

    /// Does a strike sit on the acceptable side of the target price?
    ///
    /// Selling puts wants strikes at or below the target; selling calls
    /// wants strikes at or above it.
    pub fn strike_within_target(&self, strike: f64, target_price: f64) -> bool {
        match self {
            Strategy::CashSecuredPut => strike <= target_price,
            Strategy::CoveredCall => strike >= target_price,
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::CashSecuredPut => "Cash-secured puts",
            Strategy::CoveredCall => "Covered calls",
        }
    }
}
