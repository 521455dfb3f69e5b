//! Configuration for the screening pipeline

use serde::{Deserialize, Serialize};

use crate::core::{ScreenError, ScreenResult, Strategy};

/// Full per-run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenRequest {
    /// Strategy being screened
    pub strategy: Strategy,

    /// Required stock move before the strike is in play, in percent
    /// (drawdown for puts, upside for calls)
    /// Default: 15.0
    pub stock_move_pct: f64,

    /// Filter thresholds
    pub thresholds: Thresholds,

    /// Risk-free rate for the volatility solver
    /// Default: 0.01
    pub risk_free_rate: f64,

    /// Cost basis per share; required for covered calls, ignored for puts
    pub cost_basis: Option<f64>,
}

impl Default for ScreenRequest {
    fn default() -> Self {
        Self {
            strategy: Strategy::CashSecuredPut,
            stock_move_pct: 15.0,
            thresholds: Thresholds::default(),
            risk_free_rate: 0.01,
            cost_basis: None,
        }
    }
}

impl ScreenRequest {
    /// Cash-secured put request with default thresholds
    pub fn cash_secured_put(stock_move_pct: f64) -> Self {
        Self {
            strategy: Strategy::CashSecuredPut,
            stock_move_pct,
            ..Default::default()
        }
    }

    /// Covered call request with default thresholds
    pub fn covered_call(stock_move_pct: f64, cost_basis: f64) -> Self {
        Self {
            strategy: Strategy::CoveredCall,
            stock_move_pct,
            cost_basis: Some(cost_basis),
            ..Default::default()
        }
    }

    /// Target-price multiplier implied by the strategy and stock move
    pub fn target_multiplier(&self) -> f64 {
        self.strategy.target_multiplier(self.stock_move_pct)
    }

    /// Validate the request before any contract is touched
    pub fn validate(&self) -> ScreenResult<()> {
        if self.strategy == Strategy::CoveredCall && !matches!(self.cost_basis, Some(b) if b > 0.0)
        {
            return Err(ScreenError::MissingCostBasis);
        }
        if self.stock_move_pct < 0.0 {
            return Err(ScreenError::invalid_input("Negative stock move"));
        }
        if self.thresholds.max_dte < self.thresholds.min_dte {
            return Err(ScreenError::invalid_input(format!(
                "Inverted DTE window: {}..{}",
                self.thresholds.min_dte, self.thresholds.max_dte
            )));
        }
        Ok(())
    }
}

/// Filter thresholds applied by the filter & rank stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thresholds {
    /// Minimum open interest
    /// Default: 10
    pub min_open_interest: u64,

    /// Minimum annualized return, in percent
    /// Default: 20.0
    pub min_annualized_return: f64,

    /// Minimum days to expiration
    /// Default: 7
    pub min_dte: i64,

    /// Maximum days to expiration
    /// Default: 45
    pub max_dte: i64,

    /// Minimum bid price
    /// Default: 0.1
    pub min_bid: f64,

    /// Minimum daily volume
    /// Default: 10
    pub min_volume: u64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_open_interest: 10,
            min_annualized_return: 20.0,
            min_dte: 7,
            max_dte: 45,
            min_bid: 0.1,
            min_volume: 10,
        }
    }
}
