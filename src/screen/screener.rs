//! Screener - facade over the full screening pipeline
//!
//! Validates the request once, then runs all six stages over a batch.

use chrono::NaiveDate;
use tracing::info;

use crate::core::{RawOptionRow, ScreenError, ScreenResult};

use super::{
    compute_returns, estimate_pop, filter_and_rank, normalize, solve_iv_and_greeks, ScreenOutcome,
    ScreenRequest,
};

/// Runs the screening pipeline for one configuration
pub struct Screener {
    request: ScreenRequest,
}

impl Screener {
    /// Create a screener with default configuration (cash-secured puts)
    pub fn new() -> Self {
        Self {
            request: ScreenRequest::default(),
        }
    }

    /// Create with a custom request
    pub fn with_request(request: ScreenRequest) -> Self {
        Self { request }
    }

    /// Get the current request
    pub fn request(&self) -> &ScreenRequest {
        &self.request
    }

    /// Replace the request
    pub fn set_request(&mut self, request: ScreenRequest) {
        self.request = request;
    }

    /// Run the full pipeline over one batch of raw rows
    ///
    /// # Arguments
    /// * `rows` - Raw chain rows for one ticker and one side of the chain
    /// * `current_price` - Underlying price at evaluation time
    /// * `evaluation_date` - Date DTE is measured from
    ///
    /// # Returns
    /// Ranked survivors plus batch counts, or the per-run configuration
    /// error that stopped the batch before any contract was processed.
    pub fn screen(
        &self,
        rows: &[RawOptionRow],
        current_price: f64,
        evaluation_date: NaiveDate,
    ) -> ScreenResult<ScreenOutcome> {
        self.request.validate()?;
        if current_price <= 0.0 {
            return Err(ScreenError::invalid_input(format!(
                "Non-positive underlying price {}",
                current_price
            )));
        }

        let contracts = normalize(rows, current_price, evaluation_date);
        let dropped = rows.len() - contracts.len();

        let contracts = compute_returns(
            contracts,
            self.request.strategy,
            self.request.target_multiplier(),
            self.request.cost_basis,
        )?;

        let contracts = solve_iv_and_greeks(contracts, self.request.risk_free_rate);
        let solved = contracts.iter().filter(|c| c.implied_vol.is_some()).count();

        let contracts = estimate_pop(contracts, self.request.strategy);

        let ranked = filter_and_rank(contracts, &self.request.thresholds, self.request.strategy);

        info!(
            "Screened {} rows: {} dropped, {} solved, {} survivors",
            rows.len(),
            dropped,
            solved,
            ranked.len()
        );

        Ok(ScreenOutcome {
            contracts: ranked,
            current_price,
            evaluation_date,
            rows_in: rows.len(),
            dropped,
            solved,
            request: self.request.clone(),
        })
    }
}

impl Default for Screener {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function to screen a batch with a given request
pub fn screen_chain(
    rows: &[RawOptionRow],
    current_price: f64,
    evaluation_date: NaiveDate,
    request: ScreenRequest,
) -> ScreenResult<ScreenOutcome> {
    Screener::with_request(request).screen(rows, current_price, evaluation_date)
}
