//! Stage 5: Probability of Profit
//!
//! Maps delta through the standard normal CDF to estimate the chance the
//! short option expires profitably. Contracts without a delta (solver
//! failed upstream) keep an absent POP.

use crate::core::{OptionContract, Strategy};
use crate::models::black_scholes::norm_cdf;

/// Estimate probability of profit for a batch
pub fn estimate_pop(mut contracts: Vec<OptionContract>, strategy: Strategy) -> Vec<OptionContract> {
    for contract in &mut contracts {
        contract.pop_pct = contract.delta().map(|delta| pop_from_delta(delta, strategy));
    }
    contracts
}

/// POP for a single delta, in percent
///
/// Cash-secured puts use `(1 - Φ(-delta)) * 100`, covered calls
/// `(1 - Φ(delta)) * 100`. Delta arrives signed (negative for puts).
pub fn pop_from_delta(delta: f64, strategy: Strategy) -> f64 {
    match strategy {
        Strategy::CashSecuredPut => (1.0 - norm_cdf(-delta)) * 100.0,
        Strategy::CoveredCall => (1.0 - norm_cdf(delta)) * 100.0,
    }
}
