//! Stages 3+4: Implied Volatility and Greeks
//!
//! Inverts Black-Scholes per contract at the mid premium, then computes the
//! Greeks at the solved vol. The two results travel together: a contract
//! either gets both or neither. Solver failures are expected (stale quotes,
//! premiums below intrinsic, expired rows) and never abort the batch.

use tracing::debug;

use crate::core::OptionContract;
use crate::models::black_scholes;

/// Solve implied volatility and compute Greeks for a batch
///
/// Contracts with non-positive DTE or a non-positive mid premium are
/// skipped; contracts where the solver fails keep absent vol and Greeks.
pub fn solve_iv_and_greeks(
    mut contracts: Vec<OptionContract>,
    risk_free_rate: f64,
) -> Vec<OptionContract> {
    for contract in &mut contracts {
        if contract.dte <= 0 || contract.mid_premium <= 0.0 {
            continue;
        }

        let time = contract.time_to_expiry();
        match black_scholes::implied_volatility(
            contract.mid_premium,
            contract.underlying_price,
            contract.strike,
            risk_free_rate,
            time,
            contract.kind,
        ) {
            Ok(vol) => {
                contract.implied_vol = Some(vol);
                contract.greeks = Some(black_scholes::greeks(
                    contract.underlying_price,
                    contract.strike,
                    risk_free_rate,
                    vol,
                    time,
                    contract.kind,
                ));
            }
            Err(e) => {
                debug!(
                    "No implied vol for {} {} {}: {}",
                    contract.ticker,
                    contract.strike,
                    contract.expiration,
                    e
                );
            }
        }
    }

    contracts
}
