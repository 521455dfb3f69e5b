//! Stage 2: Return Computation
//!
//! Mid premium, target price, and total/annualized return. The return basis
//! is strategy-specific: puts measure premium against the strike (the cash
//! securing assignment), calls against the caller's cost basis in the shares.

use crate::core::{OptionContract, ScreenError, ScreenResult, Strategy};

/// Compute return metrics for a batch
///
/// Fails with `MissingCostBasis` before touching any contract when the
/// strategy is covered calls and no positive cost basis was supplied.
/// Contracts where annualization is undefined (zero or negative DTE) keep
/// an absent annualized return and stay in the batch.
///
/// # Arguments
/// * `contracts` - Normalized contracts
/// * `strategy` - Determines the return basis
/// * `multiplier` - Target-price multiplier (see [`Strategy::target_multiplier`])
/// * `cost_basis` - Per-share cost basis for covered calls
pub fn compute_returns(
    mut contracts: Vec<OptionContract>,
    strategy: Strategy,
    multiplier: f64,
    cost_basis: Option<f64>,
) -> ScreenResult<Vec<OptionContract>> {
    let call_basis = match strategy {
        Strategy::CoveredCall => match cost_basis {
            Some(b) if b > 0.0 => Some(b),
            _ => return Err(ScreenError::MissingCostBasis),
        },
        Strategy::CashSecuredPut => None,
    };

    for contract in &mut contracts {
        contract.mid_premium = (contract.bid + contract.ask) / 2.0;
        contract.target_price = contract.underlying_price * multiplier;

        let basis = call_basis.unwrap_or(contract.strike);
        contract.total_return_pct = contract.mid_premium * 100.0 / basis;
        contract.annualized_return_pct =
            annualized_return(contract.total_return_pct, contract.dte).ok();
    }

    Ok(contracts)
}

/// Annualize a total return over `dte` days by daily compounding
///
/// `((1 + r/100)^(365/dte) - 1) * 100`, rounded to 3 decimal places.
/// Undefined for non-positive DTE, and for a non-positive compounding base
/// (a backstop: normalized premiums cannot actually drive the base below
/// zero).
pub fn annualized_return(total_return_pct: f64, dte: i64) -> ScreenResult<f64> {
    if dte <= 0 {
        return Err(ScreenError::undefined_annualization(format!(
            "{} days to expiration",
            dte
        )));
    }

    let base = 1.0 + total_return_pct / 100.0;
    if base <= 0.0 {
        return Err(ScreenError::undefined_annualization(format!(
            "non-positive compounding base {:.4}",
            base
        )));
    }

    let annualized = (base.powf(365.0 / dte as f64) - 1.0) * 100.0;
    Ok((annualized * 1000.0).round() / 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::OptionKind;
    use chrono::NaiveDate;

    fn contract(strike: f64, bid: f64, ask: f64, dte: i64) -> OptionContract {
        OptionContract {
            ticker: "AAPL".to_string(),
            kind: OptionKind::Put,
            strike,
            expiration: NaiveDate::from_ymd_opt(2024, 2, 16).unwrap(),
            bid,
            ask,
            last: 0.0,
            volume: 0,
            open_interest: 0,
            underlying_price: 100.0,
            dte,
            mid_premium: 0.0,
            target_price: 0.0,
            total_return_pct: 0.0,
            annualized_return_pct: None,
            implied_vol: None,
            greeks: None,
            pop_pct: None,
        }
    }

    #[test]
    fn test_put_returns_use_strike_basis() {
        let contracts = vec![contract(90.0, 1.0, 1.2, 30)];
        let out = compute_returns(contracts, Strategy::CashSecuredPut, 0.95, None).unwrap();
        let c = &out[0];

        assert!((c.mid_premium - 1.10).abs() < 1e-12);
        assert!((c.target_price - 95.0).abs() < 1e-12);
        // 1.10 * 100 / 90 = 1.2222%
        assert!((c.total_return_pct - 1.2222222).abs() < 1e-4);
        // ((1.0122222)^(365/30) - 1) * 100 = 15.928% to 3 dp
        let annualized = c.annualized_return_pct.unwrap();
        assert!((annualized - 15.928).abs() < 0.005);
    }

    #[test]
    fn test_call_returns_use_cost_basis() {
        let mut c = contract(110.0, 2.0, 2.4, 30);
        c.kind = OptionKind::Call;
        let out = compute_returns(vec![c], Strategy::CoveredCall, 1.05, Some(80.0)).unwrap();

        // 2.20 * 100 / 80 = 2.75%
        assert!((out[0].total_return_pct - 2.75).abs() < 1e-12);
        assert!((out[0].target_price - 105.0).abs() < 1e-12);
    }

    #[test]
    fn test_covered_call_without_cost_basis_fails_fast() {
        let contracts = vec![contract(110.0, 2.0, 2.4, 30)];
        assert!(matches!(
            compute_returns(contracts.clone(), Strategy::CoveredCall, 1.05, None),
            Err(ScreenError::MissingCostBasis)
        ));
        assert!(matches!(
            compute_returns(contracts, Strategy::CoveredCall, 1.05, Some(-5.0)),
            Err(ScreenError::MissingCostBasis)
        ));
    }

    #[test]
    fn test_zero_dte_leaves_annualized_absent() {
        let contracts = vec![contract(90.0, 1.0, 1.2, 0), contract(90.0, 1.0, 1.2, -3)];
        let out = compute_returns(contracts, Strategy::CashSecuredPut, 0.95, None).unwrap();

        // Contracts are retained, total return still computed
        assert_eq!(out.len(), 2);
        assert!(out[0].total_return_pct > 0.0);
        assert!(out[0].annualized_return_pct.is_none());
        assert!(out[1].annualized_return_pct.is_none());
    }

    #[test]
    fn test_annualized_return_formula() {
        // 2% over 73 days: (1.02)^5 - 1 = 10.408%
        let r = annualized_return(2.0, 73).unwrap();
        assert!((r - 10.408).abs() < 0.001);

        // Rounded to exactly 3 decimal places
        assert_eq!(r, (r * 1000.0).round() / 1000.0);
    }

    #[test]
    fn test_annualized_return_is_deterministic() {
        let first = annualized_return(1.2345, 21).unwrap();
        let second = annualized_return(1.2345, 21).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_annualized_return_undefined_cases() {
        assert!(annualized_return(2.0, 0).is_err());
        assert!(annualized_return(2.0, -7).is_err());
        // Base at or below zero never turns into a NaN
        assert!(annualized_return(-100.0, 30).is_err());
        assert!(annualized_return(-150.0, 30).is_err());
    }

    #[test]
    fn test_one_year_dte_is_identity() {
        let r = annualized_return(5.0, 365).unwrap();
        assert!((r - 5.0).abs() < 1e-9);
    }
}
