//! Stage 6: Filter & Rank
//!
//! Applies the threshold predicates and orders survivors by annualized
//! return (best first), breaking ties with the shorter DTE. The sort is
//! stable: contracts equal on both keys keep their input order.

use std::cmp::Ordering;

use crate::core::{OptionContract, Strategy};

use super::Thresholds;

/// Filter a batch against the thresholds and rank the survivors
pub fn filter_and_rank(
    contracts: Vec<OptionContract>,
    thresholds: &Thresholds,
    strategy: Strategy,
) -> Vec<OptionContract> {
    let mut kept: Vec<OptionContract> = contracts
        .into_iter()
        .filter(|c| passes(c, thresholds, strategy))
        .collect();

    kept.sort_by(|a, b| {
        b.annualized_return_pct
            .partial_cmp(&a.annualized_return_pct)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.dte.cmp(&b.dte))
    });

    kept
}

/// All predicates must hold for a contract to survive
///
/// An absent annualized return fails the return predicate; there is no
/// separate DTE validity check beyond the window itself.
fn passes(contract: &OptionContract, thresholds: &Thresholds, strategy: Strategy) -> bool {
    let return_ok = contract
        .annualized_return_pct
        .map(|r| r >= thresholds.min_annualized_return)
        .unwrap_or(false);

    strategy.strike_within_target(contract.strike, contract.target_price)
        && contract.open_interest >= thresholds.min_open_interest
        && return_ok
        && contract.dte >= thresholds.min_dte
        && contract.dte <= thresholds.max_dte
        && contract.bid >= thresholds.min_bid
        && contract.volume >= thresholds.min_volume
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::OptionKind;
    use chrono::NaiveDate;

    fn passing_contract() -> OptionContract {
        OptionContract {
            ticker: "AAPL".to_string(),
            kind: OptionKind::Put,
            strike: 90.0,
            expiration: NaiveDate::from_ymd_opt(2024, 2, 16).unwrap(),
            bid: 1.0,
            ask: 1.2,
            last: 1.1,
            volume: 50,
            open_interest: 200,
            underlying_price: 100.0,
            dte: 30,
            mid_premium: 1.1,
            target_price: 95.0,
            total_return_pct: 1.22,
            annualized_return_pct: Some(25.0),
            implied_vol: Some(0.3),
            greeks: None,
            pop_pct: None,
        }
    }

    fn thresholds() -> Thresholds {
        Thresholds::default()
    }

    #[test]
    fn test_passing_contract_survives() {
        let out = filter_and_rank(vec![passing_contract()], &thresholds(), Strategy::CashSecuredPut);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_put_strike_above_target_is_excluded() {
        let mut c = passing_contract();
        c.strike = 96.0; // target is 95
        let out = filter_and_rank(vec![c], &thresholds(), Strategy::CashSecuredPut);
        assert!(out.is_empty());
    }

    #[test]
    fn test_call_strike_below_target_is_excluded() {
        let mut c = passing_contract();
        c.kind = OptionKind::Call;
        c.strike = 100.0;
        c.target_price = 105.0;
        let out = filter_and_rank(vec![c], &thresholds(), Strategy::CoveredCall);
        assert!(out.is_empty());

        let mut c = passing_contract();
        c.kind = OptionKind::Call;
        c.strike = 110.0;
        c.target_price = 105.0;
        let out = filter_and_rank(vec![c], &thresholds(), Strategy::CoveredCall);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_absent_annualized_return_is_excluded() {
        let mut c = passing_contract();
        c.annualized_return_pct = None;
        let out = filter_and_rank(vec![c], &thresholds(), Strategy::CashSecuredPut);
        assert!(out.is_empty());
    }

    #[test]
    fn test_each_threshold_excludes() {
        let t = thresholds();

        let mut c = passing_contract();
        c.open_interest = 9;
        assert!(!passes(&c, &t, Strategy::CashSecuredPut));

        let mut c = passing_contract();
        c.annualized_return_pct = Some(19.9);
        assert!(!passes(&c, &t, Strategy::CashSecuredPut));

        let mut c = passing_contract();
        c.dte = 6;
        assert!(!passes(&c, &t, Strategy::CashSecuredPut));

        let mut c = passing_contract();
        c.dte = 46;
        assert!(!passes(&c, &t, Strategy::CashSecuredPut));

        let mut c = passing_contract();
        c.bid = 0.05;
        assert!(!passes(&c, &t, Strategy::CashSecuredPut));

        let mut c = passing_contract();
        c.volume = 9;
        assert!(!passes(&c, &t, Strategy::CashSecuredPut));
    }

    #[test]
    fn test_boundary_values_pass() {
        let t = thresholds();
        let mut c = passing_contract();
        c.open_interest = 10;
        c.volume = 10;
        c.dte = 7;
        c.bid = 0.1;
        c.annualized_return_pct = Some(20.0);
        assert!(passes(&c, &t, Strategy::CashSecuredPut));

        c.dte = 45;
        assert!(passes(&c, &t, Strategy::CashSecuredPut));
    }

    #[test]
    fn test_rank_by_annualized_then_dte() {
        let mut a = passing_contract();
        a.annualized_return_pct = Some(22.0);
        a.dte = 30;

        let mut b = passing_contract();
        b.annualized_return_pct = Some(30.0);
        b.dte = 40;

        let mut c = passing_contract();
        c.annualized_return_pct = Some(22.0);
        c.dte = 14;

        let out = filter_and_rank(vec![a, b, c], &thresholds(), Strategy::CashSecuredPut);

        // Highest annualized first, then shorter DTE among equals
        assert!((out[0].annualized_return_pct.unwrap() - 30.0).abs() < 1e-12);
        assert_eq!(out[1].dte, 14);
        assert_eq!(out[2].dte, 30);
    }

    #[test]
    fn test_rank_is_stable_for_full_ties() {
        let mut first = passing_contract();
        first.strike = 88.0;
        let mut second = passing_contract();
        second.strike = 89.0;
        let mut third = passing_contract();
        third.strike = 90.0;

        // Identical sort keys across the board
        let out = filter_and_rank(
            vec![first, second, third],
            &thresholds(),
            Strategy::CashSecuredPut,
        );

        assert_eq!(out[0].strike, 88.0);
        assert_eq!(out[1].strike, 89.0);
        assert_eq!(out[2].strike, 90.0);
    }
}
