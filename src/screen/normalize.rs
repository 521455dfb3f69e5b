//! Stage 1: Contract Normalization
//!
//! Coerces raw chain rows into clean contract records: missing numeric
//! fields become zero, negatives are clamped, expirations become real
//! dates, and DTE is computed against an explicit evaluation date.

use chrono::NaiveDate;
use tracing::warn;

use crate::core::{OptionContract, RawOptionRow, ScreenError, ScreenResult};

/// Normalize a batch of raw rows
///
/// Rows that fail normalization are dropped with a warning; the rest of the
/// batch goes through. Use [`normalize_row`] to see the per-row error.
///
/// # Arguments
/// * `rows` - Raw chain rows for one ticker and one side of the chain
/// * `current_price` - Underlying price at evaluation time
/// * `evaluation_date` - Date DTE is measured from
pub fn normalize(
    rows: &[RawOptionRow],
    current_price: f64,
    evaluation_date: NaiveDate,
) -> Vec<OptionContract> {
    let mut contracts = Vec::with_capacity(rows.len());

    for row in rows {
        match normalize_row(row, current_price, evaluation_date) {
            Ok(contract) => contracts.push(contract),
            Err(e) => {
                warn!("Dropping row for {}: {}", row.ticker, e);
            }
        }
    }

    contracts
}

/// Normalize a single raw row
///
/// Fails with `InvalidRecord` when the row has no usable strike (absent or
/// non-positive) or no parseable expiration. Every other field coerces:
/// missing prices and sizes become zero, negative values clamp to zero.
pub fn normalize_row(
    row: &RawOptionRow,
    current_price: f64,
    evaluation_date: NaiveDate,
) -> ScreenResult<OptionContract> {
    let strike = match row.strike {
        Some(k) if k > 0.0 => k,
        _ => return Err(ScreenError::invalid_record("missing or non-positive strike")),
    };

    let expiration = match &row.expiration {
        Some(label) => NaiveDate::parse_from_str(label, "%Y-%m-%d").map_err(|e| {
            ScreenError::invalid_record(format!("unparseable expiration '{}': {}", label, e))
        })?,
        None => return Err(ScreenError::invalid_record("missing expiration")),
    };

    let dte = (expiration - evaluation_date).num_days();

    Ok(OptionContract {
        ticker: row.ticker.clone(),
        kind: row.kind,
        strike,
        expiration,
        bid: row.bid.unwrap_or(0.0).max(0.0),
        ask: row.ask.unwrap_or(0.0).max(0.0),
        last: row.last.unwrap_or(0.0).max(0.0),
        volume: row.volume.unwrap_or(0).max(0) as u64,
        open_interest: row.open_interest.unwrap_or(0).max(0) as u64,
        underlying_price: current_price,
        dte,
        mid_premium: 0.0,
        target_price: 0.0,
        total_return_pct: 0.0,
        annualized_return_pct: None,
        implied_vol: None,
        greeks: None,
        pop_pct: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::OptionKind;

    fn eval_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    fn row_with_strike(strike: f64) -> RawOptionRow {
        RawOptionRow {
            strike: Some(strike),
            expiration: Some("2024-02-16".to_string()),
            ..RawOptionRow::new("AAPL", OptionKind::Put)
        }
    }

    #[test]
    fn test_missing_fields_become_zero() {
        let row = row_with_strike(90.0);
        let contract = normalize_row(&row, 100.0, eval_date()).unwrap();

        assert_eq!(contract.bid, 0.0);
        assert_eq!(contract.ask, 0.0);
        assert_eq!(contract.last, 0.0);
        assert_eq!(contract.volume, 0);
        assert_eq!(contract.open_interest, 0);
    }

    #[test]
    fn test_negative_fields_clamp_to_zero() {
        let row = RawOptionRow {
            bid: Some(-0.5),
            ask: Some(-1.0),
            last: Some(-2.0),
            volume: Some(-10),
            open_interest: Some(-3),
            ..row_with_strike(90.0)
        };
        let contract = normalize_row(&row, 100.0, eval_date()).unwrap();

        assert_eq!(contract.bid, 0.0);
        assert_eq!(contract.ask, 0.0);
        assert_eq!(contract.last, 0.0);
        assert_eq!(contract.volume, 0);
        assert_eq!(contract.open_interest, 0);
    }

    #[test]
    fn test_dte_from_evaluation_date() {
        let contract = normalize_row(&row_with_strike(90.0), 100.0, eval_date()).unwrap();
        // 2024-01-15 -> 2024-02-16 is 32 days
        assert_eq!(contract.dte, 32);

        // Same-day expiration
        let row = RawOptionRow {
            expiration: Some("2024-01-15".to_string()),
            ..row_with_strike(90.0)
        };
        assert_eq!(normalize_row(&row, 100.0, eval_date()).unwrap().dte, 0);

        // Already expired
        let row = RawOptionRow {
            expiration: Some("2024-01-10".to_string()),
            ..row_with_strike(90.0)
        };
        assert_eq!(normalize_row(&row, 100.0, eval_date()).unwrap().dte, -5);
    }

    #[test]
    fn test_missing_strike_is_invalid() {
        let row = RawOptionRow {
            expiration: Some("2024-02-16".to_string()),
            ..RawOptionRow::new("AAPL", OptionKind::Put)
        };
        assert!(matches!(
            normalize_row(&row, 100.0, eval_date()),
            Err(ScreenError::InvalidRecord(_))
        ));

        // A zero strike has no quotable meaning either
        let row = row_with_strike(0.0);
        assert!(normalize_row(&row, 100.0, eval_date()).is_err());
    }

    #[test]
    fn test_bad_expiration_is_invalid() {
        let row = RawOptionRow {
            expiration: Some("Friday".to_string()),
            ..row_with_strike(90.0)
        };
        assert!(normalize_row(&row, 100.0, eval_date()).is_err());

        let row = RawOptionRow {
            expiration: None,
            ..row_with_strike(90.0)
        };
        assert!(normalize_row(&row, 100.0, eval_date()).is_err());
    }

    #[test]
    fn test_batch_drops_bad_rows_and_keeps_rest() {
        let rows = vec![
            row_with_strike(90.0),
            RawOptionRow::new("AAPL", OptionKind::Put), // no strike, no expiration
            row_with_strike(95.0),
        ];
        let contracts = normalize(&rows, 100.0, eval_date());

        assert_eq!(contracts.len(), 2);
        assert_eq!(contracts[0].strike, 90.0);
        assert_eq!(contracts[1].strike, 95.0);
        assert_eq!(contracts[0].underlying_price, 100.0);
    }
}
