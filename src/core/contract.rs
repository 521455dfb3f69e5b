//! Option contract records
//!
//! Two shapes of the same data:
//! - `RawOptionRow`: one chain row as delivered by the data source, fields optional
//! - `OptionContract`: one normalized row with derived screening metrics

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::greeks::Greeks;

/// Option kind (Call or Put)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionKind {
    Call,
    Put,
}

impl OptionKind {
    /// Intrinsic value at given spot
    pub fn intrinsic(&self, spot: f64, strike: f64) -> f64 {
        match self {
            OptionKind::Call => (spot - strike).max(0.0),
            OptionKind::Put => (strike - spot).max(0.0),
        }
    }

    /// Lowercase label for cache keys and logs
    pub fn label(&self) -> &'static str {
        match self {
            OptionKind::Call => "call",
            OptionKind::Put => "put",
        }
    }
}

/// One option-chain row as supplied by the data source
///
/// Everything beyond the identity of the batch is optional: chains routinely
/// arrive with missing bids, volumes, or open interest. Normalization decides
/// what to coerce and what to reject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawOptionRow {
    /// Underlying ticker symbol
    pub ticker: String,
    /// Option kind
    pub kind: OptionKind,
    /// Strike price
    pub strike: Option<f64>,
    /// Expiration label (YYYY-MM-DD)
    pub expiration: Option<String>,
    /// Bid price
    pub bid: Option<f64>,
    /// Ask price
    pub ask: Option<f64>,
    /// Last traded price
    pub last: Option<f64>,
    /// Trading volume
    pub volume: Option<i64>,
    /// Open interest
    pub open_interest: Option<i64>,
}

impl RawOptionRow {
    /// Create an empty row for a ticker/kind (all market fields unset)
    pub fn new(ticker: impl Into<String>, kind: OptionKind) -> Self {
        Self {
            ticker: ticker.into(),
            kind,
            strike: None,
            expiration: None,
            bid: None,
            ask: None,
            last: None,
            volume: None,
            open_interest: None,
        }
    }
}

/// Snapshot of one fetched chain: spot plus raw rows for a ticker/kind
///
/// This is what the data layer caches, so a screen can be replayed offline
/// against the exact rows a live run saw. The DTE window the fetch covered
/// travels with the rows, so a cached snapshot is only reused for requests
/// it can satisfy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainSnapshot {
    /// Underlying ticker symbol
    pub ticker: String,
    /// Which side of the chain was fetched
    pub kind: OptionKind,
    /// Underlying price at fetch time
    pub current_price: f64,
    /// When the snapshot was taken
    pub fetched_at: DateTime<Utc>,
    /// Smallest DTE the fetch window covered
    #[serde(default)]
    pub min_dte: i64,
    /// Largest DTE the fetch window covered
    #[serde(default)]
    pub max_dte: i64,
    /// Raw chain rows across all fetched expirations
    pub rows: Vec<RawOptionRow>,
}

impl ChainSnapshot {
    pub fn new(
        ticker: impl Into<String>,
        kind: OptionKind,
        current_price: f64,
        min_dte: i64,
        max_dte: i64,
        rows: Vec<RawOptionRow>,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            kind,
            current_price,
            fetched_at: Utc::now(),
            min_dte,
            max_dte,
            rows,
        }
    }

    /// True if this snapshot's fetch window covers the requested one
    pub fn covers_window(&self, min_dte: i64, max_dte: i64) -> bool {
        self.min_dte <= min_dte && self.max_dte >= max_dte
    }
}

/// One normalized contract with its derived screening metrics
///
/// Market fields are cleaned (missing values zeroed, negatives clamped) and
/// the expiration is a real date. Derived fields are filled in by the
/// pipeline stages; optional ones stay `None` when their stage could not
/// produce a value for this contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionContract {
    /// Underlying ticker symbol
    pub ticker: String,
    /// Option kind
    pub kind: OptionKind,
    /// Strike price (positive after normalization)
    pub strike: f64,
    /// Expiration date
    pub expiration: NaiveDate,
    /// Bid price
    pub bid: f64,
    /// Ask price
    pub ask: f64,
    /// Last traded price
    pub last: f64,
    /// Trading volume
    pub volume: u64,
    /// Open interest
    pub open_interest: u64,
    /// Underlying price at evaluation time
    pub underlying_price: f64,
    /// Days to expiration from the evaluation date (may be zero or negative)
    pub dte: i64,
    /// Mid premium: (bid + ask) / 2
    pub mid_premium: f64,
    /// Target price: underlying price scaled by the strategy multiplier
    pub target_price: f64,
    /// Premium as a percentage of the return basis
    pub total_return_pct: f64,
    /// Compounded annualized return (%); absent when DTE makes it undefined
    pub annualized_return_pct: Option<f64>,
    /// Implied volatility; absent when the solver failed for this contract
    pub implied_vol: Option<f64>,
    /// Greeks at the solved volatility; present exactly when `implied_vol` is
    pub greeks: Option<Greeks>,
    /// Estimated probability of profit (%); present only with a delta
    pub pop_pct: Option<f64>,
}

impl OptionContract {
    /// Time to expiry in years (DTE / 365)
    pub fn time_to_expiry(&self) -> f64 {
        self.dte as f64 / 365.0
    }

    /// Delta, if Greeks were computed
    pub fn delta(&self) -> Option<f64> {
        self.greeks.map(|g| g.delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_kind_intrinsic() {
        assert_eq!(OptionKind::Call.intrinsic(110.0, 100.0), 10.0);
        assert_eq!(OptionKind::Put.intrinsic(90.0, 100.0), 10.0);
        assert_eq!(OptionKind::Call.intrinsic(90.0, 100.0), 0.0);
        assert_eq!(OptionKind::Put.intrinsic(110.0, 100.0), 0.0);
    }

    #[test]
    fn test_raw_row_starts_empty() {
        let row = RawOptionRow::new("AAPL", OptionKind::Put);
        assert_eq!(row.ticker, "AAPL");
        assert!(row.strike.is_none());
        assert!(row.bid.is_none());
        assert!(row.open_interest.is_none());
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let rows = vec![RawOptionRow {
            strike: Some(95.0),
            expiration: Some("2024-02-16".to_string()),
            bid: Some(1.10),
            ..RawOptionRow::new("MSFT", OptionKind::Put)
        }];
        let snapshot = ChainSnapshot::new("MSFT", OptionKind::Put, 100.0, 7, 45, rows);

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: ChainSnapshot = serde_json::from_str(&json).unwrap();

        assert_eq!(back.ticker, "MSFT");
        assert_eq!(back.kind, OptionKind::Put);
        assert_eq!(back.min_dte, 7);
        assert_eq!(back.max_dte, 45);
        assert_eq!(back.rows.len(), 1);
        assert_eq!(back.rows[0].strike, Some(95.0));
    }

    #[test]
    fn test_snapshot_window_coverage() {
        let snapshot = ChainSnapshot::new("MSFT", OptionKind::Put, 100.0, 7, 45, vec![]);

        assert!(snapshot.covers_window(7, 45));
        assert!(snapshot.covers_window(10, 30));
        assert!(!snapshot.covers_window(5, 45));
        assert!(!snapshot.covers_window(7, 60));
    }
}
