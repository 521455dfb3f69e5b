//! Yahoo Finance data fetcher
//!
//! Fetches free options chains as screening input batches.
//! Uses Yahoo Finance's unofficial API.
//!
//! Note: This is for educational/research purposes. Yahoo Finance
//! data is delayed ~15 minutes and intended for personal use.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{ChainSnapshot, OptionKind, RawOptionRow, ScreenError, ScreenResult};

/// Yahoo Finance API client
pub struct YahooClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl YahooClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::builder()
                .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
                .build()
                .expect("Failed to create HTTP client"),
            base_url: "https://query1.finance.yahoo.com/v7/finance".to_string(),
        }
    }

    /// Get current quote for a symbol
    pub fn get_quote(&self, symbol: &str) -> ScreenResult<SpotQuote> {
        let url = format!(
            "{}/quote?symbols={}",
            self.base_url, symbol
        );

        let response: YahooQuoteResponse = self.client
            .get(&url)
            .send()
            .map_err(|e| ScreenError::Network(e.to_string()))?
            .json()
            .map_err(|e| ScreenError::data(format!("Failed to parse quote: {}", e)))?;

        let result = response.quote_response.result
            .into_iter()
            .next()
            .ok_or_else(|| ScreenError::data("No quote data returned"))?;

        Ok(SpotQuote {
            symbol: symbol.to_string(),
            price: result.regular_market_price,
            bid: result.bid,
            ask: result.ask,
            timestamp: Utc::now(),
        })
    }

    /// Get available option expiration dates
    pub fn get_expirations(&self, symbol: &str) -> ScreenResult<Vec<NaiveDate>> {
        let url = format!(
            "{}/options/{}",
            self.base_url, symbol
        );

        let response: YahooOptionsResponse = self.client
            .get(&url)
            .send()
            .map_err(|e| ScreenError::Network(e.to_string()))?
            .json()
            .map_err(|e| ScreenError::data(format!("Failed to parse options: {}", e)))?;

        let chain = response.option_chain.result
            .into_iter()
            .next()
            .ok_or_else(|| ScreenError::data("No options data returned"))?;

        let expiries: Vec<NaiveDate> = chain.expiration_dates
            .iter()
            .filter_map(|&ts| {
                DateTime::from_timestamp(ts, 0)
                    .map(|dt| dt.date_naive())
            })
            .collect();

        Ok(expiries)
    }

    /// Get expiration dates whose DTE falls inside the screening window
    pub fn expirations_within(
        &self,
        symbol: &str,
        evaluation_date: NaiveDate,
        min_dte: i64,
        max_dte: i64,
    ) -> ScreenResult<Vec<NaiveDate>> {
        let expiries = self.get_expirations(symbol)?;
        Ok(expiries
            .into_iter()
            .filter(|&expiry| within_window(expiry, evaluation_date, min_dte, max_dte))
            .collect())
    }

    /// Get one side of the chain for a specific expiration as raw rows
    ///
    /// Rows are passed through as delivered; missing fields stay unset and
    /// are cleaned up (or rejected) during normalization.
    pub fn get_chain_rows(
        &self,
        symbol: &str,
        expiry: NaiveDate,
        kind: OptionKind,
    ) -> ScreenResult<Vec<RawOptionRow>> {
        // Convert expiry to Unix timestamp
        let expiry_ts = expiry
            .and_hms_opt(16, 0, 0)
            .unwrap()
            .and_utc()
            .timestamp();

        let url = format!(
            "{}/options/{}?date={}",
            self.base_url, symbol, expiry_ts
        );

        let response: YahooOptionsResponse = self.client
            .get(&url)
            .send()
            .map_err(|e| ScreenError::Network(e.to_string()))?
            .json()
            .map_err(|e| ScreenError::data(format!("Failed to parse options: {}", e)))?;

        let chain_data = response.option_chain.result
            .into_iter()
            .next()
            .ok_or_else(|| ScreenError::data("No options data returned"))?;

        let mut rows = Vec::new();
        if let Some(options) = chain_data.options.first() {
            let side = match kind {
                OptionKind::Call => &options.calls,
                OptionKind::Put => &options.puts,
            };
            for data in side {
                rows.push(row_from_yahoo(data, symbol, kind, expiry));
            }
        }

        Ok(rows)
    }

    /// Get a full screening snapshot: spot plus raw rows for every
    /// expiration inside the DTE window
    pub fn get_snapshot(
        &self,
        symbol: &str,
        kind: OptionKind,
        evaluation_date: NaiveDate,
        min_dte: i64,
        max_dte: i64,
    ) -> ScreenResult<ChainSnapshot> {
        let spot_quote = self.get_quote(symbol)?;
        let expiries = self.expirations_within(symbol, evaluation_date, min_dte, max_dte)?;

        if expiries.is_empty() {
            return Err(ScreenError::data(format!(
                "No expirations within {}..{} days for {}",
                min_dte, max_dte, symbol
            )));
        }

        let mut rows = Vec::new();
        for expiry in expiries {
            match self.get_chain_rows(symbol, expiry, kind) {
                Ok(batch) => rows.extend(batch),
                Err(e) => {
                    tracing::warn!("Failed to get chain for {}: {}", expiry, e);
                }
            }
        }

        if rows.is_empty() {
            return Err(ScreenError::data(format!(
                "No {} rows returned for {}",
                kind.label(),
                symbol
            )));
        }

        Ok(ChainSnapshot::new(
            symbol,
            kind,
            spot_quote.price,
            min_dte,
            max_dte,
            rows,
        ))
    }
}

impl Default for YahooClient {
    fn default() -> Self {
        Self::new()
    }
}

/// True if the expiry's DTE measured from the evaluation date sits in
/// the inclusive window
fn within_window(expiry: NaiveDate, evaluation_date: NaiveDate, min_dte: i64, max_dte: i64) -> bool {
    let dte = (expiry - evaluation_date).num_days();
    dte >= min_dte && dte <= max_dte
}

/// Convert one Yahoo chain entry to our raw row format
fn row_from_yahoo(
    data: &YahooOptionData,
    ticker: &str,
    kind: OptionKind,
    expiry: NaiveDate,
) -> RawOptionRow {
    RawOptionRow {
        strike: data.strike,
        expiration: Some(expiry.to_string()),
        bid: data.bid,
        ask: data.ask,
        last: data.last_price,
        volume: data.volume,
        open_interest: data.open_interest,
        ..RawOptionRow::new(ticker, kind)
    }
}

/// Spot price quote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotQuote {
    pub symbol: String,
    pub price: f64,
    pub bid: Option<f64>,
    pub ask: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

// Yahoo Finance API response structures

#[derive(Debug, Deserialize)]
struct YahooQuoteResponse {
    #[serde(rename = "quoteResponse")]
    quote_response: YahooQuoteResult,
}

#[derive(Debug, Deserialize)]
struct YahooQuoteResult {
    result: Vec<YahooQuoteData>,
}

#[derive(Debug, Deserialize)]
struct YahooQuoteData {
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: f64,
    bid: Option<f64>,
    ask: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct YahooOptionsResponse {
    #[serde(rename = "optionChain")]
    option_chain: YahooOptionChain,
}

#[derive(Debug, Deserialize)]
struct YahooOptionChain {
    result: Vec<YahooOptionChainData>,
}

#[derive(Debug, Deserialize)]
struct YahooOptionChainData {
    #[serde(rename = "expirationDates", default)]
    expiration_dates: Vec<i64>,
    #[serde(default)]
    options: Vec<YahooOptions>,
}

#[derive(Debug, Deserialize)]
struct YahooOptions {
    calls: Vec<YahooOptionData>,
    puts: Vec<YahooOptionData>,
}

#[derive(Debug, Deserialize)]
struct YahooOptionData {
    strike: Option<f64>,
    bid: Option<f64>,
    ask: Option<f64>,
    #[serde(rename = "lastPrice")]
    last_price: Option<f64>,
    volume: Option<i64>,
    #[serde(rename = "openInterest")]
    open_interest: Option<i64>,
}

/// Convenience function to fetch a screening snapshot for one ticker
pub fn fetch_chain_snapshot(
    symbol: &str,
    kind: OptionKind,
    evaluation_date: NaiveDate,
    min_dte: i64,
    max_dte: i64,
) -> ScreenResult<ChainSnapshot> {
    let client = YahooClient::new();
    client.get_snapshot(symbol, kind, evaluation_date, min_dte, max_dte)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_window_boundaries() {
        let eval = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let day = |d: i64| eval + chrono::Duration::days(d);

        assert!(within_window(day(7), eval, 7, 45));
        assert!(within_window(day(45), eval, 7, 45));
        assert!(within_window(day(30), eval, 7, 45));
        assert!(!within_window(day(6), eval, 7, 45));
        assert!(!within_window(day(46), eval, 7, 45));
        assert!(!within_window(day(0), eval, 7, 45));
        assert!(!within_window(day(-3), eval, 7, 45));
    }

    #[test]
    fn test_row_from_yahoo_keeps_fields_raw() {
        let data = YahooOptionData {
            strike: Some(95.0),
            bid: Some(1.10),
            ask: None,
            last_price: Some(1.15),
            volume: None,
            open_interest: Some(240),
        };
        let expiry = NaiveDate::from_ymd_opt(2024, 2, 16).unwrap();

        let row = row_from_yahoo(&data, "AAPL", OptionKind::Put, expiry);

        assert_eq!(row.ticker, "AAPL");
        assert_eq!(row.kind, OptionKind::Put);
        assert_eq!(row.strike, Some(95.0));
        assert_eq!(row.expiration.as_deref(), Some("2024-02-16"));
        assert_eq!(row.bid, Some(1.10));
        assert!(row.ask.is_none());
        assert!(row.volume.is_none());
        assert_eq!(row.open_interest, Some(240));
    }

    #[test]
    #[ignore] // Requires network
    fn test_get_quote() {
        let client = YahooClient::new();
        let quote = client.get_quote("QQQ").unwrap();

        assert!(quote.price > 0.0);
        println!("QQQ price: {}", quote.price);
    }

    #[test]
    #[ignore] // Requires network
    fn test_get_expirations() {
        let client = YahooClient::new();
        let expiries = client.get_expirations("QQQ").unwrap();

        assert!(!expiries.is_empty());
        println!("QQQ expiries: {:?}", expiries);
    }

    #[test]
    #[ignore] // Requires network
    fn test_get_snapshot() {
        let client = YahooClient::new();
        let today = Utc::now().date_naive();
        let snapshot = client
            .get_snapshot("QQQ", OptionKind::Put, today, 7, 45)
            .unwrap();

        println!(
            "Snapshot for {}: spot {}, {} put rows",
            snapshot.ticker,
            snapshot.current_price,
            snapshot.rows.len()
        );
        assert!(snapshot.current_price > 0.0);
        assert!(!snapshot.rows.is_empty());
    }
}
