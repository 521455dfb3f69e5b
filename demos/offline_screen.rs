//! Example: Offline screening over a synthetic put chain
//!
//! Runs the full pipeline with no network access and prints the ranked
//! table. One junk row and one illiquid row are mixed in to show how they
//! fall out.
//!
//! Run with: cargo run --example offline_screen

use chrono::NaiveDate;
use wheel_screener::prelude::*;

fn main() {
    // Fixed evaluation point so the output is reproducible
    let evaluation_date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
    let current_price = 100.0;

    let rows = synthetic_put_chain();

    // Puts struck at least 5% below spot, modest return floor for the demo
    let mut request = ScreenRequest::cash_secured_put(5.0);
    request.thresholds.min_annualized_return = 5.0;

    let screener = Screener::with_request(request);
    let outcome = screener
        .screen(&rows, current_price, evaluation_date)
        .unwrap();

    println!("=== Offline Wheel Screen ===");
    print_table(&outcome);

    println!("\n--- Top Picks ---\n");
    for c in outcome.top(3) {
        println!(
            "{} {:.0} put exp {} ({} DTE): {:.3}% annualized, POP {}",
            c.ticker,
            c.strike,
            c.expiration,
            c.dte,
            c.annualized_return_pct.unwrap_or(0.0),
            c.pop_pct
                .map(|p| format!("{:.1}%", p))
                .unwrap_or_else(|| "-".to_string()),
        );
    }
}

/// A plausible put chain for a $100 stock: two expirations, strikes
/// stepping down from spot, premiums decaying with distance
fn synthetic_put_chain() -> Vec<RawOptionRow> {
    let row = |strike: f64, expiration: &str, bid: f64, ask: f64, volume: i64, oi: i64| {
        RawOptionRow {
            strike: Some(strike),
            expiration: Some(expiration.to_string()),
            bid: Some(bid),
            ask: Some(ask),
            last: Some((bid + ask) / 2.0),
            volume: Some(volume),
            open_interest: Some(oi),
            ..RawOptionRow::new("DEMO", OptionKind::Put)
        }
    };

    vec![
        // 30 DTE (2024-02-14)
        row(98.0, "2024-02-14", 1.55, 1.70, 120, 800), // above target, screened out
        row(95.0, "2024-02-14", 1.00, 1.10, 340, 2100),
        row(92.0, "2024-02-14", 0.62, 0.72, 3, 950), // too thin, screened out
        row(90.0, "2024-02-14", 0.45, 0.55, 610, 3200),
        row(85.0, "2024-02-14", 0.18, 0.25, 85, 1400), // return too low
        // 60 DTE (2024-03-15)
        row(90.0, "2024-03-15", 1.05, 1.20, 150, 1800),
        // Junk row, dropped during normalization
        RawOptionRow::new("DEMO", OptionKind::Put),
    ]
}
