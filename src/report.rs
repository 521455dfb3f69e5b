//! Console reporting
//!
//! Prints a ranked screening outcome as a fixed-width table, one row per
//! surviving contract, with batch counts in the footer. Prices render in
//! dollars, returns as percentages, absent analytics as "-".

use crate::core::OptionContract;
use crate::screen::ScreenOutcome;

const RULE_WIDTH: usize = 149;

/// Print a screening outcome as a table
pub fn print_table(outcome: &ScreenOutcome) {
    println!("\n{}", "═".repeat(RULE_WIDTH));
    println!("{}", title_line(outcome));
    println!("{}", "═".repeat(RULE_WIDTH));
    println!("{}", header_line());
    println!("  {}", "-".repeat(RULE_WIDTH - 6));
    for c in &outcome.contracts {
        println!("{}", contract_line(c));
    }
    println!("{}", "═".repeat(RULE_WIDTH));
    println!(
        "  {} rows in, {} dropped, {} solved, {} passed",
        outcome.rows_in,
        outcome.dropped,
        outcome.solved,
        outcome.contracts.len(),
    );
}

/// Title line: ticker (when the batch has survivors), strategy, spot, date
fn title_line(outcome: &ScreenOutcome) -> String {
    let strategy = outcome.request.strategy.label();
    match outcome.ticker() {
        Some(ticker) => format!(
            "  {}: {} @ {} on {}",
            ticker,
            strategy,
            fmt_price(outcome.current_price),
            outcome.evaluation_date,
        ),
        None => format!(
            "  {} @ {} on {}",
            strategy,
            fmt_price(outcome.current_price),
            outcome.evaluation_date,
        ),
    }
}

fn header_line() -> String {
    format!(
        "  {:<6} {:>8} {:>8} {:>8} {:>7} {:>11} {:>5} {:>7} {:>8} {:>8} {:>8} {:>8} {:>9} {:>9} {:>7} {:>7} {:>7}",
        "Ticker",
        "Current",
        "Target",
        "Strike",
        "OI",
        "Exp",
        "DTE",
        "Vol",
        "Last",
        "Bid",
        "Ask",
        "Mid",
        "Total",
        "Ann.",
        "IV",
        "Delta",
        "POP",
    )
}

fn contract_line(c: &OptionContract) -> String {
    format!(
        "  {:<6} {:>8} {:>8} {:>8} {:>7} {:>11} {:>5} {:>7} {:>8} {:>8} {:>8} {:>8} {:>9} {:>9} {:>7} {:>7} {:>7}",
        c.ticker,
        fmt_price(c.underlying_price),
        fmt_price(c.target_price),
        fmt_price(c.strike),
        c.open_interest,
        c.expiration.to_string(),
        c.dte,
        c.volume,
        fmt_price(c.last),
        fmt_price(c.bid),
        fmt_price(c.ask),
        fmt_price(c.mid_premium),
        fmt_pct(Some(c.total_return_pct), 4),
        fmt_pct(c.annualized_return_pct, 2),
        fmt_pct(c.implied_vol.map(|v| v * 100.0), 1),
        fmt_opt(c.delta(), 3),
        fmt_pct(c.pop_pct, 1),
    )
}

/// Format a dollar amount as $x.xx
fn fmt_price(value: f64) -> String {
    format!("${:.2}", value)
}

/// Format a percentage with a trailing %, "-" when absent
fn fmt_pct(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{:.*}%", precision, v),
        None => "-".to_string(),
    }
}

/// Format an optional metric, "-" when absent
fn fmt_opt(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", precision, v),
        None => "-".to_string(),
    }
}
