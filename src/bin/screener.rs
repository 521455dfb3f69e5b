//! Wheel screener CLI
//!
//! Screens option chains for cash-secured put and covered call candidates
//! and prints the ranked table per ticker.
//!
//! Usage:
//!   screener AAPL MSFT --stock-move 10 --min-annualized 15
//!   screener AAPL --strategy cc --cost-basis 172.50

use std::path::PathBuf;
use std::process;

use chrono::{NaiveDate, Utc};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use wheel_screener::core::{ChainSnapshot, ScreenResult, Strategy};
use wheel_screener::data::{CacheConfig, CachedFetcher, YahooClient};
use wheel_screener::report::print_table;
use wheel_screener::screen::{screen_chain, ScreenRequest, Thresholds};

#[derive(Parser)]
#[command(name = "screener")]
#[command(about = "Screen option chains for wheel income candidates")]
struct Args {
    /// Tickers to screen
    #[arg(required = true)]
    tickers: Vec<String>,

    /// Strategy: csp (cash-secured puts) or cc (covered calls)
    #[arg(long, default_value = "csp")]
    strategy: String,

    /// Required stock move before the strike is in play (percent)
    #[arg(long, default_value = "15.0")]
    stock_move: f64,

    /// Cost basis per share (required for covered calls)
    #[arg(long)]
    cost_basis: Option<f64>,

    /// Minimum days to expiration
    #[arg(long, default_value = "7")]
    min_dte: i64,

    /// Maximum days to expiration
    #[arg(long, default_value = "45")]
    max_dte: i64,

    /// Minimum annualized return (percent)
    #[arg(long, default_value = "20.0")]
    min_annualized: f64,

    /// Minimum open interest
    #[arg(long, default_value = "10")]
    min_open_interest: u64,

    /// Minimum daily volume
    #[arg(long, default_value = "10")]
    min_volume: u64,

    /// Minimum bid price
    #[arg(long, default_value = "0.1")]
    min_bid: f64,

    /// Risk-free rate for the volatility solver
    #[arg(long, default_value = "0.01")]
    risk_free_rate: f64,

    /// Snapshot cache directory
    #[arg(long, default_value = "./data/cache")]
    cache_dir: PathBuf,

    /// Force fresh data even when the cache is warm
    #[arg(long)]
    refresh: bool,

    /// Skip the snapshot cache entirely
    #[arg(long)]
    no_cache: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let strategy = match args.strategy.as_str() {
        "csp" => Strategy::CashSecuredPut,
        "cc" => Strategy::CoveredCall,
        other => {
            eprintln!("Unknown strategy '{}' (expected 'csp' or 'cc')", other);
            process::exit(2);
        }
    };

    let request = ScreenRequest {
        strategy,
        stock_move_pct: args.stock_move,
        cost_basis: args.cost_basis,
        risk_free_rate: args.risk_free_rate,
        thresholds: Thresholds {
            min_dte: args.min_dte,
            max_dte: args.max_dte,
            min_annualized_return: args.min_annualized,
            min_open_interest: args.min_open_interest,
            min_volume: args.min_volume,
            min_bid: args.min_bid,
        },
    };

    if let Err(e) = request.validate() {
        eprintln!("Invalid request: {}", e);
        process::exit(2);
    }

    let evaluation_date = Utc::now().date_naive();

    for ticker in &args.tickers {
        let snapshot = match fetch_snapshot(ticker, &request, &args, evaluation_date) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                eprintln!("{}: fetch failed: {}", ticker, e);
                continue;
            }
        };

        match screen_chain(
            &snapshot.rows,
            snapshot.current_price,
            evaluation_date,
            request.clone(),
        ) {
            Ok(outcome) => {
                if outcome.is_empty() {
                    println!(
                        "\n{}: no contracts passed the screen ({} rows in, target ${:.2})",
                        ticker,
                        outcome.rows_in,
                        outcome.request.target_multiplier() * outcome.current_price
                    );
                } else {
                    print_table(&outcome);
                }
            }
            Err(e) => {
                eprintln!("{}: screen failed: {}", ticker, e);
            }
        }
    }
}

/// Fetch one ticker's chain snapshot, through the cache unless told not to
fn fetch_snapshot(
    ticker: &str,
    request: &ScreenRequest,
    args: &Args,
    evaluation_date: NaiveDate,
) -> ScreenResult<ChainSnapshot> {
    let kind = request.strategy.option_kind();
    let (min_dte, max_dte) = (request.thresholds.min_dte, request.thresholds.max_dte);

    if args.no_cache {
        let client = YahooClient::new();
        return client.get_snapshot(ticker, kind, evaluation_date, min_dte, max_dte);
    }

    let config = CacheConfig {
        cache_dir: args.cache_dir.clone(),
        ..CacheConfig::default()
    };
    let fetcher = CachedFetcher::new(config)?;
    if args.refresh {
        fetcher.refresh_snapshot(ticker, kind, evaluation_date, min_dte, max_dte)
    } else {
        fetcher.get_snapshot(ticker, kind, evaluation_date, min_dte, max_dte)
    }
}
