//! Black-Scholes round trip demo
//!
//! Prices a typical cash-secured-put candidate at a known vol, recovers
//! that vol from the price, and prints the Greeks at the solution.
//!
//! Run with: cargo run --example iv_roundtrip

use wheel_screener::core::{OptionKind, Strategy};
use wheel_screener::models::black_scholes;
use wheel_screener::screen::pop_from_delta;

fn main() {
    println!("Black-Scholes Round Trip");
    println!("========================\n");

    let spot = 100.0;
    let strike = 90.0;
    let time = 30.0 / 365.0; // 30 days
    let rate = 0.01;
    let vol = 0.30;

    println!("Inputs:");
    println!("  Spot: ${:.2}", spot);
    println!("  Strike: ${:.2}", strike);
    println!("  Time: {:.0} days", time * 365.0);
    println!("  Rate: {:.1}%", rate * 100.0);
    println!("  Vol: {:.1}%\n", vol * 100.0);

    let put_price = black_scholes::price(spot, strike, rate, vol, time, OptionKind::Put);
    let call_price = black_scholes::price(spot, strike, rate, vol, time, OptionKind::Call);

    println!("Option Prices:");
    println!("  Put: ${:.2}", put_price);
    println!("  Call: ${:.2}", call_price);

    let greeks = black_scholes::greeks(spot, strike, rate, vol, time, OptionKind::Put);
    println!("\nPut Greeks:");
    println!("  Delta: {:.4}", greeks.delta);
    println!("  Gamma: {:.6}", greeks.gamma);
    println!("  Theta: {:.4}", greeks.theta);
    println!("  Vega: {:.4}", greeks.vega);

    println!("\nImplied Volatility Solver:");
    match black_scholes::implied_volatility(put_price, spot, strike, rate, time, OptionKind::Put) {
        Ok(iv) => println!(
            "  Recovered IV: {:.2}% (expected: {:.2}%)",
            iv * 100.0,
            vol * 100.0
        ),
        Err(e) => println!("  IV solve failed: {:?}", e),
    }

    // What the screener does with the delta
    let pop = pop_from_delta(greeks.delta, Strategy::CashSecuredPut);
    println!("\nProbability of profit (short put): {:.1}%", pop);
}
