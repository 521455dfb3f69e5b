//! Black-Scholes Model
//!
//! Provides:
//! - European option pricing
//! - Greeks computation
//! - Implied volatility solver (Newton-Raphson with bisection fallback)
//!
//! The screener inverts this model per contract: the mid premium goes in,
//! implied volatility and Greeks come out. Short-dated single-name options
//! are priced off spot with no dividend adjustment.

use std::f64::consts::PI;

use statrs::distribution::{ContinuousCDF, Normal};

use crate::core::{Greeks, OptionKind, ScreenError, ScreenResult};

/// Standard normal CDF
pub fn norm_cdf(x: f64) -> f64 {
    let normal = Normal::new(0.0, 1.0).unwrap();
    normal.cdf(x)
}

/// Standard normal PDF
pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// Black-Scholes d1 parameter
pub fn d1(spot: f64, strike: f64, rate: f64, vol: f64, time: f64) -> f64 {
    ((spot / strike).ln() + (rate + 0.5 * vol * vol) * time) / (vol * time.sqrt())
}

/// Black-Scholes d2 parameter
pub fn d2(spot: f64, strike: f64, rate: f64, vol: f64, time: f64) -> f64 {
    d1(spot, strike, rate, vol, time) - vol * time.sqrt()
}

/// Black-Scholes European option price
pub fn price(spot: f64, strike: f64, rate: f64, vol: f64, time: f64, kind: OptionKind) -> f64 {
    if time <= 0.0 {
        return kind.intrinsic(spot, strike);
    }

    if vol <= 0.0 {
        // Zero vol = discounted intrinsic on the forward
        let forward = spot * (rate * time).exp();
        let df = (-rate * time).exp();
        return df * kind.intrinsic(forward, strike);
    }

    let d1 = d1(spot, strike, rate, vol, time);
    let d2 = d2(spot, strike, rate, vol, time);
    let df = (-rate * time).exp();

    match kind {
        OptionKind::Call => spot * norm_cdf(d1) - strike * df * norm_cdf(d2),
        OptionKind::Put => strike * df * norm_cdf(-d2) - spot * norm_cdf(-d1),
    }
}

/// Black-Scholes Greeks
///
/// Theta is per calendar day, vega per 1% vol move. Put delta is negative.
pub fn greeks(spot: f64, strike: f64, rate: f64, vol: f64, time: f64, kind: OptionKind) -> Greeks {
    if time <= 0.0 || vol <= 0.0 {
        // At expiry or zero vol
        let delta = match kind {
            OptionKind::Call => {
                if spot > strike {
                    1.0
                } else {
                    0.0
                }
            }
            OptionKind::Put => {
                if spot < strike {
                    -1.0
                } else {
                    0.0
                }
            }
        };
        return Greeks::new(delta, 0.0, 0.0, 0.0);
    }

    let d1 = d1(spot, strike, rate, vol, time);
    let d2 = d2(spot, strike, rate, vol, time);
    let df = (-rate * time).exp();
    let sqrt_t = time.sqrt();
    let pdf_d1 = norm_pdf(d1);

    // Delta
    let delta = match kind {
        OptionKind::Call => norm_cdf(d1),
        OptionKind::Put => norm_cdf(d1) - 1.0,
    };

    // Gamma (same for call and put)
    let gamma = pdf_d1 / (spot * vol * sqrt_t);

    // Vega (same for call and put, per 1% vol move)
    let vega = spot * pdf_d1 * sqrt_t / 100.0;

    // Theta (per day)
    let term1 = -spot * pdf_d1 * vol / (2.0 * sqrt_t);
    let theta = match kind {
        OptionKind::Call => term1 - rate * strike * df * norm_cdf(d2),
        OptionKind::Put => term1 + rate * strike * df * norm_cdf(-d2),
    };
    let theta_per_day = theta / 365.0;

    Greeks::new(delta, gamma, theta_per_day, vega)
}

/// Implied volatility solver using Newton-Raphson with bisection fallback
pub fn implied_volatility(
    market_price: f64,
    spot: f64,
    strike: f64,
    rate: f64,
    time: f64,
    kind: OptionKind,
) -> ScreenResult<f64> {
    // Sanity checks
    if market_price <= 0.0 {
        return Err(ScreenError::numerical("Non-positive option price"));
    }
    if time <= 0.0 {
        return Err(ScreenError::numerical("Non-positive time to expiry"));
    }
    if spot <= 0.0 || strike <= 0.0 {
        return Err(ScreenError::numerical("Non-positive spot or strike"));
    }

    // Check no-arbitrage price bounds
    let intrinsic = kind.intrinsic(spot, strike);
    let df = (-rate * time).exp();

    if market_price < intrinsic * df * 0.99 {
        return Err(ScreenError::numerical("Price below intrinsic value"));
    }

    // A put is worth at most the discounted strike, a call at most the spot
    let ceiling = match kind {
        OptionKind::Call => spot,
        OptionKind::Put => strike * df,
    };
    if market_price > ceiling * 1.01 {
        return Err(ScreenError::numerical("Price above no-arbitrage bound"));
    }

    // Initial guess using Brenner-Subrahmanyam approximation
    let atm_approx = market_price / (0.4 * spot * time.sqrt());
    let mut vol = atm_approx.clamp(0.01, 3.0);

    // Newton-Raphson iteration
    let max_iter = 100;
    let tol = 1e-8;

    for _ in 0..max_iter {
        let bs_price = price(spot, strike, rate, vol, time, kind);
        let diff = bs_price - market_price;

        if diff.abs() < tol {
            return Ok(vol);
        }

        // Vega for Newton step
        let d1 = d1(spot, strike, rate, vol, time);
        let vega = spot * norm_pdf(d1) * time.sqrt();

        if vega.abs() < 1e-12 {
            break; // Vega too small, switch to bisection
        }

        let new_vol = vol - diff / vega;

        // Ensure vol stays positive
        if new_vol <= 0.0 || new_vol > 5.0 {
            break; // Out of bounds, switch to bisection
        }

        vol = new_vol;
    }

    // Fallback to bisection
    bisection_iv(market_price, spot, strike, rate, time, kind)
}

/// Bisection method for IV (slower but more robust)
fn bisection_iv(
    market_price: f64,
    spot: f64,
    strike: f64,
    rate: f64,
    time: f64,
    kind: OptionKind,
) -> ScreenResult<f64> {
    let mut low = 0.001;
    let mut high = 5.0;
    let tol = 1e-8;
    let max_iter = 100;

    // Price is monotone in vol: a premium outside the bracket's price
    // range has no root for bisection to find
    let min_price = price(spot, strike, rate, low, time, kind);
    let max_price = price(spot, strike, rate, high, time, kind);
    if market_price < min_price - tol || market_price > max_price + tol {
        return Err(ScreenError::numerical("Price outside attainable range"));
    }

    for _ in 0..max_iter {
        let mid = (low + high) / 2.0;
        let bs_price = price(spot, strike, rate, mid, time, kind);
        let diff = bs_price - market_price;

        if diff.abs() < tol {
            return Ok(mid);
        }

        if diff > 0.0 {
            high = mid;
        } else {
            low = mid;
        }

        if (high - low) < tol {
            // The root stays bracketed, so mid has converged in vol even
            // when a steep vega keeps the price gap above tolerance
            return Ok(mid);
        }
    }

    Err(ScreenError::numerical("IV solver did not converge"))
}
