//! Trade quotes against the bonding curve
//!
//! Buying `amount` tokens at `current_supply` costs the area under the price
//! curve between `current_supply` and `current_supply + amount`; selling
//! returns the area over the interval being burned. Both curves integrate in
//! closed form, so no per-token summation or trapezoid approximation is
//! needed.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bonding_curve::{calculate_market_cap, BondingCurve, CurveType, PricePoint};
use crate::error::{CurveError, CurveResult};

/// Result of a simulated buy or sell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeQuote {
    /// Tokens bought or sold
    pub amount: f64,
    /// Total cost (buy) or payout (sell) in the quote currency
    pub total: f64,
    pub average_price: f64,
    pub start_price: f64,
    pub end_price: f64,
    /// Supply after the trade settles
    pub new_supply: f64,
}

/// Integral of `price_at` over `[from, to]`
pub fn area_under_curve(curve: &BondingCurve, from: f64, to: f64) -> f64 {
    let base = curve.base_price();
    match curve.curve_type() {
        CurveType::Linear => {
            base * (to - from) + curve.slope() / 2.0 * (to * to - from * from)
        }
        CurveType::Exponential => {
            let exponent = curve.exponent();
            if exponent == -1.0 {
                base * (to.ln() - from.ln())
            } else {
                let raised = exponent + 1.0;
                base / raised * (to.powf(raised) - from.powf(raised))
            }
        }
        CurveType::Unrecognized => base * (to - from),
    }
}

fn check_amount(amount: f64) -> CurveResult<()> {
    if amount > 0.0 {
        Ok(())
    } else {
        Err(CurveError::ZeroAmount)
    }
}

fn finite(value: f64, what: &'static str) -> CurveResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CurveError::NonFiniteResult { what })
    }
}

/// Cost of minting `amount` tokens on top of `current_supply`
pub fn buy_quote(curve: &BondingCurve, current_supply: f64, amount: f64) -> CurveResult<TradeQuote> {
    check_amount(amount)?;

    let new_supply = current_supply + amount;
    let total = finite(area_under_curve(curve, current_supply, new_supply), "buy cost")?;

    debug!(current_supply, amount, total, "buy quote");

    Ok(TradeQuote {
        amount,
        total,
        average_price: total / amount,
        start_price: curve.price_at(current_supply),
        end_price: curve.price_at(new_supply),
        new_supply,
    })
}

/// Payout for burning `amount` tokens out of `current_supply`
pub fn sell_quote(curve: &BondingCurve, current_supply: f64, amount: f64) -> CurveResult<TradeQuote> {
    check_amount(amount)?;

    if amount > current_supply {
        return Err(CurveError::InsufficientSupply {
            requested: amount,
            available: current_supply,
        });
    }

    let new_supply = current_supply - amount;
    let total = finite(area_under_curve(curve, new_supply, current_supply), "sell payout")?;

    debug!(current_supply, amount, total, "sell quote");

    Ok(TradeQuote {
        amount,
        total,
        average_price: total / amount,
        start_price: curve.price_at(current_supply),
        end_price: curve.price_at(new_supply),
        new_supply,
    })
}

/// USD market cap from a SOL-denominated price and an external SOL/USD quote
pub fn market_cap_usd(supply: f64, price_in_sol: f64, sol_usd: f64) -> f64 {
    calculate_market_cap(supply, price_in_sol) * sol_usd
}

/// Evenly spaced samples from supply 0 to `max_supply`, both ends included
pub fn price_points(curve: &BondingCurve, max_supply: f64, steps: usize) -> Vec<PricePoint> {
    if steps == 0 {
        return vec![curve.price_point(0.0)];
    }

    (0..=steps)
        .map(|i| curve.price_point(max_supply * i as f64 / steps as f64))
        .collect()
}
