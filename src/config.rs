//! Curve configuration loading and state snapshots

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde_json::Value;
use tracing::debug;

use crate::bonding_curve::{should_graduate, BondingCurve, CurveParams};
use crate::constants::GRADUATION_THRESHOLD;
use crate::graduation::graduation_progress;

/// Parse curve parameters from JSON. Empty input yields the default curve.
pub fn load_curve_params(data: &[u8]) -> Result<CurveParams> {
    if data.iter().all(|b| b.is_ascii_whitespace()) {
        debug!("no curve params supplied, using default curve");
        return Ok(CurveParams::default());
    }

    serde_json::from_slice(data).map_err(|e| anyhow!("Failed to deserialize curve params: {}", e))
}

pub fn load_curve_params_from_path(path: impl AsRef<Path>) -> Result<CurveParams> {
    let path = path.as_ref();
    let data = std::fs::read(path)
        .with_context(|| format!("Failed to read curve params from {}", path.display()))?;
    load_curve_params(&data)
}

/// Serialize curve parameters. Non-finite numbers are refused, since JSON
/// would write them as `null` and they would reload as defaults.
pub fn curve_params_to_json(params: &CurveParams) -> Result<Vec<u8>> {
    let fields = [
        ("base_price", Some(params.base_price)),
        ("slope", params.slope),
        ("exponent", params.exponent),
    ];
    for (name, value) in fields {
        if let Some(value) = value.filter(|v| !v.is_finite()) {
            return Err(anyhow!("Cannot serialize curve params: {} is {}", name, value));
        }
    }

    serde_json::to_vec(params).map_err(|e| anyhow!("Failed to serialize curve params: {}", e))
}

/// Snapshot of the curve at `supply`, for display
pub fn curve_state_json(curve: &BondingCurve, supply: f64) -> Value {
    let price = curve.price_at(supply);
    let market_cap = curve.market_cap_at(supply);

    serde_json::json!({
        "curve_type": curve.curve_type().as_str(),
        "base_price": curve.base_price(),
        "slope": curve.slope(),
        "exponent": curve.exponent(),
        "current_supply": supply,
        "current_price": price,
        "market_cap": market_cap,
        "graduation_threshold": GRADUATION_THRESHOLD,
        "graduation_progress": graduation_progress(market_cap),
        "can_graduate": should_graduate(market_cap),
    })
}
