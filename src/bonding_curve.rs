//! Bonding Curve Implementation
//!
//! This module contains the core pricing model:
//! - Linear and exponential price functions of token supply
//! - The inverse mapping from a target price back to supply
//! - Market cap and graduation threshold evaluation
//!
//! Every operation here is closed-form `f64` arithmetic. Out-of-domain inputs
//! (zero slope in the inverse, a fractional power of a negative supply) come
//! back as infinity or NaN instead of an error, and callers that need
//! user-facing validation run [`CurveParams::validate`] first.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::{DEFAULT_BASE_PRICE, DEFAULT_EXPONENT, DEFAULT_SLOPE, GRADUATION_THRESHOLD};
use crate::error::{CurveError, CurveResult};

/// Pricing formula selector
///
/// Tags are matched case-insensitively and ignoring surrounding whitespace,
/// both here and when loading JSON config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum CurveType {
    /// price = base_price + slope * supply
    Linear,
    /// price = base_price * supply^exponent
    #[default]
    Exponential,
    /// Any other tag. Prices flat at `base_price`.
    Unrecognized,
}

impl From<String> for CurveType {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl CurveType {
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "linear" => CurveType::Linear,
            "exponential" => CurveType::Exponential,
            _ => CurveType::Unrecognized,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CurveType::Linear => "linear",
            CurveType::Exponential => "exponential",
            CurveType::Unrecognized => "unrecognized",
        }
    }
}

impl std::fmt::Display for CurveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bonding curve parameters as supplied by configuration
///
/// `slope` and `exponent` stay optional here; [`BondingCurve::new`] fills in
/// the defaults for whichever one is unset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveParams {
    #[serde(default)]
    pub curve_type: CurveType,
    #[serde(default = "default_base_price")]
    pub base_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slope: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exponent: Option<f64>,
}

fn default_base_price() -> f64 {
    DEFAULT_BASE_PRICE
}

impl Default for CurveParams {
    fn default() -> Self {
        Self {
            curve_type: CurveType::Exponential,
            base_price: DEFAULT_BASE_PRICE,
            slope: None,
            exponent: Some(DEFAULT_EXPONENT),
        }
    }
}

impl CurveParams {
    pub fn linear(base_price: f64, slope: f64) -> Self {
        Self {
            curve_type: CurveType::Linear,
            base_price,
            slope: Some(slope),
            exponent: None,
        }
    }

    pub fn exponential(base_price: f64, exponent: f64) -> Self {
        Self {
            curve_type: CurveType::Exponential,
            base_price,
            slope: None,
            exponent: Some(exponent),
        }
    }

    /// Caller-side validation for user supplied configurations.
    ///
    /// The model never calls this. An unrecognized curve type passes, since
    /// the flat price fallback is well defined.
    pub fn validate(&self) -> CurveResult<()> {
        let reject = |msg: String| {
            warn!(curve_type = %self.curve_type, "rejecting curve params: {}", msg);
            Err(CurveError::InvalidParameters(msg))
        };

        if !self.base_price.is_finite() || self.base_price <= 0.0 {
            return reject(format!("base_price must be > 0, got {}", self.base_price));
        }

        match self.curve_type {
            CurveType::Linear => {
                let slope = self.slope.unwrap_or(DEFAULT_SLOPE);
                if !slope.is_finite() || slope == 0.0 {
                    return reject(format!("linear slope must be finite and non-zero, got {}", slope));
                }
            }
            CurveType::Exponential => {
                let exponent = self.exponent.unwrap_or(DEFAULT_EXPONENT);
                if !exponent.is_finite() || exponent == 0.0 {
                    return reject(format!(
                        "exponential exponent must be finite and non-zero, got {}",
                        exponent
                    ));
                }
            }
            CurveType::Unrecognized => {}
        }

        Ok(())
    }
}

/// A sampled point on the curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub supply: f64,
    pub price: f64,
}

/// Stateless pricing model with all defaults resolved
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BondingCurve {
    curve_type: CurveType,
    base_price: f64,
    slope: f64,
    exponent: f64,
}

impl Default for BondingCurve {
    fn default() -> Self {
        Self::new(CurveParams::default())
    }
}

impl From<CurveParams> for BondingCurve {
    fn from(params: CurveParams) -> Self {
        Self::new(params)
    }
}

impl BondingCurve {
    pub fn new(params: CurveParams) -> Self {
        Self {
            curve_type: params.curve_type,
            base_price: params.base_price,
            slope: params.slope.unwrap_or(DEFAULT_SLOPE),
            exponent: params.exponent.unwrap_or(DEFAULT_EXPONENT),
        }
    }

    pub fn curve_type(&self) -> CurveType {
        self.curve_type
    }

    pub fn base_price(&self) -> f64 {
        self.base_price
    }

    pub fn slope(&self) -> f64 {
        self.slope
    }

    pub fn exponent(&self) -> f64 {
        self.exponent
    }

    /// Price per token at the given supply.
    ///
    /// The exponential curve starts at zero for positive exponents, since
    /// `0^e == 0`. No floor is applied.
    pub fn price_at(&self, supply: f64) -> f64 {
        match self.curve_type {
            CurveType::Linear => self.base_price + self.slope * supply,
            CurveType::Exponential => self.base_price * supply.powf(self.exponent),
            CurveType::Unrecognized => self.base_price,
        }
    }

    /// Inverse of [`price_at`](Self::price_at) where both are real valued
    /// and monotonic.
    pub fn supply_at_price(&self, target_price: f64) -> f64 {
        match self.curve_type {
            CurveType::Linear => (target_price - self.base_price) / self.slope,
            CurveType::Exponential => (target_price / self.base_price).powf(1.0 / self.exponent),
            CurveType::Unrecognized => 0.0,
        }
    }

    pub fn price_point(&self, supply: f64) -> PricePoint {
        PricePoint {
            supply,
            price: self.price_at(supply),
        }
    }

    /// Market cap at the curve's own price for `supply`
    pub fn market_cap_at(&self, supply: f64) -> f64 {
        calculate_market_cap(supply, self.price_at(supply))
    }
}

/// Market cap for any supply/price pair, curve-derived or last-trade
pub fn calculate_market_cap(supply: f64, price: f64) -> f64 {
    supply * price
}

/// Inclusive threshold check, no tolerance
pub fn should_graduate(market_cap: f64) -> bool {
    market_cap >= GRADUATION_THRESHOLD
}
