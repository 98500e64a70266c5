//! Meme Token Bonding Curve
//!
//! Pricing and graduation model for meme token launches.
//!
//! This crate provides:
//! - Linear and exponential supply → price curves, plus their inverse
//! - Market cap and the $90k graduation threshold predicate
//! - Closed-form buy/sell quotes for simulated trades
//! - An explicit, caller-owned trading → graduated lifecycle tag
//! - A caller-owned, time-boxed price cache
//!
//! The pricing model is pure: every operation is closed-form arithmetic with
//! no I/O, locking or logging, and a [`BondingCurve`] can be shared freely
//! across threads.

pub mod bonding_curve;
pub mod config;
pub mod constants;
pub mod error;
pub mod graduation;
pub mod price_cache;
pub mod quote;

#[cfg(test)]
pub mod tests;

// Re-export key types
pub use bonding_curve::{
    calculate_market_cap, should_graduate, BondingCurve, CurveParams, CurveType, PricePoint,
};
pub use constants::GRADUATION_THRESHOLD;
pub use error::{CurveError, CurveResult};
pub use graduation::{graduation_progress, GraduationEvent, Phase, TokenLifecycle};
pub use price_cache::PriceCache;
pub use quote::{buy_quote, market_cap_usd, price_points, sell_quote, TradeQuote};
