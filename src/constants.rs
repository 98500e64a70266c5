//! Shared constants for the bonding curve system

// Graduation
pub const GRADUATION_THRESHOLD: f64 = 90_000.0; // $90k USD market cap

// Bonding curve defaults
pub const DEFAULT_BASE_PRICE: f64 = 0.0001;
pub const DEFAULT_SLOPE: f64 = 0.0001;     // Only read by linear curves
pub const DEFAULT_EXPONENT: f64 = 1.5;     // Only read by exponential curves

// Price cache
pub const DEFAULT_PRICE_CACHE_TTL_SECS: u64 = 60;
pub const DEFAULT_PRICE_CACHE_CAPACITY: usize = 1_024;

// Progress reporting
pub const MAX_PROGRESS_PERCENT: f64 = 100.0;
