//! Token graduation lifecycle
//!
//! The pricing model only answers "would this market cap graduate?". The
//! one-way trading → graduated transition lives here as an explicit tag that
//! the caller owns, observes with fresh market caps, and persists however it
//! likes.
//!
//! ```text
//!   ┌─────────┐   should_graduate(market_cap)   ┌───────────┐
//!   │ Trading │ ──────────────────────────────▶ │ Graduated │
//!   └─────────┘         (irreversible)          └───────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::bonding_curve::should_graduate;
use crate::constants::{GRADUATION_THRESHOLD, MAX_PROGRESS_PERCENT};
use crate::error::{CurveError, CurveResult};

/// Token lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Priced by the bonding curve
    #[default]
    Trading,
    /// Threshold reached, eligible for external exchange listing
    Graduated,
}

impl Phase {
    pub fn can_trade_on_curve(&self) -> bool {
        matches!(self, Phase::Trading)
    }

    pub fn is_graduated(&self) -> bool {
        matches!(self, Phase::Graduated)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Trading => write!(f, "trading"),
            Phase::Graduated => write!(f, "graduated"),
        }
    }
}

/// Progress toward the graduation threshold as a percentage in `[0, 100]`
pub fn graduation_progress(market_cap: f64) -> f64 {
    if market_cap.is_nan() {
        return 0.0;
    }
    (market_cap / GRADUATION_THRESHOLD * MAX_PROGRESS_PERCENT).clamp(0.0, MAX_PROGRESS_PERCENT)
}

/// Emitted exactly once, on the observation that graduates the token
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraduationEvent {
    pub market_cap: f64,
    pub threshold: f64,
}

/// Caller-owned graduation latch for a single token
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TokenLifecycle {
    phase: Phase,
    graduated_market_cap: Option<f64>,
}

impl TokenLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a token that storage already recorded as graduated
    pub fn graduated(market_cap: f64) -> Self {
        Self {
            phase: Phase::Graduated,
            graduated_market_cap: Some(market_cap),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_graduated(&self) -> bool {
        self.phase.is_graduated()
    }

    /// Market cap observed when the latch flipped
    pub fn graduated_market_cap(&self) -> Option<f64> {
        self.graduated_market_cap
    }

    /// Feed the latest market cap.
    ///
    /// Returns the event only on the trading → graduated transition. Once
    /// graduated the token stays graduated, even if market cap drops back
    /// below the threshold.
    pub fn observe(&mut self, market_cap: f64) -> Option<GraduationEvent> {
        if self.phase.is_graduated() {
            return None;
        }

        if !should_graduate(market_cap) {
            debug!(
                market_cap,
                progress = graduation_progress(market_cap),
                "token below graduation threshold"
            );
            return None;
        }

        self.phase = Phase::Graduated;
        self.graduated_market_cap = Some(market_cap);
        info!(market_cap, threshold = GRADUATION_THRESHOLD, "token graduated");

        Some(GraduationEvent {
            market_cap,
            threshold: GRADUATION_THRESHOLD,
        })
    }

    /// Guard for curve trades; fails once the token has graduated
    pub fn ensure_trading(&self) -> CurveResult<()> {
        if self.phase.can_trade_on_curve() {
            Ok(())
        } else {
            Err(CurveError::AlreadyGraduated(self.phase))
        }
    }
}
