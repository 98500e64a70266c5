//! Curve errors
//!
//! The pricing model itself never fails; these errors are produced by the
//! opt-in validation, trade quoting and lifecycle helpers layered on top.

use thiserror::Error;

use crate::graduation::Phase;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    #[error("Invalid curve parameters: {0}")]
    InvalidParameters(String),

    #[error("Amount must be greater than zero")]
    ZeroAmount,

    #[error("Cannot sell {requested} tokens from a supply of {available}")]
    InsufficientSupply { requested: f64, available: f64 },

    #[error("Curve produced a non-finite {what}")]
    NonFiniteResult { what: &'static str },

    #[error("Token has already graduated (phase: {0})")]
    AlreadyGraduated(Phase),
}

pub type CurveResult<T> = std::result::Result<T, CurveError>;
