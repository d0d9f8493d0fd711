//! Error types for sampler construction.

use thiserror::Error;

/// Error type for combinators that validate their inputs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OpsError {
    /// Invalid extents or scale factors.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A multi-source combinator was given no sources.
    #[error("no sources: {0} needs at least one sampler")]
    EmptySources(&'static str),

    /// Error from the core crate.
    #[error(transparent)]
    Core(#[from] sampl_core::Error),
}

/// Result type for sampler construction.
pub type OpsResult<T> = Result<T, OpsError>;

/// Rejects factors that are not finite and strictly positive.
pub(crate) fn positive_factor(name: &str, v: f64) -> OpsResult<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(OpsError::InvalidDimensions(format!(
            "{name} must be finite and > 0, got {v}"
        )))
    }
}
