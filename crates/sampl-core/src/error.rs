//! Error types for sampl-core.
//!
//! Sampling is total by default: almost every combinator substitutes a
//! fallback instead of failing. The few failure modes that remain live here.
//!
//! # Overview
//!
//! - [`Error::OutOfBounds`] - a bounds-checked read fell outside the extents
//! - [`Error::InvalidDimensions`] - a constructor was handed unusable extents
//!
//! # Usage
//!
//! ```rust
//! use sampl_core::{Error, Result};
//!
//! fn check(x: f64, y: f64, width: f64, height: f64) -> Result<()> {
//!     if x < 0.0 || y < 0.0 || x >= width || y >= height {
//!         return Err(Error::out_of_bounds(x, y, width, height));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check(4.0, 0.0, 4.0, 4.0).is_err());
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - For derive macro error implementation

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by core sampler operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A bounds-checked read fell outside `[0, width) x [0, height)`.
    ///
    /// Only produced by strict samplers; every other sampler is total.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sampl_core::Error;
    ///
    /// let err = Error::out_of_bounds(100.0, 50.0, 80.0, 60.0);
    /// assert!(err.to_string().contains("100"));
    /// ```
    #[error("sample ({x}, {y}) out of bounds for sampler {width}x{height}")]
    OutOfBounds {
        /// X coordinate that was out of bounds
        x: f64,
        /// Y coordinate that was out of bounds
        y: f64,
        /// Sampler width
        width: f64,
        /// Sampler height
        height: f64,
    },

    /// Invalid sampler extents.
    ///
    /// Returned when an extent is negative, zero where a positive value is
    /// required, or not finite.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: f64,
        /// Requested height
        height: f64,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// Generic error with custom message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Creates an [`Error::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::OutOfBounds {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: f64, height: f64, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Returns `true` if this is a bounds-related error.
    #[inline]
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. })
    }
}

/// Validates a pair of extents.
///
/// Extents must be finite and non-negative; when `require_positive` is set
/// they must also be strictly greater than zero.
///
/// # Example
///
/// ```rust
/// use sampl_core::validate_extents;
///
/// assert!(validate_extents(4.0, 2.5, true).is_ok());
/// assert!(validate_extents(0.0, 2.0, true).is_err());
/// assert!(validate_extents(0.0, 2.0, false).is_ok());
/// assert!(validate_extents(f64::NAN, 2.0, false).is_err());
/// ```
pub fn validate_extents(width: f64, height: f64, require_positive: bool) -> Result<()> {
    if !width.is_finite() || !height.is_finite() {
        return Err(Error::invalid_dimensions(width, height, "extents must be finite"));
    }
    if width < 0.0 || height < 0.0 {
        return Err(Error::invalid_dimensions(width, height, "extents must be non-negative"));
    }
    if require_positive && (width == 0.0 || height == 0.0) {
        return Err(Error::invalid_dimensions(width, height, "extents must be positive"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds() {
        let err = Error::out_of_bounds(100.0, 50.0, 80.0, 60.0);
        let msg = err.to_string();
        assert!(msg.contains("100"));
        assert!(msg.contains("50"));
        assert!(msg.contains("80x60"));
        assert!(err.is_bounds_error());
    }

    #[test]
    fn test_invalid_dimensions() {
        let err = Error::invalid_dimensions(-1.0, 4.0, "extents must be non-negative");
        assert!(err.to_string().contains("non-negative"));
        assert!(!err.is_bounds_error());
    }

    #[test]
    fn test_validate_extents() {
        assert!(validate_extents(1.0, 1.0, true).is_ok());
        assert!(validate_extents(0.5, 0.5, true).is_ok());
        assert!(validate_extents(-1.0, 1.0, false).is_err());
        assert!(validate_extents(1.0, f64::INFINITY, false).is_err());
        assert!(validate_extents(1.0, 0.0, true).is_err());
    }
}
