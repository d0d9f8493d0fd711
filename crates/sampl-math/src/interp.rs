//! Interpolation utilities.
//!
//! - Linear interpolation ([`lerp`], the [`Lerp`] trait)
//! - Bilinear blending of four lattice corners ([`bilinear`], [`bilinear_rgba`])
//! - Fractional parts ([`fract`])
//!
//! # Usage
//!
//! ```rust
//! use sampl_math::{lerp, Lerp};
//!
//! assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
//! assert_eq!(2.0f64.lerp(4.0, 0.25), 2.5);
//! ```

use sampl_core::Rgba;

/// Linear interpolation between two values.
///
/// Returns `a` when `t = 0.0`, and `b` when `t = 1.0`.
/// For values outside [0, 1], the result is extrapolated.
///
/// # Formula
///
/// `a + (b - a) * t`
///
/// # Example
///
/// ```rust
/// use sampl_math::lerp;
///
/// assert_eq!(lerp(0.0, 10.0, 0.0), 0.0);
/// assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
/// assert_eq!(lerp(0.0, 10.0, 1.0), 10.0);
/// ```
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Clamps a value to [0, 1].
#[inline]
pub fn saturate(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

/// Fract: returns the fractional part of a value, always in `[0, 1)`.
///
/// # Example
///
/// ```rust
/// use sampl_math::fract;
///
/// assert!((fract(1.75) - 0.75).abs() < 1e-12);
/// assert!((fract(-0.25) - 0.75).abs() < 1e-12);
/// ```
#[inline]
pub fn fract(x: f64) -> f64 {
    x - x.floor()
}

/// Values that can be blended linearly.
///
/// Implemented for the scalar types and [`Rgba`] (per channel).
pub trait Lerp: Sized {
    /// Blends from `self` toward `other` by `t`.
    fn lerp(self, other: Self, t: f64) -> Self;
}

impl Lerp for f64 {
    #[inline]
    fn lerp(self, other: Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for f32 {
    #[inline]
    fn lerp(self, other: Self, t: f64) -> Self {
        lerp(self, other, t as f32)
    }
}

impl Lerp for Rgba {
    #[inline]
    fn lerp(self, other: Self, t: f64) -> Self {
        let t = t as f32;
        [
            lerp(self[0], other[0], t),
            lerp(self[1], other[1], t),
            lerp(self[2], other[2], t),
            lerp(self[3], other[3], t),
        ]
    }
}

/// Bilinear blend of four corner values.
///
/// Blends along X on the top and bottom rows, then along Y between the two
/// results. `bx`/`by` of 0 select the left/top corners, 1 the right/bottom.
///
/// The argument order matches the resolver signature of the interpolating
/// combinators, so `bilinear::<f64>` can be passed to them directly.
///
/// # Example
///
/// ```rust
/// use sampl_math::bilinear;
///
/// assert_eq!(bilinear(1.0f64, 2.0, 3.0, 4.0, 0.0, 0.0), 1.0);
/// assert_eq!(bilinear(1.0f64, 2.0, 3.0, 4.0, 1.0, 1.0), 4.0);
/// assert_eq!(bilinear(1.0f64, 2.0, 3.0, 4.0, 0.25, 0.75), 2.75);
/// ```
#[inline]
pub fn bilinear<T: Lerp>(top_left: T, top_right: T, bottom_left: T, bottom_right: T, bx: f64, by: f64) -> T {
    let top = top_left.lerp(top_right, bx);
    let bottom = bottom_left.lerp(bottom_right, bx);
    top.lerp(bottom, by)
}

/// Bilinear blend of four colors.
///
/// Two blends along X (one per row) followed by one along Y, applied to
/// every channel including alpha.
#[inline]
pub fn bilinear_rgba(
    top_left: Rgba,
    top_right: Rgba,
    bottom_left: Rgba,
    bottom_right: Rgba,
    bx: f64,
    by: f64,
) -> Rgba {
    bilinear(top_left, top_right, bottom_left, bottom_right, bx, by)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 10.0, 0.0), 0.0);
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
        assert_eq!(lerp(0.0, 10.0, 1.0), 10.0);
    }

    #[test]
    fn test_saturate() {
        assert_eq!(saturate(-0.5), 0.0);
        assert_eq!(saturate(0.5), 0.5);
        assert_eq!(saturate(1.5), 1.0);
    }

    #[test]
    fn test_bilinear_corners() {
        let r = |bx, by| bilinear(1.0f64, 2.0, 3.0, 4.0, bx, by);
        assert_eq!(r(0.0, 0.0), 1.0);
        assert_eq!(r(1.0, 0.0), 2.0);
        assert_eq!(r(0.0, 1.0), 3.0);
        assert_eq!(r(1.0, 1.0), 4.0);
        assert_eq!(r(0.5, 0.5), 2.5);
        assert_eq!(r(0.25, 0.75), 2.75);
    }

    #[test]
    fn test_bilinear_f32() {
        assert_abs_diff_eq!(bilinear(0.0f32, 1.0, 1.0, 2.0, 0.5, 0.5), 1.0);
    }

    #[test]
    fn test_bilinear_rgba() {
        let black = [0.0, 0.0, 0.0, 1.0];
        let red = [1.0, 0.0, 0.0, 1.0];
        let blue = [0.0, 0.0, 1.0, 0.0];
        let c = bilinear_rgba(black, red, blue, black, 0.5, 0.5);
        assert_abs_diff_eq!(c[0], 0.25);
        assert_abs_diff_eq!(c[2], 0.25);
        assert_abs_diff_eq!(c[3], 0.75);

        let top_right = bilinear_rgba(black, red, blue, black, 1.0, 0.0);
        assert_eq!(top_right, red);
    }
}
