//! The sampler contract.
//!
//! A [`Sampler`] is a lazily evaluated 2D source with real-valued extents and
//! a pure, total `get(x, y)`. Nothing is stored up front: every combinator in
//! `sampl-ops` wraps a parent and forwards reads to it.
//!
//! # Coordinate System
//!
//! - Origin (0, 0) is at the **top-left** corner
//! - X increases to the right, Y increases downward
//! - Coordinates are `f64` and may be fractional, negative or past the extents
//!
//! ```text
//! (0,0) ────────► X
//!   │
//!   │   ┌──────────┐
//!   │   │ [0,w)x   │
//!   │   │   [0,h)  │
//!   │   └──────────┘
//!   ▼
//!   Y
//! ```
//!
//! # Sharing
//!
//! Samplers are implemented for `&S`, `Box<S>` and `Arc<S>`, so one parent can
//! feed many children at once. Reads have no side effects (the caching
//! combinator is the documented exception), which is what makes that sharing
//! sound.

use std::sync::Arc;

/// A 2D, real-coordinate-addressable, lazily evaluated data source.
///
/// # Contract
///
/// - `width()`/`height()` are fixed for the lifetime of the value.
/// - `get(x, y)` returns a value for **every** real `x`, `y`, including
///   negative, fractional and out-of-extent inputs.
/// - `get` is pure: the same coordinates yield the same value.
///
/// # Example
///
/// ```rust
/// use sampl_core::Sampler;
///
/// struct Checker;
///
/// impl Sampler for Checker {
///     type Item = bool;
///
///     fn width(&self) -> f64 { 8.0 }
///     fn height(&self) -> f64 { 8.0 }
///
///     fn get(&self, x: f64, y: f64) -> bool {
///         (x.floor() as i64 + y.floor() as i64).rem_euclid(2) == 0
///     }
/// }
///
/// assert!(Checker.get(0.0, 0.0));
/// assert!(!Checker.get(1.5, 0.0));
/// ```
pub trait Sampler {
    /// Value type produced by [`get`](Sampler::get).
    type Item;

    /// Horizontal extent. Non-negative, possibly fractional.
    fn width(&self) -> f64;

    /// Vertical extent. Non-negative, possibly fractional.
    fn height(&self) -> f64;

    /// Samples the value at `(x, y)`.
    fn get(&self, x: f64, y: f64) -> Self::Item;

    /// Returns `(width, height)`.
    #[inline]
    fn size(&self) -> (f64, f64) {
        (self.width(), self.height())
    }

    /// Returns `true` if `(x, y)` lies inside `[0, width) x [0, height)`.
    #[inline]
    fn contains(&self, x: f64, y: f64) -> bool {
        x >= 0.0 && y >= 0.0 && x < self.width() && y < self.height()
    }
}

/// Type-erased, thread-safe sampler.
///
/// Useful when heterogeneous combinator chains must live in one collection,
/// e.g. the sources of a stack.
pub type BoxedSampler<T> = Box<dyn Sampler<Item = T> + Send + Sync>;

impl<S: Sampler + ?Sized> Sampler for &S {
    type Item = S::Item;

    #[inline]
    fn width(&self) -> f64 {
        (**self).width()
    }

    #[inline]
    fn height(&self) -> f64 {
        (**self).height()
    }

    #[inline]
    fn get(&self, x: f64, y: f64) -> Self::Item {
        (**self).get(x, y)
    }
}

impl<S: Sampler + ?Sized> Sampler for Box<S> {
    type Item = S::Item;

    #[inline]
    fn width(&self) -> f64 {
        (**self).width()
    }

    #[inline]
    fn height(&self) -> f64 {
        (**self).height()
    }

    #[inline]
    fn get(&self, x: f64, y: f64) -> Self::Item {
        (**self).get(x, y)
    }
}

impl<S: Sampler + ?Sized> Sampler for Arc<S> {
    type Item = S::Item;

    #[inline]
    fn width(&self) -> f64 {
        (**self).width()
    }

    #[inline]
    fn height(&self) -> f64 {
        (**self).height()
    }

    #[inline]
    fn get(&self, x: f64, y: f64) -> Self::Item {
        (**self).get(x, y)
    }
}

/// Sampler backed by a closure.
///
/// Created by [`from_fn`].
#[derive(Clone)]
pub struct FromFn<F> {
    width: f64,
    height: f64,
    f: F,
}

impl<F> std::fmt::Debug for FromFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FromFn")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// Creates a sampler whose `get` is the given closure.
///
/// The closure must be total and pure; it is called for every read.
///
/// # Example
///
/// ```rust
/// use sampl_core::{from_fn, Sampler};
///
/// let gradient = from_fn(256.0, 1.0, |x, _| x / 255.0);
/// assert_eq!(gradient.width(), 256.0);
/// assert_eq!(gradient.get(255.0, 0.0), 1.0);
/// ```
pub fn from_fn<T, F>(width: f64, height: f64, f: F) -> FromFn<F>
where
    F: Fn(f64, f64) -> T,
{
    FromFn { width, height, f }
}

impl<T, F> Sampler for FromFn<F>
where
    F: Fn(f64, f64) -> T,
{
    type Item = T;

    #[inline]
    fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    fn height(&self) -> f64 {
        self.height
    }

    #[inline]
    fn get(&self, x: f64, y: f64) -> T {
        (self.f)(x, y)
    }
}

/// Number of integer lattice points `i` with `0 <= i < extent`.
///
/// This is the number of columns (or rows) visited by exports and views.
/// Fractional extents round up; negative or non-finite extents give zero.
///
/// # Example
///
/// ```rust
/// use sampl_core::lattice_len;
///
/// assert_eq!(lattice_len(4.0), 4);
/// assert_eq!(lattice_len(2.5), 3);
/// assert_eq!(lattice_len(0.0), 0);
/// assert_eq!(lattice_len(-3.0), 0);
/// ```
#[inline]
pub fn lattice_len(extent: f64) -> usize {
    if extent.is_finite() && extent > 0.0 {
        extent.ceil() as usize
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> FromFn<impl Fn(f64, f64) -> f64> {
        from_fn(4.0, 3.0, |x, y| x + y * 4.0)
    }

    #[test]
    fn test_from_fn() {
        let s = ramp();
        assert_eq!(s.size(), (4.0, 3.0));
        assert_eq!(s.get(1.0, 1.0), 5.0);
        assert_eq!(s.get(0.5, 0.0), 0.5);
    }

    #[test]
    fn test_contains() {
        let s = ramp();
        assert!(s.contains(0.0, 0.0));
        assert!(s.contains(3.99, 2.99));
        assert!(!s.contains(4.0, 0.0));
        assert!(!s.contains(0.0, -0.01));
    }

    #[test]
    fn test_shared_parents() {
        let s = Arc::new(ramp());
        let a = Arc::clone(&s);
        let b: &dyn Sampler<Item = f64> = &*s;
        assert_eq!(a.get(2.0, 2.0), b.get(2.0, 2.0));
        assert_eq!((&s).get(3.0, 0.0), 3.0);
    }

    #[test]
    fn test_boxed() {
        let boxed: BoxedSampler<f64> = Box::new(from_fn(2.0, 2.0, |x, y| x * y));
        assert_eq!(boxed.get(2.0, 3.0), 6.0);
        assert_eq!(boxed.width(), 2.0);
    }

    #[test]
    fn test_lattice_len() {
        assert_eq!(lattice_len(1.0), 1);
        assert_eq!(lattice_len(0.1), 1);
        assert_eq!(lattice_len(f64::NAN), 0);
        assert_eq!(lattice_len(f64::INFINITY), 0);
    }
}
