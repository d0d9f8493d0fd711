//! Out-of-bounds policies.
//!
//! Most samplers delegate out-of-range reads to their parent unchanged.
//! These two wrappers replace that with an explicit policy:
//!
//! - [`Oob`] - substitute a fixed value outside `[0, w) x [0, h)`
//! - [`Strict`] - report outside reads as [`Error::OutOfBounds`]

use sampl_core::{Error, Result, Sampler};

/// Returns a fixed value for any read outside the extents.
#[derive(Debug, Clone)]
pub struct Oob<S, T> {
    parent: S,
    value: T,
}

impl<S, T> Oob<S, T> {
    pub(crate) fn new(parent: S, value: T) -> Self {
        Self { parent, value }
    }
}

impl<S> Sampler for Oob<S, S::Item>
where
    S: Sampler,
    S::Item: Clone,
{
    type Item = S::Item;

    #[inline]
    fn width(&self) -> f64 {
        self.parent.width()
    }

    #[inline]
    fn height(&self) -> f64 {
        self.parent.height()
    }

    #[inline]
    fn get(&self, x: f64, y: f64) -> S::Item {
        if self.parent.contains(x, y) {
            self.parent.get(x, y)
        } else {
            self.value.clone()
        }
    }
}

/// Bounds-checked sampler.
///
/// In-range reads yield `Ok(value)`; anything else yields
/// `Err(Error::OutOfBounds { .. })`.
#[derive(Debug, Clone)]
pub struct Strict<S> {
    parent: S,
}

impl<S> Strict<S> {
    pub(crate) fn new(parent: S) -> Self {
        Self { parent }
    }
}

impl<S: Sampler> Sampler for Strict<S> {
    type Item = Result<S::Item>;

    #[inline]
    fn width(&self) -> f64 {
        self.parent.width()
    }

    #[inline]
    fn height(&self) -> f64 {
        self.parent.height()
    }

    fn get(&self, x: f64, y: f64) -> Result<S::Item> {
        if self.parent.contains(x, y) {
            Ok(self.parent.get(x, y))
        } else {
            Err(Error::out_of_bounds(x, y, self.parent.width(), self.parent.height()))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::SamplerExt;
    use sampl_core::{from_fn, Error, Sampler};

    #[test]
    fn test_oob() {
        let s = from_fn(2.0, 2.0, |x, y| x + y).oob(-1.0);
        assert_eq!(s.get(1.0, 1.0), 2.0);
        assert_eq!(s.get(1.99, 0.0), 1.99);
        assert_eq!(s.get(2.0, 0.0), -1.0);
        assert_eq!(s.get(0.0, -0.1), -1.0);
    }

    #[test]
    fn test_strict() {
        let s = from_fn(3.0, 2.0, |x, y| x * y).strict();
        assert_eq!(s.get(2.0, 1.0), Ok(2.0));
        let err = s.get(3.0, 1.0).unwrap_err();
        assert!(err.is_bounds_error());
        assert_eq!(err, Error::out_of_bounds(3.0, 1.0, 3.0, 2.0));
        assert!(s.get(-1.0, 0.0).is_err());
    }

    #[test]
    fn test_oob_after_translate() {
        let s = from_fn(2.0, 2.0, |x, _| x).translate(5.0, 0.0).oob(f64::NAN);
        assert_eq!(s.get(0.0, 0.0), -5.0);
        assert!(s.get(2.0, 0.0).is_nan());
    }
}
