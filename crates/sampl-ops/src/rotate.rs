//! Rotation by an arbitrary angle.
//!
//! The destination is the square that bounds the rotated parent (see
//! [`rotated_side`]). Each destination coordinate is inverse-rotated into
//! parent space and rounded to the nearest lattice point, so the result is
//! nearest-neighbour; interpolate the parent first for smooth output.
//!
//! Integer coordinates address pixel centres (`x + 0.5`), the same
//! convention the renderer samples with. With it a quarter turn by angle
//! lands exactly on [`Direction::Right`](crate::Direction::Right) for odd-sized
//! parents, and a half turn on [`Direction::Over`](crate::Direction::Over).
//!
//! Destination points that land outside the parent have no source value and
//! read as `None`. [`FillMissing`] turns them into a fixed value.
//!
//! # Example
//!
//! ```rust
//! use sampl_core::{from_fn, Sampler};
//! use sampl_ops::SamplerExt;
//!
//! let src = from_fn(4.0, 4.0, |x, y| x + y * 4.0);
//! let tilted = src.rotate_angle(30f64.to_radians());
//! assert!(tilted.width() > 4.0);
//! assert_eq!(tilted.get(0.0, 0.0), None); // corner of the bounding square
//! ```

use sampl_core::Sampler;
use sampl_math::{rotated_side, InverseRotation};

/// Sampler rotated by an arbitrary angle, `None` where no source exists.
#[derive(Debug, Clone)]
pub struct RotateAngle<S> {
    parent: S,
    inverse: InverseRotation,
    side: f64,
}

impl<S: Sampler> RotateAngle<S> {
    /// Rotates about the centre of `parent`.
    pub(crate) fn new(parent: S, angle: f64) -> Self {
        let (ox, oy) = (parent.width() / 2.0, parent.height() / 2.0);
        Self::about(parent, angle, ox, oy)
    }

    /// Rotates about `(origin_x, origin_y)` in parent space.
    ///
    /// The centre of the destination square maps onto the origin.
    pub(crate) fn about(parent: S, angle: f64, origin_x: f64, origin_y: f64) -> Self {
        let side = rotated_side(parent.width(), parent.height(), angle);
        let center = side / 2.0;
        tracing::trace!(angle, origin_x, origin_y, side, "rotate_angle");
        Self {
            parent,
            inverse: InverseRotation::new(angle, (center, center), (origin_x, origin_y)),
            side,
        }
    }
}

impl<S: Sampler> Sampler for RotateAngle<S> {
    type Item = Option<S::Item>;

    #[inline]
    fn width(&self) -> f64 {
        self.side
    }

    #[inline]
    fn height(&self) -> f64 {
        self.side
    }

    fn get(&self, x: f64, y: f64) -> Option<S::Item> {
        let (sx, sy) = self.inverse.apply(x + 0.5, y + 0.5);
        let (sx, sy) = ((sx - 0.5).round(), (sy - 0.5).round());
        self.parent
            .contains(sx, sy)
            .then(|| self.parent.get(sx, sy))
    }
}

/// Replaces `None` reads with a fixed value.
#[derive(Debug, Clone)]
pub struct FillMissing<S, T> {
    parent: S,
    value: T,
}

impl<S, T> FillMissing<S, T> {
    pub(crate) fn new(parent: S, value: T) -> Self {
        Self { parent, value }
    }
}

impl<S, T> Sampler for FillMissing<S, T>
where
    S: Sampler<Item = Option<T>>,
    T: Clone,
{
    type Item = T;

    #[inline]
    fn width(&self) -> f64 {
        self.parent.width()
    }

    #[inline]
    fn height(&self) -> f64 {
        self.parent.height()
    }

    #[inline]
    fn get(&self, x: f64, y: f64) -> T {
        self.parent
            .get(x, y)
            .unwrap_or_else(|| self.value.clone())
    }
}
