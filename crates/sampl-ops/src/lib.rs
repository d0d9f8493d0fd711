//! # sampl-ops
//!
//! Combinators over [`Sampler`]s.
//!
//! Every combinator wraps its parent and does its work at read time; nothing
//! here resamples or stores pixels except the explicit materializers
//! ([`SamplerExt::with_cache`], [`SamplerExt::stash`] and the exports).
//!
//! # Modules
//!
//! - [`transform`] - Translate, flip, quarter turns, scale, stretch, wrap, clamp, crop
//! - [`rotate`] - Rotation by an arbitrary angle
//! - [`value`] - Value maps and interpolation
//! - [`bounds`] - Out-of-bounds policies
//! - [`construct`] - Constant and array-backed samplers
//! - [`composite`] - Stacking and color compositing
//! - [`cache`] - Memoization
//! - [`view`] - Row/column views and eager exports
//! - [`parallel`] - Rayon exports (feature `parallel`)
//!
//! # Example
//!
//! ```rust
//! use sampl_core::{from_fn, Sampler};
//! use sampl_ops::{Direction, SamplerExt};
//!
//! let checker = from_fn(8.0, 8.0, |x: f64, y: f64| ((x.floor() + y.floor()) as i64 % 2) as f64);
//! let out = checker
//!     .rotate(Direction::Left)
//!     .scale_uniform(2.0)?
//!     .bilinear()
//!     .crop(4.0, 4.0, 8.0, 8.0)?
//!     .oob(0.0);
//!
//! assert_eq!(out.size(), (8.0, 8.0));
//! assert_eq!(out.get(8.0, 0.0), 0.0);
//! # Ok::<(), sampl_ops::OpsError>(())
//! ```
//!
//! Chains can grow without bound. Each read walks the whole chain, so put a
//! [`with_cache`](SamplerExt::with_cache) or [`stash`](SamplerExt::stash)
//! after expensive stages that are read repeatedly.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod bounds;
pub mod cache;
pub mod composite;
pub mod construct;
pub mod rotate;
pub mod transform;
pub mod value;
pub mod view;

#[cfg(feature = "parallel")]
pub mod parallel;

pub use error::{OpsError, OpsResult};

pub use bounds::{Oob, Strict};
pub use cache::{CacheEntry, CacheStats, Cached, Invalidator};
pub use composite::{
    apply_pixel, over_pixel, sequence, sequence_with, stack, CompositeMode, Placed, Sequence, Stack,
};
pub use construct::{from_columns, from_flat, from_rows, solid, FlatArray, Layout, Nested, Solid};
pub use rotate::{FillMissing, RotateAngle};
pub use transform::{CoordMap, Direction, MapCoords, Transformed};
pub use value::{Bilinear, Channel, Interpolate, InterpolateAs, Map};
pub use view::{Column, Columns, Row, Rows};

use sampl_core::{lattice_len, luminance_rec709, validate_extents, BoxedSampler, Rgba, Sampler};
use sampl_math::Lerp;

use crate::error::positive_factor;

/// Combinator methods for every [`Sampler`].
///
/// Methods that take `self` consume the sampler; pass `&s` (or an `Arc`)
/// to build several chains over one parent.
pub trait SamplerExt: Sampler + Sized {
    // ---- coordinate transforms ----

    /// Moves content by `(dx, dy)`: `result.get(x, y) == self.get(x - dx, y - dy)`.
    fn translate(self, dx: f64, dy: f64) -> Transformed<Self> {
        Transformed::same_size(self, CoordMap::Translate { dx, dy })
    }

    /// Mirrors left-right.
    fn flip_h(self) -> Transformed<Self> {
        let width = self.width();
        Transformed::same_size(self, CoordMap::FlipH { width })
    }

    /// Mirrors top-bottom.
    fn flip_v(self) -> Transformed<Self> {
        let height = self.height();
        Transformed::same_size(self, CoordMap::FlipV { height })
    }

    /// Turns a quarter left or right, or half over. Quarter turns swap
    /// width and height.
    fn rotate(self, direction: Direction) -> Transformed<Self> {
        let (width, height) = self.size();
        let map = CoordMap::Rotate {
            direction,
            width,
            height,
        };
        match direction {
            Direction::Left | Direction::Right => Transformed::new(self, map, height, width),
            Direction::Over => Transformed::new(self, map, width, height),
        }
    }

    /// Rotates clockwise by `angle` radians about the centre. See [`rotate`].
    fn rotate_angle(self, angle: f64) -> RotateAngle<Self> {
        RotateAngle::new(self, angle)
    }

    /// Rotates clockwise by `angle` radians about `(origin_x, origin_y)`.
    fn rotate_about(self, angle: f64, origin_x: f64, origin_y: f64) -> RotateAngle<Self> {
        RotateAngle::about(self, angle, origin_x, origin_y)
    }

    /// Replaces `None` reads with `value`.
    fn fill_missing<T>(self, value: T) -> FillMissing<Self, T>
    where
        Self: Sampler<Item = Option<T>>,
        T: Clone,
    {
        FillMissing::new(self, value)
    }

    /// Scales by `(sx, sy)`. Extents become exactly `(w * sx, h * sy)`.
    ///
    /// # Errors
    ///
    /// [`OpsError::InvalidDimensions`] unless both factors are finite and
    /// positive.
    fn scale(self, sx: f64, sy: f64) -> OpsResult<Transformed<Self>> {
        positive_factor("sx", sx)?;
        positive_factor("sy", sy)?;
        let (w, h) = self.size();
        Ok(Transformed::new(self, CoordMap::Scale { sx, sy }, w * sx, h * sy))
    }

    /// Scales both axes by `s`.
    fn scale_uniform(self, s: f64) -> OpsResult<Transformed<Self>> {
        self.scale(s, s)
    }

    /// Stretches to exactly `width x height`.
    fn stretch(self, width: f64, height: f64) -> OpsResult<Transformed<Self>> {
        positive_factor("width", width)?;
        positive_factor("height", height)?;
        let fx = self.width() / width;
        let fy = self.height() / height;
        Ok(Transformed::new(self, CoordMap::Stretch { fx, fy }, width, height))
    }

    /// Tiles the plane: every coordinate wraps into the extents.
    fn wrap(self) -> Transformed<Self> {
        let (width, height) = self.size();
        Transformed::same_size(self, CoordMap::Wrap { width, height })
    }

    /// Clamps coordinates onto the last lattice row/column, so edges
    /// extend outward.
    fn clamp_coords(self) -> Transformed<Self> {
        let max_x = (lattice_len(self.width()) as f64 - 1.0).max(0.0);
        let max_y = (lattice_len(self.height()) as f64 - 1.0).max(0.0);
        Transformed::same_size(self, CoordMap::Clamp { max_x, max_y })
    }

    /// Window of `width x height` starting at `(x, y)`. Reads outside the
    /// window still reach the parent.
    fn crop(self, x: f64, y: f64, width: f64, height: f64) -> OpsResult<Transformed<Self>> {
        if !x.is_finite() || !y.is_finite() {
            return Err(OpsError::InvalidParameter(format!(
                "crop origin must be finite, got ({x}, {y})"
            )));
        }
        validate_extents(width, height, false)?;
        Ok(Transformed::new(self, CoordMap::Crop { x, y }, width, height))
    }

    /// Floors coordinates before reading.
    fn floor_coords(self) -> Transformed<Self> {
        Transformed::same_size(self, CoordMap::Floor)
    }

    /// Rounds coordinates before reading.
    fn round_coords(self) -> Transformed<Self> {
        Transformed::same_size(self, CoordMap::Round)
    }

    /// Remaps coordinates with `f(x, y) -> (px, py)`. Extents unchanged.
    fn map_coords<F>(self, f: F) -> MapCoords<Self, F>
    where
        F: Fn(f64, f64) -> (f64, f64),
    {
        MapCoords::new(self, f)
    }

    // ---- bounds ----

    /// Returns `value` outside `[0, w) x [0, h)`.
    fn oob(self, value: Self::Item) -> Oob<Self, Self::Item>
    where
        Self::Item: Clone,
    {
        Oob::new(self, value)
    }

    /// Reads as `Result`, with out-of-range reads as errors.
    fn strict(self) -> Strict<Self> {
        Strict::new(self)
    }

    // ---- values ----

    /// Applies `f` to every value read.
    fn map<U, F>(self, f: F) -> Map<Self, F>
    where
        F: Fn(Self::Item) -> U,
    {
        Map::new(self, f)
    }

    /// Blends lattice neighbours of fractional reads with `resolver`.
    fn interpolate<R>(self, resolver: R) -> Interpolate<Self, R>
    where
        R: Fn(Self::Item, Self::Item, Self::Item, Self::Item, f64, f64) -> Self::Item,
    {
        Interpolate::new(self, resolver)
    }

    /// Like [`interpolate`](Self::interpolate), producing a different type.
    fn interpolate_as<U, R>(self, resolver: R) -> InterpolateAs<Self, R>
    where
        R: Fn(Self::Item, Self::Item, Self::Item, Self::Item, f64, f64) -> U,
    {
        InterpolateAs::new(self, resolver)
    }

    /// Bilinear interpolation for any [`Lerp`] value.
    fn bilinear(self) -> Bilinear<Self>
    where
        Self::Item: Lerp,
    {
        value::bilinear(self)
    }

    /// One channel of a color sampler.
    fn channel(self, index: usize) -> Channel<Self>
    where
        Self: Sampler<Item = Rgba>,
    {
        Channel::new(self, index)
    }

    /// Rec.709 luminance of a color sampler.
    fn luminance(self) -> Map<Self, fn(Rgba) -> f32>
    where
        Self: Sampler<Item = Rgba>,
    {
        Map::new(self, luminance_rec709 as fn(Rgba) -> f32)
    }

    // ---- materialization ----

    /// Memoizes reads by exact coordinate.
    fn with_cache(self) -> Cached<Self> {
        Cached::new(self, None)
    }

    /// Memoizes reads, re-reading whenever `invalidator` returns `true`.
    ///
    /// ```rust
    /// use std::time::Duration;
    /// use sampl_core::{from_fn, Sampler};
    /// use sampl_ops::SamplerExt;
    ///
    /// let ttl = from_fn(4.0, 4.0, |x, y| x + y)
    ///     .with_cache_by(|e| e.age > Duration::from_secs(1) || e.size > 1024);
    /// assert_eq!(ttl.get(1.0, 2.0), 3.0);
    /// ```
    fn with_cache_by<F>(self, invalidator: F) -> Cached<Self>
    where
        F: Fn(&CacheEntry<'_, Self::Item>) -> bool + Send + Sync + 'static,
    {
        Cached::new(self, Some(Box::new(invalidator)))
    }

    /// Reads the whole lattice now; see [`cache::stash`].
    fn stash(&self, fallback: Self::Item) -> OpsResult<FlatArray<Self::Item, Vec<Self::Item>>>
    where
        Self::Item: Clone,
    {
        cache::stash(self, fallback)
    }

    /// Type-erases the chain.
    fn boxed(self) -> BoxedSampler<Self::Item>
    where
        Self: Send + Sync + 'static,
    {
        Box::new(self)
    }

    // ---- views and exports ----

    /// Lazy row view.
    fn rows(&self) -> Rows<'_, Self> {
        Rows::new(self)
    }

    /// Lazy column view.
    fn columns(&self) -> Columns<'_, Self> {
        Columns::new(self)
    }

    /// Nested columns, `out[x][y]`.
    fn to_array_xy(&self) -> Vec<Vec<Self::Item>> {
        view::to_array_xy(self)
    }

    /// Nested rows, `out[y][x]`.
    fn to_array_yx(&self) -> Vec<Vec<Self::Item>> {
        view::to_array_yx(self)
    }

    /// Flat, `out[y * w + x]`.
    fn to_flat_xy(&self) -> Vec<Self::Item> {
        view::to_flat_xy(self)
    }

    /// Flat, `out[x * h + y]`.
    fn to_flat_yx(&self) -> Vec<Self::Item> {
        view::to_flat_yx(self)
    }

    /// [`to_flat_xy`](Self::to_flat_xy) on the Rayon pool.
    #[cfg(feature = "parallel")]
    fn par_to_flat_xy(&self) -> Vec<Self::Item>
    where
        Self: Sync,
        Self::Item: Send,
    {
        parallel::par_to_flat_xy(self)
    }

    /// [`to_flat_yx`](Self::to_flat_yx) on the Rayon pool.
    #[cfg(feature = "parallel")]
    fn par_to_flat_yx(&self) -> Vec<Self::Item>
    where
        Self: Sync,
        Self::Item: Send,
    {
        parallel::par_to_flat_yx(self)
    }
}

impl<S: Sampler> SamplerExt for S {}

#[cfg(test)]
mod tests {
    use super::*;
    use sampl_core::from_fn;
    use std::sync::Arc;

    #[test]
    fn test_deep_chain() {
        let src = from_fn(4.0, 4.0, |x, y| x + y * 4.0);
        let mut chain: BoxedSampler<f64> = src.boxed();
        for _ in 0..100 {
            chain = chain.flip_h().flip_h().boxed();
        }
        assert_eq!(chain.get(1.0, 2.0), 9.0);
    }

    #[test]
    fn test_shared_parent() {
        let src = Arc::new(from_fn(4.0, 4.0, |x, y| x * y));
        let a = Arc::clone(&src).translate(1.0, 0.0);
        let b = src.flip_v();
        assert_eq!(a.get(3.0, 3.0), 6.0);
        assert_eq!(b.get(3.0, 0.0), 9.0);
    }

    #[test]
    fn test_borrowed_parent() {
        let src = from_fn(2.0, 2.0, |x, y| x - y);
        let flipped = (&src).flip_h();
        assert_eq!(flipped.get(0.0, 0.0), 1.0);
        assert_eq!(src.get(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_luminance() {
        let white = from_fn(1.0, 1.0, |_, _| [1.0f32, 1.0, 1.0, 1.0]).luminance();
        assert!((white.get(0.0, 0.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_scale_then_stretch_back() {
        let src = from_fn(4.0, 4.0, |x, y| x + y * 4.0);
        let round_trip = (&src).scale(2.0, 3.0).unwrap().stretch(4.0, 4.0).unwrap();
        for y in 0..4 {
            for x in 0..4 {
                let (x, y) = (x as f64, y as f64);
                assert_eq!(round_trip.get(x, y), src.get(x, y));
            }
        }
    }
}
