//! Coordinate-transform combinators.
//!
//! Every transform here maps the child's requested `(x, y)` into parent
//! space and delegates the read. Nothing is resampled or stored.
//!
//! # Operations
//!
//! | Map | Extents | Child → parent |
//! |---|---|---|
//! | [`CoordMap::Translate`] | unchanged | `(x - dx, y - dy)` |
//! | [`CoordMap::FlipH`] | unchanged | `(w - x - 1, y)` |
//! | [`CoordMap::FlipV`] | unchanged | `(x, h - y - 1)` |
//! | [`CoordMap::Rotate`] | swapped for left/right | exact integer remap |
//! | [`CoordMap::Scale`] | `(w·sx, h·sy)` | `(x / sx, y / sy)` |
//! | [`CoordMap::Stretch`] | `(new_w, new_h)` | `(x·w / new_w, y·h / new_h)` |
//! | [`CoordMap::Wrap`] | unchanged | `(x mod w, y mod h)`, never negative |
//! | [`CoordMap::Clamp`] | unchanged | `(clamp(x, 0, w-1), clamp(y, 0, h-1))` |
//! | [`CoordMap::Crop`] | `(cw, ch)` | `(x + x0, y + y0)` |
//! | [`CoordMap::Floor`] / [`CoordMap::Round`] | unchanged | `floor`/`round` per axis |
//!
//! Arbitrary closures go through [`MapCoords`]; every variant above could be
//! written as one.
//!
//! # Example
//!
//! ```rust
//! use sampl_core::{from_fn, Sampler};
//! use sampl_ops::{Direction, SamplerExt};
//!
//! let src = from_fn(4.0, 2.0, |x, y| x + y * 4.0);
//! let turned = src.rotate(Direction::Right);
//! assert_eq!(turned.size(), (2.0, 4.0));
//! assert_eq!(turned.get(1.0, 0.0), 0.0); // top-left moved to top-right
//! ```

use sampl_core::Sampler;
use tracing::trace;

/// Quarter-turn rotation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// 90 degrees counter-clockwise.
    Left,
    /// 90 degrees clockwise.
    Right,
    /// 180 degrees.
    Over,
}

impl Direction {
    /// The rotation that undoes this one.
    pub const fn inverse(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Over => Self::Over,
        }
    }
}

/// A child-to-parent coordinate mapping.
///
/// Variants that depend on the parent's extents capture them at
/// construction, so the mapping stays valid however deep the chain grows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoordMap {
    /// Shift by `(dx, dy)`.
    Translate {
        /// Horizontal offset
        dx: f64,
        /// Vertical offset
        dy: f64,
    },
    /// Mirror left-right inside `[0, width)`.
    FlipH {
        /// Parent width
        width: f64,
    },
    /// Mirror top-bottom inside `[0, height)`.
    FlipV {
        /// Parent height
        height: f64,
    },
    /// Quarter or half turn.
    Rotate {
        /// Turn direction
        direction: Direction,
        /// Parent width
        width: f64,
        /// Parent height
        height: f64,
    },
    /// Divide coordinates by the scale factors.
    Scale {
        /// Horizontal factor
        sx: f64,
        /// Vertical factor
        sy: f64,
    },
    /// Multiply coordinates by parent/child extent ratios.
    Stretch {
        /// `parent_width / new_width`
        fx: f64,
        /// `parent_height / new_height`
        fy: f64,
    },
    /// Wrap into `[0, width) x [0, height)`.
    Wrap {
        /// Parent width
        width: f64,
        /// Parent height
        height: f64,
    },
    /// Clamp into `[0, max_x] x [0, max_y]`.
    Clamp {
        /// Largest x handed to the parent
        max_x: f64,
        /// Largest y handed to the parent
        max_y: f64,
    },
    /// Offset into a crop window.
    Crop {
        /// Window left edge in parent space
        x: f64,
        /// Window top edge in parent space
        y: f64,
    },
    /// Floor both coordinates.
    Floor,
    /// Round both coordinates to nearest, halves away from zero.
    Round,
}

impl CoordMap {
    /// Maps a child coordinate into parent space.
    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        match *self {
            Self::Translate { dx, dy } => (x - dx, y - dy),
            Self::FlipH { width } => (width - x - 1.0, y),
            Self::FlipV { height } => (x, height - y - 1.0),
            Self::Rotate {
                direction,
                width,
                height,
            } => match direction {
                Direction::Left => (width - y - 1.0, x),
                Direction::Right => (y, height - x - 1.0),
                Direction::Over => (width - x - 1.0, height - y - 1.0),
            },
            Self::Scale { sx, sy } => (x / sx, y / sy),
            Self::Stretch { fx, fy } => (x * fx, y * fy),
            Self::Wrap { width, height } => (wrap(x, width), wrap(y, height)),
            Self::Clamp { max_x, max_y } => (x.clamp(0.0, max_x), y.clamp(0.0, max_y)),
            Self::Crop { x: x0, y: y0 } => (x + x0, y + y0),
            Self::Floor => (x.floor(), y.floor()),
            Self::Round => (x.round(), y.round()),
        }
    }
}

/// Euclidean remainder in `[0, period)`; zero or negative periods leave the
/// value alone.
#[inline]
fn wrap(v: f64, period: f64) -> f64 {
    if period <= 0.0 {
        return v;
    }
    // Tiny negatives round up to exactly `period`.
    let r = v.rem_euclid(period);
    if r >= period { 0.0 } else { r }
}

/// Sampler that remaps coordinates through a [`CoordMap`].
///
/// Built by the coordinate methods of [`SamplerExt`](crate::SamplerExt).
#[derive(Debug, Clone)]
pub struct Transformed<S> {
    parent: S,
    map: CoordMap,
    width: f64,
    height: f64,
}

impl<S: Sampler> Transformed<S> {
    pub(crate) fn new(parent: S, map: CoordMap, width: f64, height: f64) -> Self {
        trace!(?map, width, height, "transform");
        Self {
            parent,
            map,
            width,
            height,
        }
    }

    /// Wraps `parent` with a map that keeps its extents.
    pub(crate) fn same_size(parent: S, map: CoordMap) -> Self {
        let (w, h) = parent.size();
        Self::new(parent, map, w, h)
    }

    /// The wrapped sampler.
    pub fn parent(&self) -> &S {
        &self.parent
    }
}

impl<S: Sampler> Sampler for Transformed<S> {
    type Item = S::Item;

    #[inline]
    fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    fn height(&self) -> f64 {
        self.height
    }

    #[inline]
    fn get(&self, x: f64, y: f64) -> S::Item {
        let (px, py) = self.map.apply(x, y);
        self.parent.get(px, py)
    }
}

/// Sampler that remaps coordinates through a closure.
///
/// The escape hatch for transforms [`CoordMap`] does not cover.
#[derive(Clone)]
pub struct MapCoords<S, F> {
    parent: S,
    f: F,
}

impl<S, F> MapCoords<S, F> {
    pub(crate) fn new(parent: S, f: F) -> Self {
        Self { parent, f }
    }
}

impl<S, F> Sampler for MapCoords<S, F>
where
    S: Sampler,
    F: Fn(f64, f64) -> (f64, f64),
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
        let (px, py) = (self.f)(x, y);
        self.parent.get(px, py)
    }
}
