//! Value-transform combinators.
//!
//! - [`Map`] - apply a function to every read
//! - [`Interpolate`] - blend the four lattice neighbours of fractional reads
//! - [`InterpolateAs`] - same, but the resolver may change the value type
//! - [`Channel`] - pick one channel of a color sampler
//!
//! # Resolvers
//!
//! A resolver receives `(top_left, top_right, bottom_left, bottom_right, bx, by)`
//! where `bx`/`by` are the fractional parts of the coordinates. The reference
//! resolvers are [`sampl_math::bilinear`] (any [`Lerp`] value) and
//! [`sampl_math::bilinear_rgba`] (colors).
//!
//! # Example
//!
//! ```rust
//! use sampl_core::{from_fn, Sampler};
//! use sampl_math::bilinear;
//! use sampl_ops::SamplerExt;
//!
//! let src = from_fn(4.0, 4.0, |x, y| x.floor() + y.floor() * 4.0);
//! let smooth = src.interpolate(bilinear::<f64>);
//! assert_eq!(smooth.get(1.0, 1.0), 5.0);
//! assert_eq!(smooth.get(1.5, 1.0), 5.5);
//! ```

use sampl_core::{lattice_len, Rgba, Sampler};
use sampl_math::{fract, Lerp};

/// Applies a function to every value read from the parent.
#[derive(Clone)]
pub struct Map<S, F> {
    parent: S,
    f: F,
}

impl<S, F> Map<S, F> {
    pub(crate) fn new(parent: S, f: F) -> Self {
        Self { parent, f }
    }
}

impl<S, F, U> Sampler for Map<S, F>
where
    S: Sampler,
    F: Fn(S::Item) -> U,
{
    type Item = U;

    #[inline]
    fn width(&self) -> f64 {
        self.parent.width()
    }

    #[inline]
    fn height(&self) -> f64 {
        self.parent.height()
    }

    #[inline]
    fn get(&self, x: f64, y: f64) -> U {
        (self.f)(self.parent.get(x, y))
    }
}

/// The four lattice neighbours of a coordinate plus blend weights.
struct Corners<T> {
    top_left: T,
    top_right: T,
    bottom_left: T,
    bottom_right: T,
    bx: f64,
    by: f64,
}

/// Reads the floor/ceil neighbours of `(x, y)`, each clamped into the
/// parent's lattice.
fn corners<S: Sampler + ?Sized>(parent: &S, x: f64, y: f64) -> Corners<S::Item> {
    let max_x = (lattice_len(parent.width()) as f64 - 1.0).max(0.0);
    let max_y = (lattice_len(parent.height()) as f64 - 1.0).max(0.0);

    let x0 = x.floor().clamp(0.0, max_x);
    let x1 = x.ceil().clamp(0.0, max_x);
    let y0 = y.floor().clamp(0.0, max_y);
    let y1 = y.ceil().clamp(0.0, max_y);

    Corners {
        top_left: parent.get(x0, y0),
        top_right: parent.get(x1, y0),
        bottom_left: parent.get(x0, y1),
        bottom_right: parent.get(x1, y1),
        bx: fract(x),
        by: fract(y),
    }
}

#[inline]
fn is_integral(x: f64, y: f64) -> bool {
    x.fract() == 0.0 && y.fract() == 0.0
}

/// Interpolating sampler whose resolver keeps the value type.
///
/// Reads at integral coordinates bypass the resolver and return the
/// parent's value unchanged.
#[derive(Clone)]
pub struct Interpolate<S, R> {
    parent: S,
    resolver: R,
}

impl<S, R> Interpolate<S, R> {
    pub(crate) fn new(parent: S, resolver: R) -> Self {
        Self { parent, resolver }
    }
}

impl<S, R> Sampler for Interpolate<S, R>
where
    S: Sampler,
    R: Fn(S::Item, S::Item, S::Item, S::Item, f64, f64) -> S::Item,
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

    fn get(&self, x: f64, y: f64) -> S::Item {
        if is_integral(x, y) {
            return self.parent.get(x, y);
        }
        let c = corners(&self.parent, x, y);
        (self.resolver)(c.top_left, c.top_right, c.bottom_left, c.bottom_right, c.bx, c.by)
    }
}

/// Interpolating sampler whose resolver produces a new value type.
///
/// Every read goes through the resolver, integral or not.
#[derive(Clone)]
pub struct InterpolateAs<S, R> {
    parent: S,
    resolver: R,
}

impl<S, R> InterpolateAs<S, R> {
    pub(crate) fn new(parent: S, resolver: R) -> Self {
        Self { parent, resolver }
    }
}

impl<S, R, U> Sampler for InterpolateAs<S, R>
where
    S: Sampler,
    R: Fn(S::Item, S::Item, S::Item, S::Item, f64, f64) -> U,
{
    type Item = U;

    #[inline]
    fn width(&self) -> f64 {
        self.parent.width()
    }

    #[inline]
    fn height(&self) -> f64 {
        self.parent.height()
    }

    fn get(&self, x: f64, y: f64) -> U {
        let c = corners(&self.parent, x, y);
        (self.resolver)(c.top_left, c.top_right, c.bottom_left, c.bottom_right, c.bx, c.by)
    }
}

/// Signature of [`sampl_math::bilinear`] for a concrete value type.
pub type BilinearFn<T> = fn(T, T, T, T, f64, f64) -> T;

/// Bilinear interpolation with the generic [`Lerp`] resolver.
pub type Bilinear<S> = Interpolate<S, BilinearFn<<S as Sampler>::Item>>;

pub(crate) fn bilinear<S>(parent: S) -> Bilinear<S>
where
    S: Sampler,
    S::Item: Lerp,
{
    Interpolate::new(parent, sampl_math::bilinear::<S::Item> as BilinearFn<S::Item>)
}

/// Single channel of a color sampler. Indices past alpha read as `0.0`.
#[derive(Debug, Clone)]
pub struct Channel<S> {
    parent: S,
    index: usize,
}

impl<S> Channel<S> {
    pub(crate) fn new(parent: S, index: usize) -> Self {
        Self { parent, index }
    }
}

impl<S: Sampler<Item = Rgba>> Sampler for Channel<S> {
    type Item = f32;

    #[inline]
    fn width(&self) -> f64 {
        self.parent.width()
    }

    #[inline]
    fn height(&self) -> f64 {
        self.parent.height()
    }

    #[inline]
    fn get(&self, x: f64, y: f64) -> f32 {
        self.parent.get(x, y).get(self.index).copied().unwrap_or(0.0)
    }
}
