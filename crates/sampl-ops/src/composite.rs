//! Multi-source stacking and color compositing.
//!
//! # Stacking
//!
//! [`stack`] places samplers at offsets on a shared canvas. The topmost
//! (last listed) source containing a point answers the read; nothing is
//! blended.
//!
//! # Compositing
//!
//! [`sequence`] folds every source's color at a point through a blend
//! rule, bottom to top, starting from [`TRANSPARENT`]:
//!
//! - [`CompositeMode::Simple`] - [`apply_pixel`], a lerp toward the
//!   foreground by its alpha; result alpha is the larger of the two
//! - [`CompositeMode::Over`] - [`over_pixel`], Porter-Duff over
//!
//! # Example
//!
//! ```rust
//! use sampl_core::Sampler;
//! use sampl_ops::composite::{apply_pixel, stack, Placed};
//! use sampl_ops::solid;
//!
//! let bg = [0.0, 0.0, 1.0, 1.0];
//! assert_eq!(apply_pixel(bg, [1.0, 0.0, 0.0, 0.0]), bg);
//!
//! let s = stack(
//!     vec![
//!         Placed::new(solid(1, 4.0, 4.0).unwrap(), 0.0, 0.0),
//!         Placed::new(solid(2, 2.0, 2.0).unwrap(), 1.0, 1.0),
//!     ],
//!     0,
//! )
//! .unwrap();
//! assert_eq!(s.get(0.0, 0.0), 1);
//! assert_eq!(s.get(2.0, 2.0), 2);
//! ```

use sampl_core::{Rect, Rgba, Sampler, TRANSPARENT};
use sampl_math::{lerp, saturate};
use tracing::trace;

use crate::{OpsError, OpsResult};

/// Blends `fg` onto `bg`.
///
/// Fully transparent foregrounds leave `bg` untouched and fully opaque
/// ones replace it. In between, each color channel moves toward the
/// foreground by the foreground alpha, and the result alpha is
/// `max(bg.alpha, fg.alpha)`. This is not Porter-Duff over; use
/// [`over_pixel`] for that.
#[inline]
pub fn apply_pixel(bg: Rgba, fg: Rgba) -> Rgba {
    let a = fg[3];
    if a <= 0.0 {
        return bg;
    }
    if a >= 1.0 {
        return fg;
    }
    let t = saturate(a);
    [
        lerp(bg[0], fg[0], t),
        lerp(bg[1], fg[1], t),
        lerp(bg[2], fg[2], t),
        bg[3].max(a),
    ]
}

/// Porter-Duff over on straight (unpremultiplied) colors.
///
/// `out.alpha = fg.alpha + bg.alpha * (1 - fg.alpha)`, colors weighted
/// by their alphas and divided back out.
///
/// ```rust
/// use sampl_ops::composite::over_pixel;
///
/// let out = over_pixel([0.0, 0.0, 1.0, 1.0], [1.0, 0.0, 0.0, 0.5]);
/// assert!(out[0] > 0.4 && out[2] > 0.4);
/// assert_eq!(out[3], 1.0);
/// ```
#[inline]
pub fn over_pixel(bg: Rgba, fg: Rgba) -> Rgba {
    let fg_a = fg[3];
    let bg_a = bg[3] * (1.0 - fg_a);
    let out_a = fg_a + bg_a;

    if out_a < 1e-8 {
        return TRANSPARENT;
    }

    let inv = 1.0 / out_a;
    [
        (fg[0] * fg_a + bg[0] * bg_a) * inv,
        (fg[1] * fg_a + bg[1] * bg_a) * inv,
        (fg[2] * fg_a + bg[2] * bg_a) * inv,
        out_a,
    ]
}

/// Blend rule used by [`Sequence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompositeMode {
    /// [`apply_pixel`].
    #[default]
    Simple,
    /// [`over_pixel`].
    Over,
}

impl CompositeMode {
    /// Blends `fg` onto `bg` with this rule.
    #[inline]
    pub fn blend(self, bg: Rgba, fg: Rgba) -> Rgba {
        match self {
            Self::Simple => apply_pixel(bg, fg),
            Self::Over => over_pixel(bg, fg),
        }
    }
}

/// A sampler placed at an offset on the stacking canvas.
#[derive(Debug, Clone)]
pub struct Placed<S> {
    /// The source.
    pub sampler: S,
    /// Left edge on the canvas.
    pub x: f64,
    /// Top edge on the canvas.
    pub y: f64,
}

impl<S: Sampler> Placed<S> {
    /// Places `sampler` with its origin at `(x, y)`.
    pub fn new(sampler: S, x: f64, y: f64) -> Self {
        Self { sampler, x, y }
    }

    /// The canvas rectangle this source covers.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.sampler.width(), self.sampler.height())
    }
}

/// Topmost-wins stack of placed samplers.
#[derive(Debug, Clone)]
pub struct Stack<S, T> {
    sources: Vec<Placed<S>>,
    fallback: T,
    width: f64,
    height: f64,
}

/// Stacks `sources`, later entries on top.
///
/// Extents reach from the canvas origin to the furthest right and bottom
/// edge of any source. Points no source covers read as `fallback`.
///
/// # Errors
///
/// [`OpsError::EmptySources`] when `sources` is empty.
pub fn stack<S, T>(sources: Vec<Placed<S>>, fallback: T) -> OpsResult<Stack<S, T>>
where
    S: Sampler<Item = T>,
    T: Clone,
{
    if sources.is_empty() {
        return Err(OpsError::EmptySources("stack"));
    }
    let width = sources.iter().map(|p| p.rect().right()).fold(0.0, f64::max);
    let height = sources.iter().map(|p| p.rect().bottom()).fold(0.0, f64::max);
    trace!(count = sources.len(), width, height, "stack");
    Ok(Stack {
        sources,
        fallback,
        width,
        height,
    })
}

impl<S, T> Stack<S, T> {
    /// The placed sources, bottom first.
    pub fn sources(&self) -> &[Placed<S>] {
        &self.sources
    }
}

impl<S, T> Sampler for Stack<S, T>
where
    S: Sampler<Item = T>,
    T: Clone,
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

    fn get(&self, x: f64, y: f64) -> T {
        self.sources
            .iter()
            .rev()
            .find(|p| p.rect().contains(x, y))
            .map(|p| p.sampler.get(x - p.x, y - p.y))
            .unwrap_or_else(|| self.fallback.clone())
    }
}

/// Composites every source at each point.
#[derive(Debug, Clone)]
pub struct Sequence<S> {
    sources: Vec<S>,
    mode: CompositeMode,
    width: f64,
    height: f64,
}

/// Composites `sources` bottom to top with [`CompositeMode::Simple`].
pub fn sequence<S>(sources: Vec<S>) -> OpsResult<Sequence<S>>
where
    S: Sampler<Item = Rgba>,
{
    sequence_with(sources, CompositeMode::Simple)
}

/// Composites `sources` bottom to top with `mode`.
///
/// Extents are the componentwise maximum of the sources' extents.
///
/// # Errors
///
/// [`OpsError::EmptySources`] when `sources` is empty.
pub fn sequence_with<S>(sources: Vec<S>, mode: CompositeMode) -> OpsResult<Sequence<S>>
where
    S: Sampler<Item = Rgba>,
{
    if sources.is_empty() {
        return Err(OpsError::EmptySources("sequence"));
    }
    let width = sources.iter().map(|s| s.width()).fold(0.0, f64::max);
    let height = sources.iter().map(|s| s.height()).fold(0.0, f64::max);
    trace!(count = sources.len(), ?mode, width, height, "sequence");
    Ok(Sequence {
        sources,
        mode,
        width,
        height,
    })
}

impl<S: Sampler<Item = Rgba>> Sampler for Sequence<S> {
    type Item = Rgba;

    #[inline]
    fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    fn height(&self) -> f64 {
        self.height
    }

    fn get(&self, x: f64, y: f64) -> Rgba {
        self.sources
            .iter()
            .fold(TRANSPARENT, |acc, s| self.mode.blend(acc, s.get(x, y)))
    }
}
