//! Sampler-to-bitmap rendering.
//!
//! Every target pixel `(tx, ty)` inside the destination rectangle reads the
//! source at
//!
//! ```text
//! sx = (tx - dest.x + offset) * src_w / dest.width  - offset
//! sy = (ty - dest.y + offset) * src_h / dest.height - offset
//! ```
//!
//! clamped onto the source lattice, so the whole source is squeezed or
//! stretched into the rectangle. Integer coordinates are pixel centres
//! throughout the combinators; with the default offset of `0.5` a target
//! pixel centre lands on the matching source position, and a 1:1 render
//! reads exactly the integer lattice. Channels are clamped to `[0, 1]` and
//! rounded to bytes.
//!
//! When the `parallel` feature is enabled, rows are rendered on the Rayon
//! pool.
//!
//! # Example
//!
//! ```rust
//! use sampl_core::{from_fn, Rect};
//! use sampl_io::{render, render_into, Bitmap, RenderOptions};
//!
//! let gradient = from_fn(4.0, 1.0, |x: f64, _| [x.floor() as f32 / 3.0, 0.0, 0.0, 1.0]);
//! let bmp = render(&gradient, &RenderOptions::default()).unwrap();
//! assert_eq!(bmp.pixel(3, 0), Some([255, 0, 0, 255]));
//!
//! let mut canvas = Bitmap::new(8, 8);
//! render_into(&gradient, &mut canvas, Rect::new(0.0, 4.0, 8.0, 4.0), &RenderOptions::default()).unwrap();
//! assert_eq!(canvas.pixel(0, 0), Some([0, 0, 0, 0]));
//! assert_eq!(canvas.pixel(7, 7), Some([255, 0, 0, 255]));
//! ```

use sampl_core::color::rgba_to_u8;
use sampl_core::{lattice_len, validate_extents, Rect, Rgba, Sampler};
use sampl_math::bilinear_rgba;
use sampl_ops::{OpsError, SamplerExt};
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{Bitmap, IoError, IoResult};

/// Rendering options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Added to target pixel coordinates before scaling into the source.
    pub offset: f64,
    /// Read the source through bilinear interpolation.
    pub interpolate: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            offset: 0.5,
            interpolate: false,
        }
    }
}

impl RenderOptions {
    /// Sets the sampling offset.
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Enables or disables bilinear reads.
    pub fn with_interpolation(mut self, interpolate: bool) -> Self {
        self.interpolate = interpolate;
        self
    }
}

/// Pixel span of the destination plus the target-to-source mapping.
#[derive(Debug, Clone, Copy)]
struct Region {
    x0: u32,
    x1: u32,
    y0: u32,
    y1: u32,
    origin_x: f64,
    origin_y: f64,
    ratio_x: f64,
    ratio_y: f64,
    offset: f64,
    max_x: f64,
    max_y: f64,
}

impl Region {
    #[inline]
    fn source(&self, tx: u32, ty: u32) -> (f64, f64) {
        let sx = (tx as f64 - self.origin_x + self.offset) * self.ratio_x - self.offset;
        let sy = (ty as f64 - self.origin_y + self.offset) * self.ratio_y - self.offset;
        (sx.clamp(0.0, self.max_x), sy.clamp(0.0, self.max_y))
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.x0 >= self.x1 || self.y0 >= self.y1
    }
}

/// Renders `sampler` into a new bitmap of `ceil(w) x ceil(h)` pixels.
///
/// # Errors
///
/// [`IoError::InvalidBuffer`] when the extents do not fit a bitmap.
pub fn render<S>(sampler: &S, options: &RenderOptions) -> IoResult<Bitmap>
where
    S: Sampler<Item = Rgba> + Sync + ?Sized,
{
    let (w, h) = (lattice_len(sampler.width()), lattice_len(sampler.height()));
    let (bw, bh) = match (u32::try_from(w), u32::try_from(h)) {
        (Ok(bw), Ok(bh)) => (bw, bh),
        _ => return Err(IoError::InvalidBuffer(format!("{w}x{h} does not fit a bitmap"))),
    };
    let mut bitmap = Bitmap::new(bw, bh);
    if bw > 0 && bh > 0 {
        render_into(sampler, &mut bitmap, Rect::from_size(w as f64, h as f64), options)?;
    }
    Ok(bitmap)
}

/// Renders `sampler` into `dest` on `target`.
///
/// Pixels of `dest` that fall outside `target` are skipped; pixels outside
/// `dest` are left untouched.
///
/// # Errors
///
/// [`IoError::Ops`] when `dest` has non-finite or non-positive extents.
pub fn render_into<S>(sampler: &S, target: &mut Bitmap, dest: Rect, options: &RenderOptions) -> IoResult<()>
where
    S: Sampler<Item = Rgba> + Sync + ?Sized,
{
    validate_extents(dest.width, dest.height, true).map_err(OpsError::from)?;
    if !dest.x.is_finite() || !dest.y.is_finite() {
        return Err(OpsError::InvalidParameter(format!(
            "destination origin must be finite, got ({}, {})",
            dest.x, dest.y
        ))
        .into());
    }

    let clip = |v: f64, max: u32| v.round().clamp(0.0, max as f64) as u32;
    let region = Region {
        x0: clip(dest.x, target.width()),
        x1: clip(dest.right(), target.width()),
        y0: clip(dest.y, target.height()),
        y1: clip(dest.bottom(), target.height()),
        origin_x: dest.x,
        origin_y: dest.y,
        ratio_x: sampler.width() / dest.width,
        ratio_y: sampler.height() / dest.height,
        offset: options.offset,
        max_x: (lattice_len(sampler.width()) as f64 - 1.0).max(0.0),
        max_y: (lattice_len(sampler.height()) as f64 - 1.0).max(0.0),
    };
    debug!(
        src_w = sampler.width(),
        src_h = sampler.height(),
        ?dest,
        interpolate = options.interpolate,
        "render"
    );
    if region.is_empty() {
        return Ok(());
    }

    if options.interpolate {
        let smooth = sampler.interpolate(bilinear_rgba);
        fill(&smooth, target, &region);
    } else {
        fill(sampler, target, &region);
    }
    Ok(())
}

#[inline]
fn fill_row<S>(sampler: &S, row: &mut [u8], ty: u32, region: &Region)
where
    S: Sampler<Item = Rgba> + ?Sized,
{
    for tx in region.x0..region.x1 {
        let (sx, sy) = region.source(tx, ty);
        let i = tx as usize * 4;
        row[i..i + 4].copy_from_slice(&rgba_to_u8(sampler.get(sx, sy)));
    }
}

#[cfg(feature = "parallel")]
fn fill<S>(sampler: &S, target: &mut Bitmap, region: &Region)
where
    S: Sampler<Item = Rgba> + Sync + ?Sized,
{
    let stride = target.width() as usize * 4;
    target
        .as_bytes_mut()
        .par_chunks_mut(stride)
        .enumerate()
        .skip(region.y0 as usize)
        .take((region.y1 - region.y0) as usize)
        .for_each(|(ty, row)| fill_row(sampler, row, ty as u32, region));
}

#[cfg(not(feature = "parallel"))]
fn fill<S>(sampler: &S, target: &mut Bitmap, region: &Region)
where
    S: Sampler<Item = Rgba> + ?Sized,
{
    let stride = target.width() as usize * 4;
    target
        .as_bytes_mut()
        .chunks_mut(stride)
        .enumerate()
        .skip(region.y0 as usize)
        .take((region.y1 - region.y0) as usize)
        .for_each(|(ty, row)| fill_row(sampler, row, ty as u32, region));
}
