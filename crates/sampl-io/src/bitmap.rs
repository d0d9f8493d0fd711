//! Raw RGBA8 pixel buffers and the bitmap-to-sampler adapter.
//!
//! A [`Bitmap`] always stores tightly packed `[r, g, b, a]` bytes, row by
//! row. Buffers in other byte orders are converted once on the way in
//! ([`Bitmap::from_raw`]) and on the way out ([`Bitmap::to_raw`]).
//!
//! [`BitmapSampler`] reads a bitmap as `Rgba` in `[0, 1]`, nearest pixel:
//! integer coordinates are pixel centres and fractional reads round to the
//! closest one.
//! [`sampler`] adds bilinear smoothing and an out-of-bounds color on top,
//! configured by [`BitmapOptions`].
//!
//! # Example
//!
//! ```rust
//! use sampl_core::Sampler;
//! use sampl_io::{sampler, Bitmap, BitmapOptions, ChannelOrder};
//!
//! // One blue pixel stored as BGRA.
//! let bmp = Bitmap::from_raw(1, 1, vec![255, 0, 0, 255], ChannelOrder::Bgra).unwrap();
//! assert_eq!(bmp.pixel(0, 0), Some([0, 0, 255, 255]));
//!
//! let s = sampler(bmp, &BitmapOptions::default());
//! assert_eq!(s.get(0.0, 0.0), [0.0, 0.0, 1.0, 1.0]);
//! assert_eq!(s.get(1.0, 0.0), [0.0, 0.0, 0.0, 0.0]);
//! ```

use sampl_core::color::rgba_from_u8;
use sampl_core::{BoxedSampler, Rgba, Sampler, TRANSPARENT};
use sampl_math::bilinear_rgba;
use sampl_ops::SamplerExt;

use crate::{IoError, IoResult};

/// Byte order of one 4-byte pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChannelOrder {
    /// `r, g, b, a`.
    #[default]
    Rgba,
    /// `b, g, r, a`. Little-endian `0xAARRGGBB` words.
    Bgra,
    /// `a, r, g, b`. Big-endian `0xAARRGGBB` words.
    Argb,
}

impl ChannelOrder {
    /// Reorders one pixel from this order into RGBA.
    #[inline]
    pub fn to_rgba(self, px: [u8; 4]) -> [u8; 4] {
        match self {
            Self::Rgba => px,
            Self::Bgra => [px[2], px[1], px[0], px[3]],
            Self::Argb => [px[1], px[2], px[3], px[0]],
        }
    }

    /// Reorders one RGBA pixel into this order.
    #[inline]
    pub fn from_rgba(self, px: [u8; 4]) -> [u8; 4] {
        match self {
            Self::Rgba => px,
            Self::Bgra => [px[2], px[1], px[0], px[3]],
            Self::Argb => [px[3], px[0], px[1], px[2]],
        }
    }
}

/// Packed RGBA8 pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Bitmap {
    /// Transparent black bitmap.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Wraps `data` stored in `order`, converting it to RGBA.
    ///
    /// # Errors
    ///
    /// [`IoError::InvalidBuffer`] unless `data.len() == width * height * 4`.
    pub fn from_raw(width: u32, height: u32, mut data: Vec<u8>, order: ChannelOrder) -> IoResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| IoError::InvalidBuffer(format!("{width}x{height} overflows")))?;
        if data.len() != expected {
            return Err(IoError::InvalidBuffer(format!(
                "{width}x{height} RGBA needs {expected} bytes, got {}",
                data.len()
            )));
        }
        if order != ChannelOrder::Rgba {
            for px in data.chunks_exact_mut(4) {
                let rgba = order.to_rgba([px[0], px[1], px[2], px[3]]);
                px.copy_from_slice(&rgba);
            }
        }
        Ok(Self { width, height, data })
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGBA bytes, row by row.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Mutable RGBA bytes, row by row.
    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consumes the bitmap, returning its RGBA bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Copies the pixels out in `order`.
    pub fn to_raw(&self, order: ChannelOrder) -> Vec<u8> {
        self.data
            .chunks_exact(4)
            .flat_map(|px| order.from_rgba([px[0], px[1], px[2], px[3]]))
            .collect()
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| (y as usize * self.width as usize + x as usize) * 4)
    }

    /// RGBA bytes at `(x, y)`, or `None` outside the bitmap.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let i = self.offset(x, y)?;
        Some([self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]])
    }

    /// Writes `(x, y)`. Writes outside the bitmap are ignored.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if let Some(i) = self.offset(x, y) {
            self.data[i..i + 4].copy_from_slice(&rgba);
        }
    }

    /// Reads the bitmap as a nearest-pixel sampler.
    pub fn sampler(self, oob: Rgba) -> BitmapSampler {
        BitmapSampler::new(self, oob)
    }
}

/// Nearest-pixel color sampler over a [`Bitmap`].
///
/// Coordinates round to the nearest pixel; anything outside
/// `[0, w) x [0, h)` reads as the out-of-bounds color.
#[derive(Debug, Clone)]
pub struct BitmapSampler {
    bitmap: Bitmap,
    oob: Rgba,
}

impl BitmapSampler {
    /// Creates a sampler with `oob` as the out-of-bounds color.
    pub fn new(bitmap: Bitmap, oob: Rgba) -> Self {
        Self { bitmap, oob }
    }

    /// The backing bitmap.
    pub fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }
}

impl Sampler for BitmapSampler {
    type Item = Rgba;

    #[inline]
    fn width(&self) -> f64 {
        self.bitmap.width as f64
    }

    #[inline]
    fn height(&self) -> f64 {
        self.bitmap.height as f64
    }

    #[inline]
    fn get(&self, x: f64, y: f64) -> Rgba {
        if !self.contains(x, y) {
            return self.oob;
        }
        let xi = (x.round() as u32).min(self.bitmap.width - 1);
        let yi = (y.round() as u32).min(self.bitmap.height - 1);
        self.bitmap.pixel(xi, yi).map_or(self.oob, rgba_from_u8)
    }
}

/// Options for [`sampler`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BitmapOptions {
    /// Color returned outside the bitmap.
    pub oob: Rgba,
    /// Blend neighbouring pixels for fractional reads.
    pub interpolate: bool,
}

impl Default for BitmapOptions {
    fn default() -> Self {
        Self {
            oob: TRANSPARENT,
            interpolate: true,
        }
    }
}

impl BitmapOptions {
    /// Sets the out-of-bounds color.
    pub fn with_oob(mut self, oob: Rgba) -> Self {
        self.oob = oob;
        self
    }

    /// Enables or disables bilinear smoothing.
    pub fn with_interpolation(mut self, interpolate: bool) -> Self {
        self.interpolate = interpolate;
        self
    }
}

/// Reads `bitmap` as a color sampler.
///
/// With interpolation on, fractional reads blend the four surrounding
/// pixels with [`bilinear_rgba`]; reads outside the bitmap still return
/// `options.oob`.
pub fn sampler(bitmap: Bitmap, options: &BitmapOptions) -> BoxedSampler<Rgba> {
    tracing::debug!(
        width = bitmap.width,
        height = bitmap.height,
        interpolate = options.interpolate,
        "bitmap sampler"
    );
    let base = bitmap.sampler(options.oob);
    if options.interpolate {
        base.interpolate(bilinear_rgba).oob(options.oob).boxed()
    } else {
        base.boxed()
    }
}
