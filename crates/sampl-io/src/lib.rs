//! # sampl-io
//!
//! Adapters between samplers and pixels.
//!
//! - [`bitmap`] - [`Bitmap`] buffers and the bitmap-to-sampler adapter
//! - [`render`] - Sampler-to-bitmap rendering, whole surface or into a rectangle
//! - [`png`] - PNG decode/encode
//! - [`source`] - [`Source`] locators and background loading
//!
//! Colors cross this boundary as bytes: `u8 / 255` on the way in, clamped
//! and rounded on the way out.
//!
//! # Example
//!
//! ```rust
//! use sampl_core::Sampler;
//! use sampl_io::{render, sampler, Bitmap, BitmapOptions, RenderOptions};
//! use sampl_ops::{Direction, SamplerExt};
//!
//! let mut bmp = Bitmap::new(2, 1);
//! bmp.set_pixel(0, 0, [255, 0, 0, 255]);
//!
//! let turned = sampler(bmp, &BitmapOptions::default().with_interpolation(false))
//!     .rotate(Direction::Right);
//! let out = render(&turned, &RenderOptions::default()).unwrap();
//! assert_eq!((out.width(), out.height()), (1, 2));
//! assert_eq!(out.pixel(0, 0), Some([255, 0, 0, 255]));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod bitmap;
pub mod png;
pub mod render;
pub mod source;

pub use bitmap::{sampler, Bitmap, BitmapOptions, BitmapSampler, ChannelOrder};
pub use error::{IoError, IoResult};
pub use render::{render, render_into, RenderOptions};
pub use source::{load_file, LoadHandle, Source};
