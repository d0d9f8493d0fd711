//! # sampl-core
//!
//! Core types for lazy, random-access 2D sampling.
//!
//! This crate provides the foundational types used throughout sampl-rs:
//!
//! - [`Sampler`] - The sampling contract: fixed extents plus a total `get(x, y)`
//! - [`Rgba`] - Four-channel float color used by compositing and the bitmap adapters
//! - [`Rect`] - Real-valued placement rectangles
//! - [`Error`] - Errors surfaced by bounds-checked reads and malformed extents
//!
//! ## Design Philosophy
//!
//! A sampler never materializes its grid. Transformations wrap a parent and
//! remap coordinates or values on every read, so a chain of combinators costs
//! nothing until something asks for a value:
//!
//! ```
//! use sampl_core::{from_fn, Sampler};
//!
//! let ramp = from_fn(4.0, 4.0, |x, y| x + y * 4.0);
//! assert_eq!(ramp.get(1.0, 1.0), 5.0);
//! assert_eq!(ramp.get(-3.5, 100.0), 396.5); // any real coordinate is legal
//! ```
//!
//! ## Crate Structure
//!
//! ```text
//! sampl-core (this crate)
//!    ^
//!    |
//!    +-- sampl-math (interpolation, rotation geometry)
//!    +-- sampl-ops (combinators)
//!    +-- sampl-io (bitmap adapters)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod color;
pub mod error;
pub mod rect;
pub mod sampler;

pub use color::{
    luminance_rec709, Rgba, BLACK, REC709_LUMA, REC709_LUMA_B, REC709_LUMA_G, REC709_LUMA_R,
    TRANSPARENT, WHITE,
};
pub use error::*;
pub use rect::*;
pub use sampler::*;

/// Prelude module for convenient imports.
///
/// ```
/// use sampl_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::{Rgba, BLACK, TRANSPARENT, WHITE};
    pub use crate::error::{Error, Result};
    pub use crate::rect::Rect;
    pub use crate::sampler::{from_fn, BoxedSampler, FromFn, Sampler};
}
