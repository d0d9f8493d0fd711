//! # sampl-math
//!
//! Math utilities for lazy samplers.
//!
//! - [`Lerp`], [`lerp`], [`bilinear`], [`bilinear_rgba`] - blending of lattice values
//! - [`fract`] - fractional parts for interpolation weights
//! - [`rotated_side`], [`InverseRotation`] - arbitrary-angle rotation geometry
//!
//! # Usage
//!
//! ```rust
//! use sampl_math::bilinear;
//!
//! // Corners: top-left 1, top-right 2, bottom-left 3, bottom-right 4
//! assert_eq!(bilinear(1.0f64, 2.0, 3.0, 4.0, 0.5, 0.5), 2.5);
//! ```
//!
//! # Dependencies
//!
//! - [`glam`] - 2D rotation matrices
//! - `sampl-core` - [`Rgba`](sampl_core::Rgba)
//!
//! # Used By
//!
//! - `sampl-ops` - interpolation, angle rotation, compositing

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod interp;
mod rotation;

pub use interp::*;
pub use rotation::*;
