//! Arbitrary-angle rotation geometry.
//!
//! Rotation is done by inverse mapping: for every destination coordinate we
//! ask where it came from in the source, so the destination has no holes.
//!
//! ```text
//!   destination (side x side)          source (w x h)
//!   ┌───────────────┐                  ┌─────────┐
//!   │      ╱╲       │   R(-θ)·(p - c)  │         │
//!   │    ╱    ╲     │  ─────────────►  │    o    │
//!   │    ╲  c ╱     │       + o        │         │
//!   │      ╲╱       │                  └─────────┘
//!   └───────────────┘
//! ```
//!
//! Angles are in radians. The y axis points down, so a positive angle turns
//! the content clockwise on screen.

use glam::{DMat2, DVec2};

/// Side of the square that bounds a `width x height` rectangle rotated by
/// `angle`.
///
/// `max(|cos θ|·w + |sin θ|·h, |sin θ|·w + |cos θ|·h)`
///
/// Trig round-off within `1e-9` of a whole number is snapped to it, so
/// quarter and half turns keep integral extents.
///
/// # Example
///
/// ```rust
/// use sampl_math::rotated_side;
///
/// assert_eq!(rotated_side(4.0, 2.0, 0.0), 4.0);
/// let diag = rotated_side(2.0, 2.0, std::f64::consts::FRAC_PI_4);
/// assert!((diag - 2.0 * 2f64.sqrt()).abs() < 1e-12);
/// ```
#[inline]
pub fn rotated_side(width: f64, height: f64, angle: f64) -> f64 {
    let (sin, cos) = angle.sin_cos();
    let (sin, cos) = (sin.abs(), cos.abs());
    let side = (cos * width + sin * height).max(sin * width + cos * height);
    let whole = side.round();
    if (side - whole).abs() < 1e-9 { whole } else { side }
}

/// Destination-to-source mapping for a rotation about an origin.
///
/// The destination point `center` lands on the source point `origin`;
/// everything else is rotated around it by `-angle`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InverseRotation {
    matrix: DMat2,
    center: DVec2,
    origin: DVec2,
}

impl InverseRotation {
    /// Builds the inverse mapping of a rotation by `angle` radians.
    ///
    /// * `center` - destination point that maps onto `origin`
    /// * `origin` - pivot in source space
    pub fn new(angle: f64, center: (f64, f64), origin: (f64, f64)) -> Self {
        Self {
            matrix: DMat2::from_angle(-angle),
            center: DVec2::new(center.0, center.1),
            origin: DVec2::new(origin.0, origin.1),
        }
    }

    /// Maps a destination coordinate into source space.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sampl_math::InverseRotation;
    ///
    /// let inv = InverseRotation::new(0.0, (2.0, 2.0), (1.0, 1.0));
    /// assert_eq!(inv.apply(2.0, 2.0), (1.0, 1.0));
    /// assert_eq!(inv.apply(3.0, 2.0), (2.0, 1.0));
    /// ```
    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let p = self.matrix * (DVec2::new(x, y) - self.center) + self.origin;
        (p.x, p.y)
    }
}
