//! Real-valued rectangles.
//!
//! Placement of a sampler inside a larger canvas (stacking, rendering into a
//! destination region, cropping) is described by a [`Rect`]. Unlike pixel
//! rectangles these use `f64` throughout, because sampler extents may be
//! fractional after a scale.
//!
//! All rectangles are half-open: the left/top edges are inclusive, the
//! right/bottom edges exclusive.
//!
//! ```rust
//! use sampl_core::Rect;
//!
//! let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
//! assert!(rect.contains(15.0, 25.0));
//! assert!(!rect.contains(110.0, 25.0));
//! ```

/// A rectangle defined by origin (x, y) and extents (width, height).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X coordinate of the left edge (inclusive)
    pub x: f64,
    /// Y coordinate of the top edge (inclusive)
    pub y: f64,
    /// Horizontal extent
    pub width: f64,
    /// Vertical extent
    pub height: f64,
}

impl Rect {
    /// Creates a new rectangle with the given origin and extents.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle at the origin with the given extents.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sampl_core::Rect;
    ///
    /// let rect = Rect::from_size(1920.0, 1080.0);
    /// assert_eq!(rect.x, 0.0);
    /// assert_eq!(rect.right(), 1920.0);
    /// ```
    #[inline]
    pub const fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// X coordinate of the right edge (exclusive).
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Y coordinate of the bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Returns `true` if either extent is zero or negative.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Returns `true` if the point lies inside the half-open rectangle.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sampl_core::Rect;
    ///
    /// let rect = Rect::new(10.0, 10.0, 100.0, 100.0);
    /// assert!(rect.contains(10.0, 10.0));    // Top-left corner included
    /// assert!(rect.contains(109.9, 109.9));  // Just inside
    /// assert!(!rect.contains(110.0, 110.0)); // Right/bottom edge excluded
    /// ```
    #[inline]
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Returns the intersection with another rectangle, if any.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sampl_core::Rect;
    ///
    /// let a = Rect::new(0.0, 0.0, 100.0, 100.0);
    /// let b = Rect::new(50.0, 50.0, 100.0, 100.0);
    /// assert_eq!(a.intersect(&b), Some(Rect::new(50.0, 50.0, 50.0, 50.0)));
    /// ```
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(Rect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }

    /// Returns the bounding box containing both rectangles.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sampl_core::Rect;
    ///
    /// let a = Rect::new(0.0, 0.0, 50.0, 50.0);
    /// let b = Rect::new(100.0, 100.0, 50.0, 50.0);
    /// assert_eq!(a.union(&b), Rect::new(0.0, 0.0, 150.0, 150.0));
    /// ```
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(x, y, right - x, bottom - y)
    }

    /// Returns this rectangle moved by (dx, dy).
    #[inline]
    pub fn translate(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let r = Rect::new(1.5, 2.0, 3.0, 4.0);
        assert_eq!(r.right(), 4.5);
        assert_eq!(r.bottom(), 6.0);
        assert!(!r.is_empty());
        assert!(Rect::from_size(0.0, 4.0).is_empty());
    }

    #[test]
    fn test_disjoint_intersection() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert_eq!(a.intersect(&b), None);
    }

    #[test]
    fn test_translate() {
        let r = Rect::new(1.0, 1.0, 2.0, 2.0).translate(-3.0, 0.5);
        assert_eq!(r, Rect::new(-2.0, 1.5, 2.0, 2.0));
        assert!(r.contains(-2.0, 1.5));
    }
}
