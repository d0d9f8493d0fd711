//! Leaf samplers backed by constants and arrays.
//!
//! # Layouts
//!
//! Flat arrays come in two orders, see [`Layout`]:
//!
//! ```text
//! Layout::Xy (row-major)      index = y * width + x
//! Layout::Yx (column-major)   index = x * height + y
//! ```
//!
//! Nested arrays are either rows (`data[y][x]`, [`from_rows`]) or columns
//! (`data[x][y]`, [`from_columns`]).
//!
//! Array samplers floor fractional coordinates before indexing and return
//! their fallback for reads outside `[0, w) x [0, h)` or for elements the
//! backing data does not have. Short or ragged input is legal.

use sampl_core::{lattice_len, validate_extents, Sampler};

use crate::OpsResult;

/// Constant sampler.
#[derive(Debug, Clone, PartialEq)]
pub struct Solid<T> {
    value: T,
    oob: Option<T>,
    width: f64,
    height: f64,
}

/// Creates a sampler that returns `value` everywhere.
///
/// Extents must be finite and positive.
///
/// # Example
///
/// ```rust
/// use sampl_core::Sampler;
/// use sampl_ops::solid;
///
/// let red = solid([1.0f32, 0.0, 0.0, 1.0], 16.0, 16.0).unwrap();
/// assert_eq!(red.get(-100.0, 3.5), [1.0, 0.0, 0.0, 1.0]);
/// ```
pub fn solid<T: Clone>(value: T, width: f64, height: f64) -> OpsResult<Solid<T>> {
    validate_extents(width, height, true)?;
    Ok(Solid {
        value,
        oob: None,
        width,
        height,
    })
}

impl<T: Clone> Solid<T> {
    /// Returns `oob` instead of the fill value outside the extents.
    pub fn with_oob(mut self, oob: T) -> Self {
        self.oob = Some(oob);
        self
    }
}

impl<T: Clone> Sampler for Solid<T> {
    type Item = T;

    #[inline]
    fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    fn height(&self) -> f64 {
        self.height
    }

    #[inline]
    fn get(&self, x: f64, y: f64) -> T {
        match &self.oob {
            Some(oob) if !self.contains(x, y) => oob.clone(),
            _ => self.value.clone(),
        }
    }
}

/// Flat array ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Layout {
    /// Row-major: `index = y * width + x`. Horizontal stripes.
    #[default]
    Xy,
    /// Column-major: `index = x * height + y`. Vertical stripes.
    Yx,
}

/// Sampler over a flat array.
///
/// `D` is anything that derefs to a slice: `Vec<T>`, `&[T]`, `Arc<[T]>`.
#[derive(Debug, Clone)]
pub struct FlatArray<T, D> {
    data: D,
    width: f64,
    height: f64,
    columns: usize,
    rows: usize,
    layout: Layout,
    fallback: T,
}

/// Creates a sampler over `data` laid out as `layout`.
///
/// The array stride is the number of lattice points along the relevant
/// axis ([`lattice_len`]), so fractional extents are legal.
///
/// # Example
///
/// ```rust
/// use sampl_core::Sampler;
/// use sampl_ops::{from_flat, Layout};
///
/// let s = from_flat(vec![0, 1, 2, 3, 4, 5], 3.0, 2.0, Layout::Xy, -1).unwrap();
/// assert_eq!(s.get(1.0, 1.0), 4);
/// assert_eq!(s.get(1.9, 1.2), 4);
/// assert_eq!(s.get(3.0, 0.0), -1);
///
/// let t = from_flat(vec![0, 1, 2, 3, 4, 5], 3.0, 2.0, Layout::Yx, -1).unwrap();
/// assert_eq!(t.get(1.0, 1.0), 3);
/// ```
pub fn from_flat<T, D>(
    data: D,
    width: f64,
    height: f64,
    layout: Layout,
    fallback: T,
) -> OpsResult<FlatArray<T, D>>
where
    T: Clone,
    D: AsRef<[T]>,
{
    validate_extents(width, height, false)?;
    tracing::trace!(width, height, len = data.as_ref().len(), ?layout, "from_flat");
    Ok(FlatArray {
        data,
        width,
        height,
        columns: lattice_len(width),
        rows: lattice_len(height),
        layout,
        fallback,
    })
}

impl<T, D> FlatArray<T, D> {
    /// The backing data.
    pub fn data(&self) -> &D {
        &self.data
    }

    /// The array ordering.
    pub fn layout(&self) -> Layout {
        self.layout
    }
}

impl<T, D> Sampler for FlatArray<T, D>
where
    T: Clone,
    D: AsRef<[T]>,
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
        if !self.contains(x, y) {
            return self.fallback.clone();
        }
        let (xi, yi) = (x.floor() as usize, y.floor() as usize);
        let index = match self.layout {
            Layout::Xy => yi.checked_mul(self.columns).and_then(|i| i.checked_add(xi)),
            Layout::Yx => xi.checked_mul(self.rows).and_then(|i| i.checked_add(yi)),
        };
        index
            .and_then(|i| self.data.as_ref().get(i))
            .cloned()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

/// Sampler over a nested array, rows or columns first.
#[derive(Debug, Clone)]
pub struct Nested<T> {
    data: Vec<Vec<T>>,
    width: f64,
    height: f64,
    rows_first: bool,
    fallback: T,
}

/// Creates a sampler over rows: `rows[y][x]`.
///
/// # Example
///
/// ```rust
/// use sampl_core::Sampler;
/// use sampl_ops::from_rows;
///
/// let s = from_rows(vec![vec![1, 2], vec![3]], 2.0, 2.0, 0).unwrap();
/// assert_eq!(s.get(1.0, 0.0), 2);
/// assert_eq!(s.get(1.0, 1.0), 0); // ragged row, filled with the fallback
/// ```
pub fn from_rows<T: Clone>(rows: Vec<Vec<T>>, width: f64, height: f64, fallback: T) -> OpsResult<Nested<T>> {
    validate_extents(width, height, false)?;
    Ok(Nested {
        data: rows,
        width,
        height,
        rows_first: true,
        fallback,
    })
}

/// Creates a sampler over columns: `columns[x][y]`.
pub fn from_columns<T: Clone>(
    columns: Vec<Vec<T>>,
    width: f64,
    height: f64,
    fallback: T,
) -> OpsResult<Nested<T>> {
    validate_extents(width, height, false)?;
    Ok(Nested {
        data: columns,
        width,
        height,
        rows_first: false,
        fallback,
    })
}

impl<T: Clone> Sampler for Nested<T> {
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
        if !self.contains(x, y) {
            return self.fallback.clone();
        }
        let (xi, yi) = (x.floor() as usize, y.floor() as usize);
        let (outer, inner) = if self.rows_first { (yi, xi) } else { (xi, yi) };
        self.data
            .get(outer)
            .and_then(|line| line.get(inner))
            .cloned()
            .unwrap_or_else(|| self.fallback.clone())
    }
}
