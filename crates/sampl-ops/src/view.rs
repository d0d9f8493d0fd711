//! Read-through views and eager exports.
//!
//! [`Rows`] and [`Columns`] are lazy: every element access calls the
//! parent's `get`, so a view always reflects the sampler it borrows and
//! can be iterated any number of times.
//!
//! The `to_*` functions evaluate every integral coordinate of the lattice
//! `[0, ceil(w)) x [0, ceil(h))` once and return a snapshot:
//!
//! | Function        | Shape                 | Index          |
//! |-----------------|-----------------------|----------------|
//! | [`to_array_xy`] | `Vec<Vec<T>>` columns | `out[x][y]`    |
//! | [`to_array_yx`] | `Vec<Vec<T>>` rows    | `out[y][x]`    |
//! | [`to_flat_xy`]  | `Vec<T>`              | `y * w + x`    |
//! | [`to_flat_yx`]  | `Vec<T>`              | `x * h + y`    |
//!
//! Flat exports round-trip through [`from_flat`](crate::from_flat) with the
//! matching [`Layout`](crate::Layout).

use sampl_core::{lattice_len, Sampler};
use tracing::debug;

/// Row view: `rows.get(y)` is the row at `y`.
#[derive(Debug)]
pub struct Rows<'a, S: ?Sized> {
    parent: &'a S,
}

impl<'a, S: Sampler + ?Sized> Rows<'a, S> {
    pub(crate) fn new(parent: &'a S) -> Self {
        Self { parent }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        lattice_len(self.parent.height())
    }

    /// `true` for a zero-height sampler.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Row `y`. Out-of-range rows are still readable; they delegate like
    /// any other out-of-range read.
    pub fn get(&self, y: usize) -> Row<'a, S> {
        Row {
            parent: self.parent,
            y: y as f64,
        }
    }

    /// Iterates the rows top to bottom.
    pub fn iter(&self) -> impl Iterator<Item = Row<'a, S>> + '_ {
        (0..self.len()).map(|y| self.get(y))
    }
}

impl<S: ?Sized> Clone for Rows<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: ?Sized> Copy for Rows<'_, S> {}

/// One row of a sampler.
#[derive(Debug)]
pub struct Row<'a, S: ?Sized> {
    parent: &'a S,
    y: f64,
}

impl<S: Sampler + ?Sized> Row<'_, S> {
    /// Number of elements.
    pub fn len(&self) -> usize {
        lattice_len(self.parent.width())
    }

    /// `true` for a zero-width sampler.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value at column `x`.
    pub fn get(&self, x: usize) -> S::Item {
        self.parent.get(x as f64, self.y)
    }

    /// Iterates left to right.
    pub fn iter(&self) -> impl Iterator<Item = S::Item> + '_ {
        (0..self.len()).map(|x| self.get(x))
    }
}

impl<S: ?Sized> Clone for Row<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: ?Sized> Copy for Row<'_, S> {}

/// Column view: `columns.get(x)` is the column at `x`.
#[derive(Debug)]
pub struct Columns<'a, S: ?Sized> {
    parent: &'a S,
}

impl<'a, S: Sampler + ?Sized> Columns<'a, S> {
    pub(crate) fn new(parent: &'a S) -> Self {
        Self { parent }
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        lattice_len(self.parent.width())
    }

    /// `true` for a zero-width sampler.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Column `x`.
    pub fn get(&self, x: usize) -> Column<'a, S> {
        Column {
            parent: self.parent,
            x: x as f64,
        }
    }

    /// Iterates the columns left to right.
    pub fn iter(&self) -> impl Iterator<Item = Column<'a, S>> + '_ {
        (0..self.len()).map(|x| self.get(x))
    }
}

impl<S: ?Sized> Clone for Columns<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: ?Sized> Copy for Columns<'_, S> {}

/// One column of a sampler.
#[derive(Debug)]
pub struct Column<'a, S: ?Sized> {
    parent: &'a S,
    x: f64,
}

impl<S: Sampler + ?Sized> Column<'_, S> {
    /// Number of elements.
    pub fn len(&self) -> usize {
        lattice_len(self.parent.height())
    }

    /// `true` for a zero-height sampler.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value at row `y`.
    pub fn get(&self, y: usize) -> S::Item {
        self.parent.get(self.x, y as f64)
    }

    /// Iterates top to bottom.
    pub fn iter(&self) -> impl Iterator<Item = S::Item> + '_ {
        (0..self.len()).map(|y| self.get(y))
    }
}

impl<S: ?Sized> Clone for Column<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: ?Sized> Copy for Column<'_, S> {}

/// Nested columns, `out[x][y]`.
pub fn to_array_xy<S: Sampler + ?Sized>(sampler: &S) -> Vec<Vec<S::Item>> {
    let (w, h) = (lattice_len(sampler.width()), lattice_len(sampler.height()));
    debug!(w, h, "to_array_xy");
    (0..w)
        .map(|x| (0..h).map(|y| sampler.get(x as f64, y as f64)).collect())
        .collect()
}

/// Nested rows, `out[y][x]`.
pub fn to_array_yx<S: Sampler + ?Sized>(sampler: &S) -> Vec<Vec<S::Item>> {
    let (w, h) = (lattice_len(sampler.width()), lattice_len(sampler.height()));
    debug!(w, h, "to_array_yx");
    (0..h)
        .map(|y| (0..w).map(|x| sampler.get(x as f64, y as f64)).collect())
        .collect()
}

/// Flat, horizontal stripes: `out[y * w + x]`.
pub fn to_flat_xy<S: Sampler + ?Sized>(sampler: &S) -> Vec<S::Item> {
    let (w, h) = (lattice_len(sampler.width()), lattice_len(sampler.height()));
    debug!(w, h, "to_flat_xy");
    let mut out = Vec::with_capacity(w * h);
    for y in 0..h {
        for x in 0..w {
            out.push(sampler.get(x as f64, y as f64));
        }
    }
    out
}

/// Flat, vertical stripes: `out[x * h + y]`.
pub fn to_flat_yx<S: Sampler + ?Sized>(sampler: &S) -> Vec<S::Item> {
    let (w, h) = (lattice_len(sampler.width()), lattice_len(sampler.height()));
    debug!(w, h, "to_flat_yx");
    let mut out = Vec::with_capacity(w * h);
    for x in 0..w {
        for y in 0..h {
            out.push(sampler.get(x as f64, y as f64));
        }
    }
    out
}
