//! Parallel exports using Rayon.
//!
//! Samplers are pure, so independent lattice points can be read from any
//! thread. The only shared state is the memo of
//! [`Cached`](crate::cache::Cached), which is lock-protected.
//!
//! Output ordering matches [`to_flat_xy`](crate::view::to_flat_xy) and
//! [`to_flat_yx`](crate::view::to_flat_yx) exactly.
//!
//! # Example
//!
//! ```rust
//! use sampl_core::from_fn;
//! use sampl_ops::parallel::par_to_flat_xy;
//!
//! let s = from_fn(64.0, 64.0, |x, y| x * y);
//! let v = par_to_flat_xy(&s);
//! assert_eq!(v[65], 1.0);
//! ```

use rayon::prelude::*;
use sampl_core::{lattice_len, Sampler};
use tracing::debug;

/// Flat, horizontal stripes, evaluated on the Rayon pool.
pub fn par_to_flat_xy<S>(sampler: &S) -> Vec<S::Item>
where
    S: Sampler + Sync + ?Sized,
    S::Item: Send,
{
    let (w, h) = (lattice_len(sampler.width()), lattice_len(sampler.height()));
    debug!(w, h, threads = rayon::current_num_threads(), "par_to_flat_xy");
    (0..w * h)
        .into_par_iter()
        .map(|i| sampler.get((i % w) as f64, (i / w) as f64))
        .collect()
}

/// Flat, vertical stripes, evaluated on the Rayon pool.
pub fn par_to_flat_yx<S>(sampler: &S) -> Vec<S::Item>
where
    S: Sampler + Sync + ?Sized,
    S::Item: Send,
{
    let (w, h) = (lattice_len(sampler.width()), lattice_len(sampler.height()));
    debug!(w, h, threads = rayon::current_num_threads(), "par_to_flat_yx");
    (0..w * h)
        .into_par_iter()
        .map(|i| sampler.get((i / h) as f64, (i % h) as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{to_flat_xy, to_flat_yx};
    use crate::SamplerExt;
    use sampl_core::from_fn;

    #[test]
    fn test_matches_sequential() {
        let s = from_fn(17.0, 9.0, |x, y| x * 100.0 + y).flip_h().translate(1.0, 2.0);
        assert_eq!(par_to_flat_xy(&s), to_flat_xy(&s));
        assert_eq!(par_to_flat_yx(&s), to_flat_yx(&s));
    }

    #[test]
    fn test_empty() {
        let s = from_fn(0.0, 5.0, |x, _| x);
        assert!(par_to_flat_xy(&s).is_empty());
        assert!(par_to_flat_yx(&s).is_empty());
    }

    #[test]
    fn test_through_cache() {
        let c = from_fn(8.0, 8.0, |x, y| x + y).with_cache();
        let v = par_to_flat_xy(&c);
        assert_eq!(v.len(), 64);
        assert_eq!(c.stats().entries, 64);
        assert_eq!(v, to_flat_xy(&c));
    }
}
