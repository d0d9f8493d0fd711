//! Memoization and materialization.
//!
//! [`Cached`] remembers every value it has read, keyed by the exact
//! coordinate. `1.5` and `2.0` are different keys; floor or round the
//! coordinates first (see [`SamplerExt::floor_coords`](crate::SamplerExt::floor_coords))
//! to share entries between nearby reads.
//!
//! An optional invalidator decides, on every hit, whether the stored
//! value is stale. It sees the entry's age and value, the number of
//! entries in the cache, and the coordinate. Returning `true` re-reads the
//! parent and replaces the entry. Without an invalidator entries live until
//! [`Cached::clear`]; the cache never evicts on its own.
//!
//! The memo sits behind a [`Mutex`], so a `Cached` can be shared across
//! threads (for example by [`parallel`](crate::parallel) exports). The
//! parent is read with the lock released, so two threads missing on the
//! same coordinate may both read it; the last write wins.
//!
//! [`stash`] is the eager alternative: it reads the whole lattice once into
//! a flat array.
//!
//! # Example
//!
//! ```rust
//! use sampl_core::{from_fn, Sampler};
//! use sampl_ops::SamplerExt;
//!
//! let slow = from_fn(8.0, 8.0, |x, y| (x * y).sqrt());
//! let fast = slow.with_cache();
//! assert_eq!(fast.get(4.0, 4.0), 4.0);
//! assert_eq!(fast.get(4.0, 4.0), 4.0);
//! assert_eq!(fast.stats().hits, 1);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use sampl_core::Sampler;
use tracing::trace;

use crate::construct::{from_flat, FlatArray, Layout};
use crate::view::to_flat_xy;
use crate::OpsResult;

/// What an invalidator sees about a cached value.
#[derive(Debug)]
pub struct CacheEntry<'a, T> {
    /// Time since the value was stored.
    pub age: Duration,
    /// The stored value.
    pub value: &'a T,
    /// Number of entries currently cached.
    pub size: usize,
    /// Key x.
    pub x: f64,
    /// Key y.
    pub y: f64,
}

/// Staleness predicate: `true` means re-read the parent.
pub type Invalidator<T> = Box<dyn Fn(&CacheEntry<'_, T>) -> bool + Send + Sync>;

/// Cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Reads answered from the memo.
    pub hits: u64,
    /// Reads that went to the parent (first read or invalidated).
    pub misses: u64,
    /// Entries replaced because the invalidator rejected them.
    pub invalidations: u64,
    /// Entries currently stored.
    pub entries: usize,
}

impl CacheStats {
    /// Hit rate as percentage.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

struct Slot<T> {
    stored: Instant,
    value: T,
}

struct Memo<T> {
    slots: HashMap<(u64, u64), Slot<T>>,
    stats: CacheStats,
}

/// Coordinate key. `-0.0` and `0.0` share a slot.
#[inline]
fn key(x: f64, y: f64) -> (u64, u64) {
    ((x + 0.0).to_bits(), (y + 0.0).to_bits())
}

/// Memoizing sampler.
pub struct Cached<S: Sampler> {
    parent: S,
    memo: Mutex<Memo<S::Item>>,
    invalidator: Option<Invalidator<S::Item>>,
}

impl<S: Sampler> Cached<S> {
    pub(crate) fn new(parent: S, invalidator: Option<Invalidator<S::Item>>) -> Self {
        Self {
            parent,
            memo: Mutex::new(Memo {
                slots: HashMap::new(),
                stats: CacheStats::default(),
            }),
            invalidator,
        }
    }

    fn memo(&self) -> MutexGuard<'_, Memo<S::Item>> {
        // A panic in another reader cannot leave the map half-written.
        self.memo.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current counters.
    pub fn stats(&self) -> CacheStats {
        self.memo().stats
    }

    /// Number of cached coordinates.
    pub fn len(&self) -> usize {
        self.memo().slots.len()
    }

    /// `true` when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every entry. Counters other than `entries` are kept.
    pub fn clear(&self) {
        let mut memo = self.memo();
        trace!(entries = memo.slots.len(), "cache clear");
        memo.slots.clear();
        memo.stats.entries = 0;
    }

    /// The wrapped sampler.
    pub fn parent(&self) -> &S {
        &self.parent
    }
}

impl<S> Sampler for Cached<S>
where
    S: Sampler,
    S::Item: Clone,
{
    type Item = S::Item;

    #[inline]
    fn width(&self) -> f64 {
        self.parent.width()
    }

    #[inline]
    fn height(&self) -> f64 {
        self.parent.height()
    }

    fn get(&self, x: f64, y: f64) -> S::Item {
        let k = key(x, y);
        {
            let mut memo = self.memo();
            let size = memo.slots.len();
            let hit = memo.slots.get(&k).map(|slot| {
                let stale = self.invalidator.as_ref().is_some_and(|inv| {
                    inv(&CacheEntry {
                        age: slot.stored.elapsed(),
                        value: &slot.value,
                        size,
                        x,
                        y,
                    })
                });
                (stale, slot.value.clone())
            });
            match hit {
                Some((false, value)) => {
                    memo.stats.hits += 1;
                    return value;
                }
                Some((true, _)) => memo.stats.invalidations += 1,
                None => {}
            }
            memo.stats.misses += 1;
        }

        let value = self.parent.get(x, y);
        let mut memo = self.memo();
        memo.slots.insert(
            k,
            Slot {
                stored: Instant::now(),
                value: value.clone(),
            },
        );
        memo.stats.entries = memo.slots.len();
        value
    }
}

impl<S> fmt::Debug for Cached<S>
where
    S: Sampler + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cached")
            .field("parent", &self.parent)
            .field("stats", &self.stats())
            .field("invalidator", &self.invalidator.is_some())
            .finish()
    }
}

/// Reads every lattice point of `sampler` into a row-major array.
///
/// The result has the same extents and reads `fallback` outside them.
pub fn stash<S>(sampler: &S, fallback: S::Item) -> OpsResult<FlatArray<S::Item, Vec<S::Item>>>
where
    S: Sampler + ?Sized,
    S::Item: Clone,
{
    let data = to_flat_xy(sampler);
    trace!(len = data.len(), "stash");
    from_flat(data, sampler.width(), sampler.height(), Layout::Xy, fallback)
}
