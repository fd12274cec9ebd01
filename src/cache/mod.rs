// src/cache/mod.rs

//! Size-keyed stores for the immutable tables the engine reads per call.
//!
//! Every store has two tiers. Hot sizes are built eagerly by `init` and stay
//! pinned until `clear`. Any other power-of-two size is built on first use
//! and kept in an LRU of `lazy_capacity` entries, up to `max_lazy_size`;
//! with a capacity of zero nothing outside the hot set is ever retained.
//!
//! Tables are handed out as `Arc`s, so an eviction never pulls a table out
//! from under a transform that is still reading it.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::{debug, trace, warn};
use lru::LruCache;

pub mod bitrev;
pub mod trig;

pub use bitrev::BitReversalCache;
pub use trig::{TrigFactorCache, TrigTable, Twiddles};

/// Smallest and largest hot size (as powers of two) in the default config.
const DEFAULT_HOT_BITS: core::ops::RangeInclusive<u32> = 3..=12;
const DEFAULT_LAZY_CAPACITY: usize = 32;
const DEFAULT_MAX_LAZY_SIZE: usize = 1 << 16;

/// Sizing policy for a table cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Sizes built by `init` and never evicted.
    pub hot_sizes: Vec<usize>,
    /// Number of uncommon sizes retained after first use. Zero disables
    /// lazy caching entirely.
    ///
    /// This counts tables, not bytes: a trig table costs 16 bytes per entry
    /// and a permutation 8, so memory is bounded by `max_lazy_size` as well.
    pub lazy_capacity: usize,
    /// Largest size the lazy tier will retain. Bigger sizes are rebuilt or
    /// evaluated directly on every call.
    pub max_lazy_size: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            hot_sizes: DEFAULT_HOT_BITS.map(|bits| 1usize << bits).collect(),
            lazy_capacity: DEFAULT_LAZY_CAPACITY,
            max_lazy_size: DEFAULT_MAX_LAZY_SIZE,
        }
    }
}

impl CacheConfig {
    /// No hot sizes and no lazy tier: every lookup recomputes.
    pub fn uncached() -> Self {
        Self {
            hot_sizes: Vec::new(),
            lazy_capacity: 0,
            max_lazy_size: DEFAULT_MAX_LAZY_SIZE,
        }
    }

    pub fn with_hot_sizes(mut self, hot_sizes: Vec<usize>) -> Self {
        self.hot_sizes = hot_sizes;
        self
    }

    pub fn with_lazy_capacity(mut self, lazy_capacity: usize) -> Self {
        self.lazy_capacity = lazy_capacity;
        self
    }

    pub fn with_max_lazy_size(mut self, max_lazy_size: usize) -> Self {
        self.max_lazy_size = max_lazy_size;
        self
    }

    fn usable_hot_sizes(&self) -> impl Iterator<Item = usize> + '_ {
        self.hot_sizes.iter().copied().filter(|&n| {
            let ok = n.is_power_of_two();
            if !ok {
                warn!("ignoring hot size {n}: not a power of two");
            }
            ok
        })
    }
}

/// Snapshot of what a cache currently holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub pinned: usize,
    pub lazy: usize,
    pub lazy_capacity: usize,
}

impl CacheStats {
    pub fn total(&self) -> usize {
        self.pinned + self.lazy
    }
}

/// Two-tier store shared by the trig and bit-reversal caches.
pub(crate) struct TableCache<T> {
    name: &'static str,
    config: CacheConfig,
    pinned: RwLock<HashMap<usize, Arc<T>>>,
    lazy: Option<Mutex<LruCache<usize, Arc<T>>>>,
    build: fn(usize) -> T,
}

impl<T> TableCache<T> {
    pub(crate) fn new(name: &'static str, config: CacheConfig, build: fn(usize) -> T) -> Self {
        let lazy = NonZeroUsize::new(config.lazy_capacity).map(|cap| Mutex::new(LruCache::new(cap)));
        Self {
            name,
            config,
            pinned: RwLock::new(HashMap::new()),
            lazy,
            build,
        }
    }

    pub(crate) fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Builds every hot size that is not already pinned.
    pub(crate) fn init(&self) {
        let missing: Vec<usize> = {
            let pinned = read(&self.pinned);
            self.config
                .usable_hot_sizes()
                .filter(|n| !pinned.contains_key(n))
                .collect()
        };

        // Build outside the lock; readers never see a partial table.
        let built: Vec<(usize, Arc<T>)> = missing
            .into_iter()
            .map(|n| (n, Arc::new((self.build)(n))))
            .collect();

        let mut pinned = write(&self.pinned);
        for (n, table) in built {
            pinned.entry(n).or_insert(table);
        }
        debug!("{} cache initialised with {} pinned sizes", self.name, pinned.len());
    }

    pub(crate) fn clear(&self) {
        write(&self.pinned).clear();
        if let Some(lazy) = &self.lazy {
            lock(lazy).clear();
        }
        debug!("{} cache cleared", self.name);
    }

    pub(crate) fn contains(&self, n: usize) -> bool {
        if read(&self.pinned).contains_key(&n) {
            return true;
        }
        self.lazy
            .as_ref()
            .is_some_and(|lazy| lock(lazy).contains(&n))
    }

    /// Returns the table for `n`, building it into the lazy tier if needed.
    ///
    /// `None` means `n` is not pinned and the lazy tier is disabled or `n`
    /// exceeds `max_lazy_size`; the caller must compute without a table.
    pub(crate) fn get_or_build(&self, n: usize) -> Option<Arc<T>> {
        if let Some(table) = read(&self.pinned).get(&n) {
            return Some(Arc::clone(table));
        }

        let lazy = self.lazy.as_ref()?;
        if n > self.config.max_lazy_size {
            trace!("{} cache not retaining size {n}", self.name);
            return None;
        }
        if let Some(table) = lock(lazy).get(&n) {
            return Some(Arc::clone(table));
        }

        // Two threads may both get here for the same `n`. Both build the same
        // content; whichever inserts first is the one everybody keeps.
        let table = Arc::new((self.build)(n));
        let mut cache = lock(lazy);
        if let Some(existing) = cache.get(&n) {
            return Some(Arc::clone(existing));
        }
        if let Some((evicted, _)) = cache.push(n, Arc::clone(&table)) {
            trace!("{} cache evicted size {evicted}", self.name);
        }
        debug!("{} cache built lazy table for size {n}", self.name);
        Some(table)
    }

    pub(crate) fn stats(&self) -> CacheStats {
        CacheStats {
            pinned: read(&self.pinned).len(),
            lazy: self.lazy.as_ref().map_or(0, |lazy| lock(lazy).len()),
            lazy_capacity: self.config.lazy_capacity,
        }
    }
}

// Published tables are immutable, so a poisoned lock still guards whole values.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
