// src/cache/bitrev.rs

use std::sync::{Arc, OnceLock};

use crate::common::{FftError, validate_size};

use super::{CacheConfig, CacheStats, TableCache};

/// Reverses the low `bits` bits of `i`.
pub fn reverse_bits(mut i: usize, bits: u32) -> usize {
    let mut reversed = 0;
    for _ in 0..bits {
        reversed = (reversed << 1) | (i & 1);
        i >>= 1;
    }
    reversed
}

/// Fills the bit-reversal permutation for a power-of-two `n`.
pub fn bit_reversal_table(n: usize) -> Vec<usize> {
    let bits = n.trailing_zeros();
    (0..n).map(|i| reverse_bits(i, bits)).collect()
}

/// Bit-reversal permutations keyed by transform size.
pub struct BitReversalCache {
    tables: TableCache<Vec<usize>>,
}

impl BitReversalCache {
    /// Creates the cache and builds its hot sizes.
    pub fn new(config: CacheConfig) -> Self {
        let cache = Self {
            tables: TableCache::new("bitrev", config, bit_reversal_table),
        };
        cache.init();
        cache
    }

    /// Process-wide instance with the default config.
    pub fn global() -> Arc<Self> {
        static GLOBAL: OnceLock<Arc<BitReversalCache>> = OnceLock::new();
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(Self::new(CacheConfig::default()))))
    }

    pub fn init(&self) {
        self.tables.init();
    }

    pub fn clear(&self) {
        self.tables.clear();
    }

    pub fn config(&self) -> &CacheConfig {
        self.tables.config()
    }

    pub fn stats(&self) -> CacheStats {
        self.tables.stats()
    }

    pub fn is_precomputed(&self, n: usize) -> bool {
        self.tables.contains(n)
    }

    /// Returns the permutation for `n`, where `table[k]` is `k` with its
    /// `log2(n)` bits reversed.
    pub fn get_table(&self, n: usize) -> Result<Arc<Vec<usize>>, FftError> {
        validate_size(n)?;
        Ok(self
            .tables
            .get_or_build(n)
            .unwrap_or_else(|| Arc::new(bit_reversal_table(n))))
    }
}

impl Default for BitReversalCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

#[cfg(test)]
#[path = "bitrev_tests.rs"]
mod tests;
