// src/cache/trig.rs

use core::f64::consts::TAU;
use std::sync::{Arc, OnceLock};

use log::trace;
use num_complex::Complex64;

use super::{CacheConfig, CacheStats, TableCache};

/// Forward twiddle factor `e^(-2*pi*i*k/n)` as `(cos, sin)`.
///
/// For power-of-two `n` the angle is folded into the first octant, which
/// makes the quarter-turn points exact and gives
/// `twiddle(n - k, n) == conj(twiddle(k, n))` bit for bit.
pub fn twiddle(k: usize, n: usize) -> (f64, f64) {
    if n == 0 {
        return (1.0, 0.0);
    }
    let k = k % n;
    if n.is_power_of_two() {
        folded(k, n)
    } else {
        direct(k, n)
    }
}

fn folded(k: usize, n: usize) -> (f64, f64) {
    if k == 0 {
        return (1.0, 0.0);
    }
    if 2 * k > n {
        let (c, s) = folded(n - k, n);
        return (c, -s);
    }
    if 4 * k > n {
        let (c, s) = folded(n / 2 - k, n);
        return (-c, s);
    }
    if 8 * k > n {
        let (c, s) = folded(n / 4 - k, n);
        return (-s, -c);
    }
    direct(k, n)
}

fn direct(k: usize, n: usize) -> (f64, f64) {
    let angle = -TAU * (k as f64) / (n as f64);
    let (sin, cos) = libm::sincos(angle);
    (cos, sin)
}

/// Cosine and sine of the forward twiddle angles for one size.
#[derive(Debug, Clone, PartialEq)]
pub struct TrigTable {
    cos: Box<[f64]>,
    sin: Box<[f64]>,
}

impl TrigTable {
    pub fn new(n: usize) -> Self {
        let (cos, sin): (Vec<f64>, Vec<f64>) = (0..n).map(|k| twiddle(k, n)).unzip();
        Self {
            cos: cos.into_boxed_slice(),
            sin: sin.into_boxed_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.cos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cos.is_empty()
    }

    pub fn cos(&self, k: usize) -> f64 {
        // An empty table behaves like `twiddle(k, 0)`.
        k.checked_rem(self.cos.len()).map_or(1.0, |k| self.cos[k])
    }

    /// Sine of the forward angle `-2*pi*k/n`.
    pub fn sin(&self, k: usize) -> f64 {
        k.checked_rem(self.sin.len()).map_or(0.0, |k| self.sin[k])
    }
}

/// Twiddle source resolved once per transform call.
#[derive(Debug, Clone)]
pub enum Twiddles {
    Table(Arc<TrigTable>),
    Direct { n: usize },
}

impl Twiddles {
    pub fn cos(&self, k: usize, _forward: bool) -> f64 {
        match self {
            Twiddles::Table(table) => table.cos(k),
            Twiddles::Direct { n } => twiddle(k, *n).0,
        }
    }

    pub fn sin(&self, k: usize, forward: bool) -> f64 {
        let sin = match self {
            Twiddles::Table(table) => table.sin(k),
            Twiddles::Direct { n } => twiddle(k, *n).1,
        };
        if forward { sin } else { -sin }
    }

    pub fn factor(&self, k: usize, forward: bool) -> Complex64 {
        let (cos, sin) = match self {
            Twiddles::Table(table) => (table.cos(k), table.sin(k)),
            Twiddles::Direct { n } => twiddle(k, *n),
        };
        if forward {
            Complex64::new(cos, sin)
        } else {
            Complex64::new(cos, -sin)
        }
    }

    pub fn is_table(&self) -> bool {
        matches!(self, Twiddles::Table(_))
    }
}

/// Precomputed twiddle factors keyed by transform size.
pub struct TrigFactorCache {
    tables: TableCache<TrigTable>,
}

impl TrigFactorCache {
    /// Creates the cache and builds its hot sizes.
    pub fn new(config: CacheConfig) -> Self {
        let cache = Self {
            tables: TableCache::new("trig", config, TrigTable::new),
        };
        cache.init();
        cache
    }

    /// Process-wide instance with the default config.
    pub fn global() -> Arc<Self> {
        static GLOBAL: OnceLock<Arc<TrigFactorCache>> = OnceLock::new();
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

    /// Resolves the twiddle source for size `n`.
    ///
    /// Never fails: sizes without a table fall back to direct evaluation.
    pub fn factors(&self, n: usize) -> Twiddles {
        if n == 0 || !n.is_power_of_two() {
            return Twiddles::Direct { n };
        }
        match self.tables.get_or_build(n) {
            Some(table) => Twiddles::Table(table),
            None => {
                trace!("no trig table for size {n}, evaluating directly");
                Twiddles::Direct { n }
            }
        }
    }

    pub fn get_cos(&self, n: usize, k: usize, forward: bool) -> f64 {
        self.factors(n).cos(k, forward)
    }

    pub fn get_sin(&self, n: usize, k: usize, forward: bool) -> f64 {
        self.factors(n).sin(k, forward)
    }
}

impl Default for TrigFactorCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

#[cfg(test)]
#[path = "trig_tests.rs"]
mod tests;
