// src/engine.rs

use std::sync::Arc;

use num_complex::Complex64;

use crate::cache::{BitReversalCache, CacheConfig, TrigFactorCache, Twiddles};
use crate::common::{FftError, FftProcess, validate_shape, validate_size};
use crate::result::TransformResult;

/// Interleaved snapshots of one transform.
///
/// `stages[s]` is the working buffer after butterfly stage `s`, before
/// unscrambling and scaling; `output` is the final result.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub stages: Vec<Vec<f64>>,
    pub output: Vec<f64>,
}

/// Iterative radix-2 Cooley-Tukey transform for any power-of-two size.
///
/// Both directions scale by `1/sqrt(N)`, so `inverse(forward(x))` recovers
/// `x`. Twiddle factors and the output permutation come from the two
/// caches; the engine itself holds no per-call state.
#[derive(Clone)]
pub struct CooleyTukey {
    trig: Arc<TrigFactorCache>,
    bitrev: Arc<BitReversalCache>,
}

impl CooleyTukey {
    pub fn new(trig: Arc<TrigFactorCache>, bitrev: Arc<BitReversalCache>) -> Self {
        Self { trig, bitrev }
    }

    /// Engine backed by the process-wide caches.
    pub fn shared() -> Self {
        Self::new(TrigFactorCache::global(), BitReversalCache::global())
    }

    /// Engine with its own pair of caches.
    pub fn with_config(config: CacheConfig) -> Self {
        Self::new(
            Arc::new(TrigFactorCache::new(config.clone())),
            Arc::new(BitReversalCache::new(config)),
        )
    }

    pub fn trig_cache(&self) -> &TrigFactorCache {
        &self.trig
    }

    pub fn bitrev_cache(&self) -> &BitReversalCache {
        &self.bitrev
    }

    /// Returns `2N` interleaved values in natural bin order.
    pub fn transform(&self, real: &[f64], imag: &[f64], forward: bool) -> Result<Vec<f64>, FftError> {
        let bins = self.run(real, imag, forward, &mut |_: &[Complex64]| {})?;
        Ok(interleave(&bins))
    }

    /// Transform of a real signal; the imaginary part is taken as zero.
    pub fn transform_real(&self, real: &[f64], forward: bool) -> Result<Vec<f64>, FftError> {
        validate_size(real.len())?;
        let imag = vec![0.0; real.len()];
        self.transform(real, &imag, forward)
    }

    pub fn transform_result(
        &self,
        real: &[f64],
        imag: &[f64],
        forward: bool,
    ) -> Result<TransformResult, FftError> {
        let bins = self.run(real, imag, forward, &mut |_: &[Complex64]| {})?;
        Ok(TransformResult::from_complex(&bins))
    }

    pub fn forward(&self, real: &[f64], imag: &[f64]) -> Result<TransformResult, FftError> {
        self.transform_result(real, imag, true)
    }

    pub fn inverse(&self, real: &[f64], imag: &[f64]) -> Result<TransformResult, FftError> {
        self.transform_result(real, imag, false)
    }

    /// Runs a transform and keeps a snapshot after every butterfly stage.
    pub fn trace(&self, real: &[f64], imag: &[f64], forward: bool) -> Result<Trace, FftError> {
        let mut stages = Vec::new();
        let bins = self.run(real, imag, forward, &mut |buffer: &[Complex64]| {
            stages.push(interleave(buffer));
        })?;
        Ok(Trace {
            stages,
            output: interleave(&bins),
        })
    }

    fn run(
        &self,
        real: &[f64],
        imag: &[f64],
        forward: bool,
        observer: &mut dyn FnMut(&[Complex64]),
    ) -> Result<Vec<Complex64>, FftError> {
        let n = validate_shape(real, imag)?;

        let mut buffer: Vec<Complex64> = real
            .iter()
            .zip(imag)
            .map(|(&re, &im)| Complex64::new(re, im))
            .collect();

        if n > 1 {
            let twiddles = self.trig.factors(n);
            // Block b of every stage uses twiddle index bitrev_{log2(N)-1}(b).
            let stage_order = self.bitrev.get_table(n / 2)?;
            butterfly_stages(&mut buffer, &twiddles, &stage_order, forward, observer);

            let bitrev = self.bitrev.get_table(n)?;
            unscramble(&mut buffer, &bitrev);
        }

        let scale = (n as f64).sqrt().recip();
        for sample in buffer.iter_mut() {
            *sample = sample.scale(scale);
        }
        Ok(buffer)
    }
}

impl Default for CooleyTukey {
    fn default() -> Self {
        Self::shared()
    }
}

impl FftProcess for CooleyTukey {
    fn size(&self) -> Option<usize> {
        None
    }

    fn process(&self, real: &[f64], imag: &[f64], forward: bool) -> Result<Vec<f64>, FftError> {
        self.transform(real, imag, forward)
    }
}

/// Runs all `log2(N)` butterfly stages in place, coarsest spacing first.
///
/// Input is in natural order; output is left in bit-reversed order.
pub(crate) fn butterfly_stages(
    buffer: &mut [Complex64],
    twiddles: &Twiddles,
    stage_order: &[usize],
    forward: bool,
    observer: &mut dyn FnMut(&[Complex64]),
) {
    let n = buffer.len();
    let mut half = n >> 1;
    let mut blocks = 1;

    while half > 0 {
        for (block, &k) in stage_order[..blocks].iter().enumerate() {
            let w = twiddles.factor(k, forward);
            let start = 2 * block * half;
            let (low, high) = buffer[start..start + 2 * half].split_at_mut(half);

            for (a, b) in low.iter_mut().zip(high.iter_mut()) {
                let t = *b * w;
                *b = *a - t;
                *a += t;
            }
        }
        observer(buffer);
        half >>= 1;
        blocks <<= 1;
    }
}

/// Moves bit-reversed output into natural order.
pub(crate) fn unscramble<T>(buffer: &mut [T], bitrev: &[usize]) {
    for (k, &j) in bitrev.iter().enumerate() {
        // Each pair is swapped once, from its lower index.
        if j > k {
            buffer.swap(k, j);
        }
    }
}

pub(crate) fn interleave(bins: &[Complex64]) -> Vec<f64> {
    bins.iter().flat_map(|c| [c.re, c.im]).collect()
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
