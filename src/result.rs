// src/result.rs

use num_complex::Complex64;

use crate::common::FftError;

/// Frequency-domain output of one transform.
///
/// Holds its samples privately and never hands out a mutable view; every
/// derived quantity is recomputed from the stored components on each call.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformResult {
    bins: Box<[Complex64]>,
}

impl TransformResult {
    /// Builds a result from `re0, im0, re1, im1, ...`.
    pub fn from_interleaved(data: &[f64]) -> Result<Self, FftError> {
        if data.len() % 2 != 0 {
            return Err(FftError::OddInterleavedLength { len: data.len() });
        }
        let bins = data
            .chunks_exact(2)
            .map(|pair| Complex64::new(pair[0], pair[1]))
            .collect();
        Ok(Self { bins })
    }

    pub fn from_parts(real: &[f64], imag: &[f64]) -> Result<Self, FftError> {
        if real.len() != imag.len() {
            return Err(FftError::ShapeMismatch {
                real: real.len(),
                imag: imag.len(),
            });
        }
        let bins = real
            .iter()
            .zip(imag)
            .map(|(&re, &im)| Complex64::new(re, im))
            .collect();
        Ok(Self { bins })
    }

    pub fn from_complex(bins: &[Complex64]) -> Self {
        Self { bins: bins.into() }
    }

    pub fn size(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn as_complex(&self) -> &[Complex64] {
        &self.bins
    }

    pub fn to_interleaved(&self) -> Vec<f64> {
        self.bins.iter().flat_map(|c| [c.re, c.im]).collect()
    }

    pub fn real_parts(&self) -> Vec<f64> {
        self.bins.iter().map(|c| c.re).collect()
    }

    pub fn imaginary_parts(&self) -> Vec<f64> {
        self.bins.iter().map(|c| c.im).collect()
    }

    pub fn magnitudes(&self) -> Vec<f64> {
        self.bins.iter().map(|&c| magnitude(c)).collect()
    }

    /// Phase of each bin in radians, in `[-pi, pi]`.
    pub fn phases(&self) -> Vec<f64> {
        self.bins.iter().map(|c| c.im.atan2(c.re)).collect()
    }

    pub fn power_spectrum(&self) -> Vec<f64> {
        self.bins.iter().map(|&c| power(c)).collect()
    }

    pub fn real_at(&self, index: usize) -> Result<f64, FftError> {
        self.bin(index).map(|c| c.re)
    }

    pub fn imaginary_at(&self, index: usize) -> Result<f64, FftError> {
        self.bin(index).map(|c| c.im)
    }

    pub fn magnitude_at(&self, index: usize) -> Result<f64, FftError> {
        self.bin(index).map(magnitude)
    }

    pub fn phase_at(&self, index: usize) -> Result<f64, FftError> {
        self.bin(index).map(|c| c.im.atan2(c.re))
    }

    pub fn power_at(&self, index: usize) -> Result<f64, FftError> {
        self.bin(index).map(power)
    }

    fn bin(&self, index: usize) -> Result<Complex64, FftError> {
        self.bins
            .get(index)
            .copied()
            .ok_or(FftError::IndexOutOfRange {
                index,
                size: self.bins.len(),
            })
    }
}

fn power(c: Complex64) -> f64 {
    c.re * c.re + c.im * c.im
}

fn magnitude(c: Complex64) -> f64 {
    power(c).sqrt()
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;
