// src/common.rs

use core::fmt;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FftError {
    /// Length is zero or not a power of two.
    InvalidSize { len: usize },
    /// Real and imaginary sequences differ in length.
    ShapeMismatch { real: usize, imag: usize },
    /// Result accessor called outside `[0, size)`.
    IndexOutOfRange { index: usize, size: usize },
    /// Interleaved data must hold whole (re, im) pairs.
    OddInterleavedLength { len: usize },
}

impl fmt::Display for FftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FftError::InvalidSize { len } => {
                write!(f, "Size must be a positive power of 2, got {len}")
            }
            FftError::ShapeMismatch { real, imag } => write!(
                f,
                "Real and imaginary parts differ in length ({real} vs {imag})"
            ),
            FftError::IndexOutOfRange { index, size } => {
                write!(f, "Index {index} out of range for {size} samples")
            }
            FftError::OddInterleavedLength { len } => {
                write!(f, "Interleaved data must have even length, got {len}")
            }
        }
    }
}

impl std::error::Error for FftError {}

/// Checks `len` is a usable transform size.
pub fn validate_size(len: usize) -> Result<(), FftError> {
    if len == 0 || !len.is_power_of_two() {
        return Err(FftError::InvalidSize { len });
    }
    Ok(())
}

/// Checks the transform precondition and returns `N`.
///
/// Runs before any buffer is allocated or any cache is touched.
pub fn validate_shape(real: &[f64], imag: &[f64]) -> Result<usize, FftError> {
    if real.len() != imag.len() {
        return Err(FftError::ShapeMismatch {
            real: real.len(),
            imag: imag.len(),
        });
    }
    validate_size(real.len())?;
    Ok(real.len())
}

/// Uniform contract shared by every transform implementation.
///
/// `process` takes separate real and imaginary parts of length `N` and
/// returns `2N` interleaved values (`re0, im0, re1, im1, ...`) in natural
/// bin order, scaled by `1/sqrt(N)` in both directions.
pub trait FftProcess {
    /// Fixed size this implementation handles, or `None` for any power of two.
    fn size(&self) -> Option<usize>;

    fn process(&self, real: &[f64], imag: &[f64], forward: bool) -> Result<Vec<f64>, FftError>;

    fn supports(&self, n: usize) -> bool {
        supports_size(self.size(), n)
    }
}

/// Whether an implementation of fixed `size` (or any size, for `None`)
/// can run a transform of length `n`.
pub fn supports_size(size: Option<usize>, n: usize) -> bool {
    match size {
        Some(size) => size == n,
        None => n.is_power_of_two(),
    }
}

#[cfg(test)]
#[path = "common_tests.rs"]
mod tests;
