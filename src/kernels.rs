// src/kernels.rs

//! Fully unrolled transforms for the sizes where loop and table overhead
//! dominates the generic engine. Output matches `CooleyTukey` to within
//! rounding, including the `1/sqrt(N)` scaling.

use core::f64::consts::FRAC_1_SQRT_2;

use num_complex::Complex64;

use crate::common::{FftError, FftProcess, validate_shape};

fn check_size(real: &[f64], imag: &[f64], size: usize) -> Result<(), FftError> {
    let n = validate_shape(real, imag)?;
    if n != size {
        return Err(FftError::InvalidSize { len: n });
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Butterfly2;

impl FftProcess for Butterfly2 {
    fn size(&self) -> Option<usize> {
        Some(2)
    }

    fn process(&self, real: &[f64], imag: &[f64], _forward: bool) -> Result<Vec<f64>, FftError> {
        check_size(real, imag, 2)?;
        // Both twiddles are real, so direction does not matter.
        Ok(vec![
            (real[0] + real[1]) * FRAC_1_SQRT_2,
            (imag[0] + imag[1]) * FRAC_1_SQRT_2,
            (real[0] - real[1]) * FRAC_1_SQRT_2,
            (imag[0] - imag[1]) * FRAC_1_SQRT_2,
        ])
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Butterfly4;

impl FftProcess for Butterfly4 {
    fn size(&self) -> Option<usize> {
        Some(4)
    }

    fn process(&self, real: &[f64], imag: &[f64], forward: bool) -> Result<Vec<f64>, FftError> {
        check_size(real, imag, 4)?;
        let x0 = Complex64::new(real[0], imag[0]);
        let x1 = Complex64::new(real[1], imag[1]);
        let x2 = Complex64::new(real[2], imag[2]);
        let x3 = Complex64::new(real[3], imag[3]);

        let u0 = x0 + x2;
        let u1 = x0 - x2;
        let u2 = x1 + x3;
        let u3 = x1 - x3;

        // -j*u3 forward, +j*u3 inverse
        let rotated = if forward {
            Complex64::new(u3.im, -u3.re)
        } else {
            Complex64::new(-u3.im, u3.re)
        };

        let y = [u0 + u2, u1 + rotated, u0 - u2, u1 - rotated];
        Ok(y.iter().flat_map(|c| [c.re * 0.5, c.im * 0.5]).collect())
    }
}

#[cfg(test)]
#[path = "kernels_tests.rs"]
mod tests;
