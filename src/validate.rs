// src/validate.rs

//! Cross-checks one transform implementation against another.

use crate::common::{FftError, FftProcess};
use crate::engine::Trace;

pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// First place where a candidate left the baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Divergence {
    /// Butterfly stage, or `None` for the final output.
    pub stage: Option<usize>,
    /// Position in the interleaved data.
    pub index: usize,
    pub expected: f64,
    pub actual: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    /// Largest absolute difference over the final output.
    pub max_abs_error: f64,
    pub first_divergence: Option<Divergence>,
}

impl Comparison {
    pub fn is_match(&self) -> bool {
        self.first_divergence.is_none()
    }
}

/// Runs both implementations on the same input and compares outputs.
pub fn compare(
    baseline: &dyn FftProcess,
    candidate: &dyn FftProcess,
    real: &[f64],
    imag: &[f64],
    forward: bool,
    tolerance: f64,
) -> Result<Comparison, FftError> {
    let expected = baseline.process(real, imag, forward)?;
    let actual = candidate.process(real, imag, forward)?;
    Ok(Comparison {
        max_abs_error: max_abs_error(&expected, &actual),
        first_divergence: first_divergence(&expected, &actual, None, tolerance),
    })
}

/// Compares stage snapshots in order, then the final output.
pub fn compare_traces(baseline: &Trace, candidate: &Trace, tolerance: f64) -> Comparison {
    let staged = baseline
        .stages
        .iter()
        .zip(&candidate.stages)
        .enumerate()
        .find_map(|(stage, (expected, actual))| {
            first_divergence(expected, actual, Some(stage), tolerance)
        })
        .or_else(|| missing_stage(baseline, candidate));

    Comparison {
        max_abs_error: max_abs_error(&baseline.output, &candidate.output),
        first_divergence: staged.or_else(|| {
            first_divergence(&baseline.output, &candidate.output, None, tolerance)
        }),
    }
}

fn first_divergence(
    expected: &[f64],
    actual: &[f64],
    stage: Option<usize>,
    tolerance: f64,
) -> Option<Divergence> {
    let len = expected.len().max(actual.len());
    (0..len).find_map(|index| {
        let e = expected.get(index).copied().unwrap_or(f64::NAN);
        let a = actual.get(index).copied().unwrap_or(f64::NAN);
        // NaN never passes.
        if (e - a).abs() <= tolerance {
            None
        } else {
            Some(Divergence {
                stage,
                index,
                expected: e,
                actual: a,
            })
        }
    })
}

/// A stage present in only one trace diverges at its first value.
fn missing_stage(baseline: &Trace, candidate: &Trace) -> Option<Divergence> {
    let stage = baseline.stages.len().min(candidate.stages.len());
    if baseline.stages.len() == candidate.stages.len() {
        return None;
    }
    let first = |trace: &Trace| {
        trace
            .stages
            .get(stage)
            .and_then(|values| values.first().copied())
            .unwrap_or(f64::NAN)
    };
    Some(Divergence {
        stage: Some(stage),
        index: 0,
        expected: first(baseline),
        actual: first(candidate),
    })
}

fn max_abs_error(expected: &[f64], actual: &[f64]) -> f64 {
    if expected.len() != actual.len() {
        return f64::INFINITY;
    }
    expected
        .iter()
        .zip(actual)
        .map(|(e, a)| (e - a).abs())
        .fold(0.0, f64::max)
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
