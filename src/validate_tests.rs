use super::*;
use crate::cache::CacheConfig;
use crate::engine::CooleyTukey;
use crate::kernels::Butterfly4;

/// Engine output with one value nudged.
struct Perturbed {
    inner: CooleyTukey,
    index: usize,
    delta: f64,
}

impl FftProcess for Perturbed {
    fn size(&self) -> Option<usize> {
        None
    }

    fn process(&self, real: &[f64], imag: &[f64], forward: bool) -> Result<Vec<f64>, FftError> {
        let mut out = self.inner.process(real, imag, forward)?;
        out[self.index] += self.delta;
        Ok(out)
    }
}

fn engine() -> CooleyTukey {
    CooleyTukey::with_config(CacheConfig::default())
}

#[test]
fn test_matching_kernel() {
    let real = [1.0, -2.0, 0.5, 4.0];
    let imag = [0.0, 1.5, -1.0, 0.25];
    let cmp = compare(&engine(), &Butterfly4, &real, &imag, true, DEFAULT_TOLERANCE).unwrap();
    assert!(cmp.is_match());
    assert!(cmp.max_abs_error < 1e-12);
}

#[test]
fn test_reports_first_divergent_index() {
    let candidate = Perturbed {
        inner: engine(),
        index: 5,
        delta: 1e-6,
    };
    let real = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
    let cmp = compare(&engine(), &candidate, &real, &[0.0; 8], false, DEFAULT_TOLERANCE).unwrap();

    let divergence = cmp.first_divergence.unwrap();
    assert_eq!(divergence.index, 5);
    assert_eq!(divergence.stage, None);
    assert!((divergence.actual - divergence.expected - 1e-6).abs() < 1e-12);
    assert!((cmp.max_abs_error - 1e-6).abs() < 1e-12);

    // A looser tolerance accepts the same output.
    let cmp = compare(&engine(), &candidate, &real, &[0.0; 8], false, 1e-5).unwrap();
    assert!(cmp.is_match());
}

#[test]
fn test_input_errors_propagate() {
    assert_eq!(
        compare(&engine(), &Butterfly4, &[0.0; 8], &[0.0; 8], true, DEFAULT_TOLERANCE),
        Err(FftError::InvalidSize { len: 8 })
    );
}

#[test]
fn test_trace_divergence_names_the_stage() {
    let real: Vec<f64> = (0..16).map(|i| i as f64).collect();
    let baseline = engine().trace(&real, &[0.0; 16], true).unwrap();

    let mut candidate = baseline.clone();
    assert!(compare_traces(&baseline, &candidate, DEFAULT_TOLERANCE).is_match());

    candidate.stages[2][7] += 0.5;
    candidate.stages[3][1] += 0.5;
    let cmp = compare_traces(&baseline, &candidate, DEFAULT_TOLERANCE);
    let divergence = cmp.first_divergence.unwrap();
    assert_eq!(divergence.stage, Some(2));
    assert_eq!(divergence.index, 7);
    assert_eq!(cmp.max_abs_error, 0.0);
}

#[test]
fn test_length_and_nan_mismatches_diverge() {
    assert_eq!(
        first_divergence(&[1.0, 2.0], &[1.0], None, 1e-3).map(|d| d.index),
        Some(1)
    );
    assert_eq!(
        first_divergence(&[1.0], &[f64::NAN], None, 1e-3).map(|d| d.index),
        Some(0)
    );
    assert_eq!(max_abs_error(&[1.0], &[]), f64::INFINITY);
}

#[test]
fn test_missing_stages_diverge() {
    let real: Vec<f64> = (0..16).map(|i| i as f64).collect();
    let baseline = engine().trace(&real, &[0.0; 16], true).unwrap();

    let mut candidate = baseline.clone();
    candidate.stages.truncate(1);
    let cmp = compare_traces(&baseline, &candidate, DEFAULT_TOLERANCE);
    let divergence = cmp.first_divergence.unwrap();
    assert!(!cmp.is_match());
    assert_eq!(divergence.stage, Some(1));
    assert_eq!(divergence.index, 0);
    assert_eq!(divergence.expected, baseline.stages[1][0]);
    assert!(divergence.actual.is_nan());

    // Extra stages are reported the same way.
    let mut padded = baseline.clone();
    padded.stages.push(vec![0.0; 32]);
    let divergence = compare_traces(&baseline, &padded, DEFAULT_TOLERANCE)
        .first_divergence
        .unwrap();
    assert_eq!(divergence.stage, Some(4));
    assert!(divergence.expected.is_nan());
}
