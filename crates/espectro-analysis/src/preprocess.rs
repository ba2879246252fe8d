//! Time-domain signal conditioning ahead of the STFT.
//!
//! Steps run in a fixed order, each enabled by configuration: DC removal,
//! temporal median filtering, pre-emphasis, peak normalization.

use espectro_core::filter::{filtfilt, lfilter, lfilter_zi};

use crate::error::TransformError;

/// Remove DC offset with a zero-phase first-order highpass,
/// `(1 - z^-1) / (1 - 0.999 z^-1)` run forward and backward.
pub fn remove_dc(signal: &[f64]) -> Vec<f64> {
    filtfilt([1.0, -1.0], [1.0, -0.999], signal)
}

/// Pre-emphasis highpass `y[n] = x[n] - c x[n-1]`.
///
/// The filter state is initialized to its steady-state response for a
/// unit step, so the opening samples are not transient-distorted.
pub fn pre_emphasize(signal: &[f64], coeff: f64) -> Vec<f64> {
    let b = [1.0, -coeff];
    let a = [1.0, 0.0];
    lfilter(b, a, signal, lfilter_zi(b, a))
}

/// Scale the signal so the peak absolute sample is 1.
///
/// Fails with [`TransformError::DegenerateSignal`] for empty or all-zero
/// input, where the division is undefined.
pub fn normalize_peak(signal: &mut [f64]) -> Result<(), TransformError> {
    let peak = signal.iter().fold(0.0_f64, |acc, &x| acc.max(x.abs()));
    if peak == 0.0 || !peak.is_finite() {
        return Err(TransformError::DegenerateSignal);
    }
    for x in signal.iter_mut() {
        *x /= peak;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn remove_dc_centers_offset_sine() {
        // The highpass pole at 0.999 takes ~1000 samples to settle, so
        // the offset is checked away from the edges, over a slice of
        // exactly 250 sine periods.
        let signal: Vec<f64> = (0..32768)
            .map(|i| 0.7 + (2.0 * PI * 250.0 * i as f64 / 16000.0).sin())
            .collect();
        let out = remove_dc(&signal);
        let interior = &out[8000..24000];
        let mean = interior.iter().sum::<f64>() / interior.len() as f64;
        assert!(mean.abs() < 1e-2, "residual interior mean {mean}");
    }

    #[test]
    fn pre_emphasis_difference_equation() {
        let x = [0.5, 0.25, -0.5, 1.0];
        let c = 0.97;
        let y = pre_emphasize(&x, c);
        // Steady-state init: the first sample behaves as if x[-1] == 1
        assert!((y[0] - (x[0] - c)).abs() < 1e-12);
        for n in 1..x.len() {
            assert!((y[n] - (x[n] - c * x[n - 1])).abs() < 1e-12);
        }
    }

    #[test]
    fn pre_emphasis_flattens_step() {
        // A unit step through the step-matched filter has no transient:
        // every output sample equals 1 - c.
        let x = vec![1.0; 32];
        let y = pre_emphasize(&x, 0.97);
        for v in y {
            assert!((v - 0.03).abs() < 1e-12, "got {v}");
        }
    }

    #[test]
    fn normalize_peak_scales_to_unit() {
        let mut x = vec![0.1, -0.5, 0.25];
        normalize_peak(&mut x).unwrap();
        assert!((x[1] + 1.0).abs() < 1e-12);
        let peak = x.iter().fold(0.0_f64, |a, &v| a.max(v.abs()));
        assert!((peak - 1.0).abs() < 1e-12);
    }

    #[test]
    fn normalize_peak_rejects_degenerate_signals() {
        let mut silent = vec![0.0; 128];
        assert_eq!(
            normalize_peak(&mut silent),
            Err(TransformError::DegenerateSignal)
        );

        let mut empty: Vec<f64> = Vec::new();
        assert_eq!(
            normalize_peak(&mut empty),
            Err(TransformError::DegenerateSignal)
        );
    }
}
