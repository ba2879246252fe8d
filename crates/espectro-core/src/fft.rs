//! Real-input FFT wrapper over rustfft.

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;
use std::sync::Arc;

/// Forward FFT for real input with a fixed transform size.
///
/// The plan is built once and reused for every frame; `forward` zero-pads
/// or truncates its input to the plan size and returns only the
/// non-negative frequency half (`size/2 + 1` complex bins).
pub struct Fft {
    fft: Arc<dyn rustfft::Fft<f64>>,
    size: usize,
}

impl Fft {
    /// Create a new FFT processor for the given transform size.
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        Self { fft, size }
    }

    /// Get the transform size.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of non-negative frequency bins (`size/2 + 1`).
    pub fn num_bins(&self) -> usize {
        self.size / 2 + 1
    }

    /// Forward FFT of a real signal.
    ///
    /// The input is zero-padded (or truncated) to the transform size.
    /// Returns bins from DC to Nyquist inclusive.
    pub fn forward(&self, input: &[f64]) -> Vec<Complex<f64>> {
        let mut buffer: Vec<Complex<f64>> =
            input.iter().map(|&x| Complex::new(x, 0.0)).collect();
        buffer.resize(self.size, Complex::new(0.0, 0.0));

        self.fft.process(&mut buffer);

        buffer.truncate(self.size / 2 + 1);
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn forward_returns_half_spectrum() {
        let fft = Fft::new(1024);
        let signal = vec![0.0; 400];
        let spectrum = fft.forward(&signal);
        assert_eq!(spectrum.len(), 513);
        assert_eq!(fft.num_bins(), 513);
    }

    #[test]
    fn bin_centered_tone_lands_in_one_bin() {
        let size = 256;
        let fft = Fft::new(size);
        // Frequency exactly on bin 10
        let signal: Vec<f64> = (0..size)
            .map(|i| (2.0 * PI * 10.0 * i as f64 / size as f64).cos())
            .collect();
        let spectrum = fft.forward(&signal);

        let peak = spectrum
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.norm().total_cmp(&b.norm()))
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(peak, 10);
        // Bin-centered cosine: peak magnitude is size/2
        assert!((spectrum[10].norm() - size as f64 / 2.0).abs() < 1e-6);
    }

    #[test]
    fn dc_signal_concentrates_in_bin_zero() {
        let fft = Fft::new(128);
        let spectrum = fft.forward(&vec![1.0; 128]);
        assert!((spectrum[0].re - 128.0).abs() < 1e-9);
        for bin in &spectrum[1..] {
            assert!(bin.norm() < 1e-9);
        }
    }

    #[test]
    fn short_input_is_zero_padded() {
        let fft = Fft::new(64);
        let a = fft.forward(&[1.0, 2.0, 3.0]);
        let mut padded = vec![1.0, 2.0, 3.0];
        padded.resize(64, 0.0);
        let b = fft.forward(&padded);
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).norm() < 1e-12);
        }
    }
}
