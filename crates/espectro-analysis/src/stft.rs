//! Signal framing and short-time Fourier transform.

use espectro_core::fft::Fft;
use espectro_core::window::hamming;
use rustfft::num_complex::Complex;

/// Frames a signal into overlapping Hamming-windowed chunks and transforms
/// each with a real-input FFT.
///
/// The signal is first left-padded with `window_len / 2` zeros so the
/// first frame is centered near the signal start, then right-padded with
/// `window_len` zeros so the final frame always has a full window of
/// samples available. The frame count is
/// `ceil((padded_len - window_len) / shift + 1)`.
pub struct StftFramer {
    window: Vec<f64>,
    window_len: usize,
    shift: usize,
    fft: Fft,
}

impl StftFramer {
    /// Create a framer for the given window length, hop, and FFT size.
    pub fn new(window_len: usize, shift: usize, nfft: usize) -> Self {
        Self {
            window: hamming(window_len),
            window_len,
            shift,
            fft: Fft::new(nfft),
        }
    }

    /// Number of frames produced for a signal of the given length.
    pub fn num_frames(&self, signal_len: usize) -> usize {
        let padded = (signal_len + self.window_len / 2) as f64;
        let frames = ((padded - self.window_len as f64) / self.shift as f64 + 1.0).ceil();
        if frames > 0.0 { frames as usize } else { 0 }
    }

    /// Number of frequency bins per frame (`nfft/2 + 1`).
    pub fn num_bins(&self) -> usize {
        self.fft.num_bins()
    }

    /// Window, frame, and transform the signal.
    ///
    /// Each frame is an owned buffer; frames never alias one another.
    /// Returns a frames-by-bins complex matrix.
    pub fn frames(&self, signal: &[f64]) -> Vec<Vec<Complex<f64>>> {
        let num_frames = self.num_frames(signal.len());

        let mut padded =
            Vec::with_capacity(self.window_len / 2 + signal.len() + self.window_len);
        padded.resize(self.window_len / 2, 0.0);
        padded.extend_from_slice(signal);
        padded.resize(padded.len() + self.window_len, 0.0);

        // Hops wider than the window can place the last frame past the
        // standard right padding; extend with zeros so it stays in bounds.
        let needed = num_frames.saturating_sub(1) * self.shift + self.window_len;
        if padded.len() < needed {
            padded.resize(needed, 0.0);
        }

        (0..num_frames)
            .map(|f| {
                let start = f * self.shift;
                let windowed: Vec<f64> = padded[start..start + self.window_len]
                    .iter()
                    .zip(self.window.iter())
                    .map(|(&s, &w)| s * w)
                    .collect();
                self.fft.forward(&windowed)
            })
            .collect()
    }
}
