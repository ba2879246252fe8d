//! Error types for configuration validation and signal transformation.

use thiserror::Error;

/// Errors raised once, at extractor construction, for invalid
/// configurations. Construction is fail-fast: an extractor is never built
/// in a partially configured state.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// Sample rate must be positive.
    #[error("sample rate must be positive")]
    ZeroSampleRate,

    /// Window length or shift is non-positive, or rounds to zero samples.
    #[error("window length {length}s / shift {shift}s must both span at least one sample")]
    InvalidWindow {
        /// Window length in seconds.
        length: f64,
        /// Window shift in seconds.
        shift: f64,
    },

    /// FFT length must be a positive power of two.
    #[error("nfft must be a positive power of two, got {0}")]
    InvalidNfft(usize),

    /// Filter count must be positive.
    #[error("filter count must be positive")]
    ZeroFilterCount,

    /// Filterbank band edges violate `0 <= lower < upper <= Nyquist`.
    #[error("band [{lower}, {upper}] Hz must satisfy 0 <= lower < upper <= {nyquist} (Nyquist)")]
    InvalidBand {
        /// Lower band edge in Hz.
        lower: f64,
        /// Upper band edge in Hz.
        upper: f64,
        /// Nyquist frequency for the configured sample rate.
        nyquist: f64,
    },

    /// Cepstral coefficient count must be positive when the DCT stage is on.
    #[error("cepstral coefficient count must be positive when dct is enabled")]
    ZeroCepstralCount,

    /// Pre-emphasis coefficient outside `[0, 1]`.
    #[error("pre-emphasis coefficient must be in [0, 1], got {0}")]
    InvalidPreEmphasis(f64),

    /// Median filter kernels must be odd so the window is centered.
    #[error("median filter kernel length must be odd, got {0}")]
    EvenMedianKernel(usize),

    /// Enabled noise estimation with a zero frame count.
    #[error("noise estimation frame count must be positive when enabled")]
    ZeroNoiseFrames,

    /// A filter column summed to zero and cannot be area-normalized.
    #[error("filter {0} has zero area and cannot be tapered")]
    ZeroAreaFilter(usize),
}

/// Errors raised per `transform`/`spectrogram` call. A call either fully
/// succeeds or fails before producing output.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TransformError {
    /// The signal is empty or contains only zeros, so peak normalization
    /// has no defined result.
    #[error("signal is empty or contains only zeros")]
    DegenerateSignal,

    /// A supplied noise profile does not cover every FFT bin.
    #[error("noise profile has {got} bins, expected {expected}")]
    NoiseProfileLength {
        /// Number of bins in the supplied profile.
        got: usize,
        /// Required number of bins (`nfft/2 + 1`).
        expected: usize,
    },
}
