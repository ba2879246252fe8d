//! Espectro Core - DSP primitives for speech feature extraction
//!
//! Leaf numerical building blocks shared by the feature extraction
//! pipeline, with no dependencies between them:
//!
//! - [`scale`] - Hertz <-> mel/Bark/ERB perceptual scale conversions
//! - [`window`] - analysis window functions
//! - [`fft`] - real-input forward FFT over rustfft
//! - [`filter`] - first-order IIR filtering with controlled initial state,
//!   including zero-phase forward-backward filtering
//! - [`median`] - 1-D and 2-D median filters with zero-padded edges
//! - [`delta`] - regression-filter velocity and acceleration features
//!
//! All computation is `f64`; the downstream pipeline clamps against
//! `f64::EPSILON`, matching IEEE double reference implementations.
//!
//! # Example
//!
//! ```rust
//! use espectro_core::fft::Fft;
//! use espectro_core::window::hamming;
//!
//! let window = hamming(400);
//! let frame: Vec<f64> = window.iter().map(|w| w * 0.25).collect();
//! let spectrum = Fft::new(1024).forward(&frame);
//! assert_eq!(spectrum.len(), 513);
//! ```

pub mod delta;
pub mod fft;
pub mod filter;
pub mod median;
pub mod scale;
pub mod window;

// Re-export main types at crate root
pub use fft::Fft;
pub use scale::Scale;
