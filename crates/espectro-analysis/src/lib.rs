//! Espectro Analysis - short-time spectral feature extraction
//!
//! Converts a raw audio waveform into a sequence of fixed-size feature
//! vectors for downstream speech and audio analysis: framing and
//! windowing, an auditory frequency-warped triangular filterbank,
//! optional cepstral (DCT) compression, and optional temporal derivative
//! features.
//!
//! - [`config`] - validated, immutable pipeline configuration
//! - [`filterbank`] - triangular filterbank over warped frequency scales
//! - [`stft`] - framing and short-time Fourier transform
//! - [`preprocess`] - DC removal, median filtering, pre-emphasis,
//!   normalization
//! - [`cepstrum`] - DCT-II transform and liftering
//! - [`extractor`] - the pipeline orchestrator
//! - [`error`] - configuration and transform error types
//!
//! # Example
//!
//! ```rust
//! use espectro_analysis::{SpectralConfig, SpectralExtractor};
//! use std::f64::consts::PI;
//!
//! // 40 log-mel energies per 10 ms frame, 25 ms windows, at 16 kHz
//! let extractor = SpectralExtractor::new(SpectralConfig::default())?;
//!
//! let signal: Vec<f64> = (0..16000)
//!     .map(|i| (2.0 * PI * 200.0 * i as f64 / 16000.0).sin())
//!     .collect();
//! let features = extractor.transform(&signal, None)?;
//!
//! assert_eq!(features.len(), 100);
//! assert_eq!(features[0].len(), 40);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # MFCCs with deltas
//!
//! ```rust
//! use espectro_analysis::{SpectralConfig, SpectralExtractor};
//!
//! let config = SpectralConfig {
//!     use_dct: true,
//!     num_ceps: 13,
//!     compute_deltas: true,
//!     ..SpectralConfig::default()
//! };
//! let extractor = SpectralExtractor::new(config)?;
//! assert_eq!(extractor.feature_dimension(), 39);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cepstrum;
pub mod config;
pub mod error;
pub mod extractor;
pub mod filterbank;
pub mod preprocess;
pub mod stft;

// Re-export main types at crate root
pub use config::{Compression, SpectralConfig};
pub use error::{ConfigError, TransformError};
pub use extractor::SpectralExtractor;
pub use filterbank::TriangularFilterbank;
pub use stft::StftFramer;

// The warping scale lives in espectro-core; re-export it so configs can be
// written against this crate alone.
pub use espectro_core::scale::Scale;
