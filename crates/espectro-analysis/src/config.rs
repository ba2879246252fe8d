//! Extraction pipeline configuration.
//!
//! [`SpectralConfig`] is an explicit record of every pipeline option,
//! validated once at extractor construction and immutable afterwards. The
//! serde forms of the enums match the conventional lowercase string tags
//! (`"mel"`, `"cubicroot"`, ...), so an unrecognized tag fails at
//! deserialization.

use espectro_core::scale::Scale;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Amplitude compression applied to filterbank energies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    /// Natural logarithm.
    Log,
    /// Cubic root, `x^(1/3)`.
    CubicRoot,
    /// No compression.
    None,
}

impl Compression {
    /// Apply the compression function to a single (pre-clamped) value.
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Compression::Log => x.ln(),
            Compression::CubicRoot => x.powf(1.0 / 3.0),
            Compression::None => x,
        }
    }
}

/// Configuration for [`SpectralExtractor`](crate::SpectralExtractor).
///
/// Options that the reference interface disables with sentinel values
/// (`medfilt_t = 0`, `medfilt_s = (0, 0)`, `noise_fr = 0`) are explicit
/// `Option` fields here; `None` means disabled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpectralConfig {
    /// Sample rate of the input signal in Hz.
    pub sample_rate: u32,
    /// Analysis window length in seconds.
    pub window_length: f64,
    /// Analysis window shift (hop) in seconds.
    pub window_shift: f64,
    /// DFT length; must be a positive power of two.
    pub nfft: usize,
    /// Perceptual frequency scale used to space the filterbank.
    pub scale: Scale,
    /// Lower edge of the filterbank band in Hz.
    pub lower_freq: f64,
    /// Upper edge of the filterbank band in Hz.
    pub upper_freq: f64,
    /// Number of triangular filters in the bank.
    pub num_filters: usize,
    /// Rescale each filter so its coefficients sum to 1.
    pub taper_filters: bool,
    /// Amplitude compression applied after the filterbank.
    pub compression: Compression,
    /// Apply the DCT (cepstral) stage.
    pub use_dct: bool,
    /// Number of cepstral coefficients kept; meaningful only with
    /// `use_dct`.
    pub num_ceps: usize,
    /// Replace cepstral coefficient 0 with the frame log energy.
    pub replace_c0_with_log_energy: bool,
    /// Liftering parameter; 0 disables liftering.
    pub lifter: usize,
    /// Append velocity and acceleration features.
    pub compute_deltas: bool,
    /// Remove DC offset with a zero-phase first-order highpass.
    pub remove_dc: bool,
    /// Odd kernel length of the temporal median filter; `None` disables.
    pub median_filter_time: Option<usize>,
    /// Odd `(frames, bins)` kernel of the 2-D spectral median filter;
    /// `None` disables.
    pub median_filter_spectral: Option<(usize, usize)>,
    /// Estimate a noise spectrum from this many leading frames and divide
    /// it out; `None` disables.
    pub noise_frames: Option<usize>,
    /// Pre-emphasis coefficient in `[0, 1]`; 0 disables.
    pub pre_emphasis: f64,
}

impl Default for SpectralConfig {
    fn default() -> Self {
        Self {
            sample_rate: 16000,
            window_length: 0.025,
            window_shift: 0.010,
            nfft: 1024,
            scale: Scale::Mel,
            lower_freq: 120.0,
            upper_freq: 7000.0,
            num_filters: 40,
            taper_filters: true,
            compression: Compression::Log,
            use_dct: false,
            num_ceps: 13,
            replace_c0_with_log_energy: true,
            lifter: 22,
            compute_deltas: false,
            remove_dc: false,
            median_filter_time: None,
            median_filter_spectral: None,
            noise_frames: None,
            pre_emphasis: 0.97,
        }
    }
}

impl SpectralConfig {
    /// Validate every invariant of the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_rate == 0 {
            return Err(ConfigError::ZeroSampleRate);
        }
        if self.window_length <= 0.0
            || self.window_shift <= 0.0
            || self.window_length_samples() == 0
            || self.shift_samples() == 0
        {
            return Err(ConfigError::InvalidWindow {
                length: self.window_length,
                shift: self.window_shift,
            });
        }
        if self.nfft == 0 || !self.nfft.is_power_of_two() {
            return Err(ConfigError::InvalidNfft(self.nfft));
        }
        if self.num_filters == 0 {
            return Err(ConfigError::ZeroFilterCount);
        }
        let nyquist = f64::from(self.sample_rate) / 2.0;
        if self.lower_freq < 0.0 || self.lower_freq >= self.upper_freq || self.upper_freq > nyquist
        {
            return Err(ConfigError::InvalidBand {
                lower: self.lower_freq,
                upper: self.upper_freq,
                nyquist,
            });
        }
        if self.use_dct && self.num_ceps == 0 {
            return Err(ConfigError::ZeroCepstralCount);
        }
        if !(0.0..=1.0).contains(&self.pre_emphasis) {
            return Err(ConfigError::InvalidPreEmphasis(self.pre_emphasis));
        }
        if let Some(k) = self.median_filter_time {
            if k % 2 == 0 {
                return Err(ConfigError::EvenMedianKernel(k));
            }
        }
        if let Some((t, s)) = self.median_filter_spectral {
            if t % 2 == 0 {
                return Err(ConfigError::EvenMedianKernel(t));
            }
            if s % 2 == 0 {
                return Err(ConfigError::EvenMedianKernel(s));
            }
        }
        if self.noise_frames == Some(0) {
            return Err(ConfigError::ZeroNoiseFrames);
        }
        Ok(())
    }

    /// Window length in samples, `round(window_length * sample_rate)`.
    pub fn window_length_samples(&self) -> usize {
        (self.window_length * f64::from(self.sample_rate)).round() as usize
    }

    /// Window shift in samples, `round(window_shift * sample_rate)`.
    pub fn shift_samples(&self) -> usize {
        (self.window_shift * f64::from(self.sample_rate)).round() as usize
    }

    /// Number of non-negative FFT bins, `nfft/2 + 1`.
    pub fn num_bins(&self) -> usize {
        self.nfft / 2 + 1
    }

    /// Number of columns produced per frame by `transform`: the static
    /// dimension (cepstra or filters), tripled when deltas are appended.
    pub fn feature_dimension(&self) -> usize {
        let base = if self.use_dct {
            self.num_ceps
        } else {
            self.num_filters
        };
        if self.compute_deltas { base * 3 } else { base }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SpectralConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.window_length_samples(), 400);
        assert_eq!(config.shift_samples(), 160);
        assert_eq!(config.num_bins(), 513);
    }

    #[test]
    fn nfft_must_be_power_of_two() {
        let config = SpectralConfig {
            nfft: 1000,
            ..SpectralConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidNfft(1000)));
    }

    #[test]
    fn band_must_fit_below_nyquist() {
        let config = SpectralConfig {
            upper_freq: 9000.0,
            ..SpectralConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBand { .. })
        ));

        let config = SpectralConfig {
            lower_freq: 7000.0,
            upper_freq: 7000.0,
            ..SpectralConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBand { .. })
        ));
    }

    #[test]
    fn pre_emphasis_bounds() {
        let config = SpectralConfig {
            pre_emphasis: 1.5,
            ..SpectralConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidPreEmphasis(1.5))
        );
    }

    #[test]
    fn zero_filters_rejected() {
        let config = SpectralConfig {
            num_filters: 0,
            ..SpectralConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroFilterCount));
    }

    #[test]
    fn dct_requires_positive_ceps() {
        let config = SpectralConfig {
            use_dct: true,
            num_ceps: 0,
            ..SpectralConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroCepstralCount));
    }

    #[test]
    fn even_median_kernels_rejected() {
        let config = SpectralConfig {
            median_filter_time: Some(4),
            ..SpectralConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EvenMedianKernel(4)));

        let config = SpectralConfig {
            median_filter_spectral: Some((3, 2)),
            ..SpectralConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EvenMedianKernel(2)));
    }

    #[test]
    fn feature_dimension_covers_all_stage_combinations() {
        let mut config = SpectralConfig::default();
        assert_eq!(config.feature_dimension(), 40);

        config.compute_deltas = true;
        assert_eq!(config.feature_dimension(), 120);

        config.use_dct = true;
        assert_eq!(config.feature_dimension(), 39);

        config.compute_deltas = false;
        assert_eq!(config.feature_dimension(), 13);
    }

    #[test]
    fn serde_round_trip_uses_lowercase_tags() {
        let config = SpectralConfig {
            use_dct: true,
            compression: Compression::CubicRoot,
            ..SpectralConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"scale\":\"mel\""), "got: {json}");
        assert!(json.contains("\"compression\":\"cubicroot\""), "got: {json}");

        let back: SpectralConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn unknown_scale_tag_fails_to_deserialize() {
        let result =
            serde_json::from_str::<SpectralConfig>(r#"{"scale": "chirp"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn compression_functions() {
        assert!((Compression::Log.apply(1.0)).abs() < 1e-12);
        assert!((Compression::CubicRoot.apply(8.0) - 2.0).abs() < 1e-12);
        assert_eq!(Compression::None.apply(0.5), 0.5);
    }
}
