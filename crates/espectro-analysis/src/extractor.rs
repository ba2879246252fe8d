//! Feature extraction pipeline orchestration.

use espectro_core::{delta, median};

use crate::cepstrum::CepstralTransform;
use crate::config::SpectralConfig;
use crate::error::{ConfigError, TransformError};
use crate::filterbank::TriangularFilterbank;
use crate::preprocess;
use crate::stft::StftFramer;

/// Numerical guard floor; power and filterbank energies are clamped to
/// `[EPS, inf)` before compression.
const EPS: f64 = f64::EPSILON;

/// Converts raw audio signals into fixed-size feature vectors.
///
/// Construction validates the configuration and precomputes the
/// filterbank, the DCT matrix, and the analysis window in one step; a
/// constructed extractor is always fully usable and never reconfigured.
/// [`transform`](Self::transform) and
/// [`spectrogram`](Self::spectrogram) are pure functions of the extractor
/// and their inputs, so a shared `&SpectralExtractor` is safe to use from
/// any number of threads.
pub struct SpectralExtractor {
    config: SpectralConfig,
    filterbank: TriangularFilterbank,
    cepstral: Option<CepstralTransform>,
    framer: StftFramer,
}

impl SpectralExtractor {
    /// Validate the configuration and build the extractor.
    pub fn new(config: SpectralConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let filterbank = TriangularFilterbank::build(&config)?;
        let cepstral = config
            .use_dct
            .then(|| CepstralTransform::new(config.num_ceps, config.num_filters, config.lifter));
        let framer = StftFramer::new(
            config.window_length_samples(),
            config.shift_samples(),
            config.nfft,
        );

        tracing::debug!(
            sample_rate = config.sample_rate,
            nfft = config.nfft,
            scale = ?config.scale,
            num_filters = config.num_filters,
            feature_dimension = config.feature_dimension(),
            "built spectral extractor"
        );

        Ok(Self {
            config,
            filterbank,
            cepstral,
            framer,
        })
    }

    /// The resolved configuration (read-only, as validated).
    pub fn config(&self) -> &SpectralConfig {
        &self.config
    }

    /// The precomputed triangular filterbank.
    pub fn filterbank(&self) -> &TriangularFilterbank {
        &self.filterbank
    }

    /// Number of feature columns `transform` produces per frame.
    pub fn feature_dimension(&self) -> usize {
        self.config.feature_dimension()
    }

    /// Number of frames `transform` produces for a signal of this length.
    pub fn num_frames(&self, signal_len: usize) -> usize {
        self.framer.num_frames(signal_len)
    }

    /// Convert a signal into a frames-by-features matrix.
    ///
    /// `noise_profile`, when given, is a per-bin noise power estimate of
    /// length `nfft/2 + 1` that every frame is divided by, in addition to
    /// the internal leading-frames estimate when that is enabled.
    pub fn transform(
        &self,
        signal: &[f64],
        noise_profile: Option<&[f64]>,
    ) -> Result<Vec<Vec<f64>>, TransformError> {
        if let Some(profile) = noise_profile {
            if profile.len() != self.config.num_bins() {
                return Err(TransformError::NoiseProfileLength {
                    got: profile.len(),
                    expected: self.config.num_bins(),
                });
            }
        }

        let mut power = self.power_frames(signal)?;
        tracing::trace!(frames = power.len(), "power spectrum computed");

        // Captured before spectral median filtering and noise subtraction
        let log_energy: Option<Vec<f64>> = (self.config.use_dct
            && self.config.replace_c0_with_log_energy)
            .then(|| {
                power
                    .iter()
                    .map(|frame| frame.iter().sum::<f64>().max(EPS).ln())
                    .collect()
            });

        if let Some(kernel) = self.config.median_filter_spectral {
            power = median::medfilt2(&power, kernel);
        }

        if let Some(n) = self.config.noise_frames {
            let noise = leading_frames_noise(&power, n);
            divide_by_noise(&mut power, &noise);
        }
        if let Some(profile) = noise_profile {
            divide_by_noise(&mut power, profile);
        }

        // Filterbank pooling, guard clamp, compression
        let mut features = self.filterbank.apply_to_frames(&power);
        for frame in &mut features {
            for x in frame.iter_mut() {
                *x = self.config.compression.apply(x.max(EPS));
            }
        }

        if let Some(cepstral) = &self.cepstral {
            features = cepstral.apply(&features);
            if let Some(log_e) = log_energy {
                for (frame, e) in features.iter_mut().zip(log_e) {
                    frame[0] = e;
                }
            }
        }

        if self.config.compute_deltas {
            let vel = delta::velocity(&features);
            let acc = delta::acceleration(&features);
            for ((frame, v), a) in features.iter_mut().zip(vel).zip(acc) {
                frame.extend(v);
                frame.extend(a);
            }
        }

        Ok(features)
    }

    /// Power spectrogram of the signal: frames by `nfft/2 + 1` bins,
    /// preprocessed and median-filtered but without the filterbank or
    /// cepstral stages.
    pub fn spectrogram(&self, signal: &[f64]) -> Result<Vec<Vec<f64>>, TransformError> {
        let mut power = self.power_frames(signal)?;
        if let Some(kernel) = self.config.median_filter_spectral {
            power = median::medfilt2(&power, kernel);
        }
        Ok(power)
    }

    /// Preprocess, frame, and transform the signal into per-bin power,
    /// `re(X)^2 / nfft`.
    ///
    /// Only the real part enters the power estimate; this matches the
    /// normalization of established feature pipelines rather than the
    /// full complex-magnitude convention.
    fn power_frames(&self, signal: &[f64]) -> Result<Vec<Vec<f64>>, TransformError> {
        let conditioned = self.preprocess(signal)?;
        let spectra = self.framer.frames(&conditioned);
        let nfft = self.config.nfft as f64;

        Ok(spectra
            .iter()
            .map(|frame| frame.iter().map(|c| c.re * c.re / nfft).collect())
            .collect())
    }

    /// DC removal, temporal median filter, pre-emphasis, peak
    /// normalization, in that order, each as configured.
    ///
    /// An empty or all-zero signal is rejected before the filter chain:
    /// the pre-emphasis startup state would otherwise turn pure silence
    /// into an impulse that survives peak normalization.
    fn preprocess(&self, signal: &[f64]) -> Result<Vec<f64>, TransformError> {
        if signal.iter().all(|&x| x == 0.0) {
            return Err(TransformError::DegenerateSignal);
        }
        let mut sig = signal.to_vec();
        if self.config.remove_dc {
            sig = preprocess::remove_dc(&sig);
        }
        if let Some(kernel) = self.config.median_filter_time {
            sig = median::medfilt(&sig, kernel);
        }
        if self.config.pre_emphasis > 0.0 {
            sig = preprocess::pre_emphasize(&sig, self.config.pre_emphasis);
        }
        preprocess::normalize_peak(&mut sig)?;
        Ok(sig)
    }
}

/// Per-bin mean power of the first `count` frames (clamped to the frames
/// available). The estimate is floored at `EPS` so a silent lead-in never
/// injects NaN or infinities into the division.
fn leading_frames_noise(power: &[Vec<f64>], count: usize) -> Vec<f64> {
    let count = count.min(power.len());
    if count == 0 || power.is_empty() {
        return Vec::new();
    }
    let nbins = power[0].len();
    let mut noise = vec![0.0; nbins];
    for frame in &power[..count] {
        for (acc, &p) in noise.iter_mut().zip(frame.iter()) {
            *acc += p;
        }
    }
    for n in &mut noise {
        *n = (*n / count as f64).max(EPS);
    }
    noise
}

/// Divide every frame by a per-bin noise estimate, flooring the
/// denominator at `EPS`.
fn divide_by_noise(power: &mut [Vec<f64>], noise: &[f64]) {
    for frame in power.iter_mut() {
        for (p, &n) in frame.iter_mut().zip(noise.iter()) {
            *p /= n.max(EPS);
        }
    }
}
