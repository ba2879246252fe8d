//! Triangular filterbank over FFT bins on a warped frequency scale.

use espectro_core::scale::Scale;

use crate::config::SpectralConfig;
use crate::error::ConfigError;

/// Bank of triangular filters pooling FFT-bin power into perceptual bands.
///
/// Built once from a validated configuration and read-only afterwards.
/// Filters are stored filter-major: `filters[m][bin]`.
#[derive(Debug, Clone)]
pub struct TriangularFilterbank {
    filters: Vec<Vec<f64>>,
    center_freqs: Vec<f64>,
    num_bins: usize,
}

impl TriangularFilterbank {
    /// Build the filterbank for a configuration.
    ///
    /// `num_filters + 2` points are spaced equally on the warped scale
    /// between the band edges, converted back to Hertz, and mapped to FFT
    /// bins with `round((nfft+1) * hz / sample_rate)`. Consecutive triples
    /// of bins form each filter's (left, center, right) edges. When
    /// adjacent warped edges collapse to the same bin, the degenerate ramp
    /// becomes a unit step at the center bin, so construction is total
    /// over the valid configuration space.
    pub fn build(config: &SpectralConfig) -> Result<Self, ConfigError> {
        let nbins = config.num_bins();
        let num_filters = config.num_filters;

        let edges = edge_bins(
            config.scale,
            config.lower_freq,
            config.upper_freq,
            num_filters,
            config.nfft,
            config.sample_rate,
            nbins,
        );

        let bin_width = f64::from(config.sample_rate) / (config.nfft as f64 + 1.0);
        let center_freqs: Vec<f64> = (0..num_filters)
            .map(|m| edges[m + 1] as f64 * bin_width)
            .collect();

        let mut filters = Vec::with_capacity(num_filters);
        for m in 0..num_filters {
            let (left, center, right) = (edges[m], edges[m + 1], edges[m + 2]);
            let mut w = vec![0.0; nbins];

            if center > left {
                for k in left..=center {
                    w[k] = (k - left) as f64 / (center - left) as f64;
                }
            }
            if right > center {
                for k in center..=right {
                    w[k] = (right - k) as f64 / (right - center) as f64;
                }
            }
            // Apex is always 1; zero-width ramps collapse to a unit step.
            w[center] = 1.0;

            if config.taper_filters {
                let sum: f64 = w.iter().sum();
                if sum <= 0.0 {
                    return Err(ConfigError::ZeroAreaFilter(m));
                }
                for v in &mut w {
                    *v /= sum;
                }
            }
            filters.push(w);
        }

        Ok(Self {
            filters,
            center_freqs,
            num_bins: nbins,
        })
    }

    /// Number of filters in the bank.
    pub fn num_filters(&self) -> usize {
        self.filters.len()
    }

    /// Number of FFT bins each filter spans (`nfft/2 + 1`).
    pub fn num_bins(&self) -> usize {
        self.num_bins
    }

    /// Coefficients of filter `m` over all FFT bins.
    pub fn filter(&self, m: usize) -> &[f64] {
        &self.filters[m]
    }

    /// Center frequency of each filter in Hz.
    pub fn center_frequencies(&self) -> &[f64] {
        &self.center_freqs
    }

    /// Pool one power spectrum into filterbank energies.
    pub fn apply(&self, spectrum: &[f64]) -> Vec<f64> {
        self.filters
            .iter()
            .map(|filter| {
                filter
                    .iter()
                    .zip(spectrum.iter())
                    .map(|(&w, &p)| w * p)
                    .sum()
            })
            .collect()
    }

    /// Pool every frame of a frames-by-bins power matrix.
    pub fn apply_to_frames(&self, frames: &[Vec<f64>]) -> Vec<Vec<f64>> {
        frames.iter().map(|frame| self.apply(frame)).collect()
    }
}

/// Warped-scale edge points converted to FFT bin indices.
fn edge_bins(
    scale: Scale,
    lower_freq: f64,
    upper_freq: f64,
    num_filters: usize,
    nfft: usize,
    sample_rate: u32,
    nbins: usize,
) -> Vec<usize> {
    let lower = scale.from_hertz(lower_freq);
    let upper = scale.from_hertz(upper_freq);
    let count = num_filters + 2;

    (0..count)
        .map(|i| {
            let warped = lower + (upper - lower) * i as f64 / (count - 1) as f64;
            let hz = scale.to_hertz(warped);
            let bin = round_half_even((nfft as f64 + 1.0) * hz / f64::from(sample_rate));
            (bin as usize).min(nbins - 1)
        })
        .collect()
}

/// Round half-way cases to the nearest even integer (banker's rounding),
/// so bin indices match array-library rounding semantics. Only defined for
/// non-negative inputs, which is all the bin mapping produces.
fn round_half_even(x: f64) -> f64 {
    if (x - x.trunc()).abs() == 0.5 {
        (x / 2.0).round() * 2.0
    } else {
        x.round()
    }
}
