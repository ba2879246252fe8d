//! Cepstral (DCT-II) transform with liftering.

use std::f64::consts::PI;

/// Orthonormal DCT-II over filterbank energies, with optional liftering.
///
/// The matrix is built once at construction and applied per frame:
/// `matrix[r][c] = sqrt(2/nfilt) * cos(pi * (2c + 1) * r / (2 * nfilt))`,
/// with row 0 divided by `sqrt(2)`. Lifter weights rebalance the cepstral
/// dynamic range: `1 + (L/2) * sin(pi * k / L)` for coefficient `k`.
#[derive(Debug, Clone)]
pub struct CepstralTransform {
    matrix: Vec<Vec<f64>>,
    lifter_weights: Option<Vec<f64>>,
    num_ceps: usize,
}

impl CepstralTransform {
    /// Build the DCT matrix for `num_ceps` coefficients over `num_filters`
    /// bands. `lifter = 0` disables liftering.
    pub fn new(num_ceps: usize, num_filters: usize, lifter: usize) -> Self {
        let norm = (2.0 / num_filters as f64).sqrt();
        let matrix: Vec<Vec<f64>> = (0..num_ceps)
            .map(|r| {
                let row_norm = if r == 0 { norm / 2.0_f64.sqrt() } else { norm };
                (0..num_filters)
                    .map(|c| {
                        row_norm
                            * (PI * (2 * c + 1) as f64 * r as f64
                                / (2.0 * num_filters as f64))
                                .cos()
                    })
                    .collect()
            })
            .collect();

        let lifter_weights = (lifter > 0).then(|| {
            let l = lifter as f64;
            (0..num_ceps)
                .map(|k| 1.0 + l / 2.0 * (PI * k as f64 / l).sin())
                .collect()
        });

        Self {
            matrix,
            lifter_weights,
            num_ceps,
        }
    }

    /// Number of cepstral coefficients produced per frame.
    pub fn num_ceps(&self) -> usize {
        self.num_ceps
    }

    /// Transform a frames-by-filters matrix into frames-by-ceps cepstra,
    /// applying the lifter when configured.
    pub fn apply(&self, frames: &[Vec<f64>]) -> Vec<Vec<f64>> {
        frames
            .iter()
            .map(|frame| {
                self.matrix
                    .iter()
                    .enumerate()
                    .map(|(r, row)| {
                        let cep: f64 = row
                            .iter()
                            .zip(frame.iter())
                            .map(|(&d, &x)| d * x)
                            .sum();
                        match &self.lifter_weights {
                            Some(w) => cep * w[r],
                            None => cep,
                        }
                    })
                    .collect()
            })
            .collect()
    }
}
