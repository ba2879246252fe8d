//! Analysis window functions.

use std::f64::consts::PI;

/// Symmetric Hamming window of the given length.
///
/// Uses the `0.54 - 0.46 cos(2 pi n / (N-1))` form with the `N-1`
/// denominator, so the window is symmetric about its midpoint and the end
/// coefficients equal 0.08. This matches the convention of most numerical
/// toolkits rather than the periodic (DFT-even) variant.
pub fn hamming(len: usize) -> Vec<f64> {
    match len {
        0 => Vec::new(),
        1 => vec![1.0],
        _ => {
            let denom = (len - 1) as f64;
            (0..len)
                .map(|i| 0.54 - 0.46 * (2.0 * PI * i as f64 / denom).cos())
                .collect()
        }
    }
}
