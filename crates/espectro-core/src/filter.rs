//! First-order IIR filtering with controlled initial conditions.
//!
//! The preprocessing chain only ever needs first-order sections (DC
//! removal and pre-emphasis), so the filters here are specialized to
//! two-coefficient numerators/denominators in direct form II transposed.
//! Coefficient vectors are `[b0, b1]` / `[1, a1]`; the leading denominator
//! coefficient must be 1.

/// Filter a signal through a first-order section with initial state `zi`.
///
/// Direct form II transposed:
///
/// ```text
/// y[n] = b0 x[n] + z[n-1]
/// z[n] = b1 x[n] - a1 y[n]
/// ```
pub fn lfilter(b: [f64; 2], a: [f64; 2], x: &[f64], zi: f64) -> Vec<f64> {
    let mut z = zi;
    x.iter()
        .map(|&xn| {
            let y = b[0] * xn + z;
            z = b[1] * xn - a[1] * y;
            y
        })
        .collect()
}

/// Initial filter state such that the output of [`lfilter`] starts at the
/// steady-state response to a unit step input.
///
/// Passing `zi * x[0]` makes the filter behave as if the input had been
/// held at `x[0]` forever, suppressing the startup transient.
pub fn lfilter_zi(b: [f64; 2], a: [f64; 2]) -> f64 {
    (b[1] - a[1] * b[0]) / (1.0 + a[1])
}

/// Zero-phase filtering: forward pass, backward pass, transients trimmed.
///
/// The signal is extended at both ends by an odd (point-reflected)
/// extension of up to 6 samples, filtered forward and backward with
/// step-matched initial conditions, and trimmed back to the input length.
/// The result has no phase distortion and the squared magnitude response
/// of the section.
pub fn filtfilt(b: [f64; 2], a: [f64; 2], x: &[f64]) -> Vec<f64> {
    if x.is_empty() {
        return Vec::new();
    }
    // 3 * max(len(a), len(b)) for a first-order section, shrunk for very
    // short signals
    let pad = 6.min(x.len() - 1);

    let first = x[0];
    let last = x[x.len() - 1];
    let mut ext = Vec::with_capacity(x.len() + 2 * pad);
    for i in (1..=pad).rev() {
        ext.push(2.0 * first - x[i]);
    }
    ext.extend_from_slice(x);
    for i in 1..=pad {
        ext.push(2.0 * last - x[x.len() - 1 - i]);
    }

    let zi = lfilter_zi(b, a);

    let forward = lfilter(b, a, &ext, zi * ext[0]);
    let mut reversed: Vec<f64> = forward.into_iter().rev().collect();
    let backward = lfilter(b, a, &reversed, zi * reversed[0]);
    reversed = backward.into_iter().rev().collect();

    reversed[pad..reversed.len() - pad].to_vec()
}
