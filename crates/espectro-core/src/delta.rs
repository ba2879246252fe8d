//! Temporal derivative (delta) features.
//!
//! Velocity is estimated per feature column with a 9-tap linear-regression
//! FIR, `[4,3,2,1,0,-1,-2,-3,-4]/60`, run causally over a matrix padded
//! with replicated boundary rows and realigned by discarding the filter
//! warm-up rows. Acceleration applies the same regression filter over a
//! wider padding, followed by a `[1,0,-1]/2` first-difference smoother.
//!
//! The top padding replicates row index 1 rather than row 0. This boundary
//! choice is kept for output compatibility with established feature
//! pipelines; only the first few output rows are affected.

/// Regression taps for the velocity estimate: `(4 - k) / 60` for k = 0..8.
fn regression_taps() -> [f64; 9] {
    std::array::from_fn(|k| (4.0 - k as f64) / 60.0)
}

/// First-difference smoother used by the acceleration stage.
const SMOOTH_TAPS: [f64; 3] = [0.5, 0.0, -0.5];

/// First temporal derivative of a frames-by-features matrix.
///
/// The output has the same shape as the input.
pub fn velocity(frames: &[Vec<f64>]) -> Vec<Vec<f64>> {
    if frames.is_empty() {
        return Vec::new();
    }
    let padded = pad_rows(frames, 4);
    column_fir(&padded, &regression_taps(), 8)
}

/// Second temporal derivative of a frames-by-features matrix.
///
/// The regression filter runs over a 5-row padding (leaving two extra rows
/// after realignment), then the smoother consumes those rows, so the
/// output again matches the input shape.
pub fn acceleration(frames: &[Vec<f64>]) -> Vec<Vec<f64>> {
    if frames.is_empty() {
        return Vec::new();
    }
    let padded = pad_rows(frames, 5);
    let smoothed_input = column_fir(&padded, &regression_taps(), 8);
    column_fir(&smoothed_input, &SMOOTH_TAPS, 2)
}

/// Replicate boundary rows: `amount` copies of row index 1 on top (row 0
/// for single-row input) and of the last row at the bottom.
fn pad_rows(frames: &[Vec<f64>], amount: usize) -> Vec<Vec<f64>> {
    let top = &frames[1.min(frames.len() - 1)];
    let bottom = &frames[frames.len() - 1];

    let mut padded = Vec::with_capacity(frames.len() + 2 * amount);
    for _ in 0..amount {
        padded.push(top.clone());
    }
    padded.extend_from_slice(frames);
    for _ in 0..amount {
        padded.push(bottom.clone());
    }
    padded
}

/// Causal FIR down each column, discarding the first `discard` output rows
/// to realign the filter delay.
fn column_fir(rows: &[Vec<f64>], taps: &[f64], discard: usize) -> Vec<Vec<f64>> {
    let ncols = rows[0].len();
    let nout = rows.len() - discard;

    (0..nout)
        .map(|i| {
            (0..ncols)
                .map(|j| {
                    let n = i + discard;
                    taps.iter()
                        .enumerate()
                        .take_while(|(k, _)| *k <= n)
                        .map(|(k, &t)| t * rows[n - k][j])
                        .sum()
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn velocity_of_constant_is_zero() {
        let frames = vec![vec![3.0, -1.0]; 16];
        let v = velocity(&frames);
        assert_eq!(v.len(), 16);
        for row in &v {
            for &x in row {
                assert!(x.abs() < 1e-12, "expected 0, got {x}");
            }
        }
    }

    #[test]
    fn velocity_of_unit_ramp_is_one() {
        // Rows increase by 1 per frame; away from the boundaries the
        // regression slope estimate is exactly 1.
        let frames: Vec<Vec<f64>> = (0..12).map(|t| vec![t as f64]).collect();
        let v = velocity(&frames);
        assert_eq!(v.len(), 12);
        for i in 4..=7 {
            assert!((v[i][0] - 1.0).abs() < 1e-12, "row {i}: {}", v[i][0]);
        }
    }

    #[test]
    fn top_padding_replicates_second_row() {
        // Only row 0 is nonzero. With row-1 padding, output row 1 sees the
        // spike once through the k=5 tap: -60/60 = -1. Row-0 padding would
        // pull the spike in through three more taps.
        let mut frames = vec![vec![0.0]; 6];
        frames[0][0] = 60.0;
        let v = velocity(&frames);
        assert!((v[1][0] + 1.0).abs() < 1e-12, "got {}", v[1][0]);
    }

    #[test]
    fn acceleration_of_ramp_is_zero_inside() {
        let frames: Vec<Vec<f64>> = (0..16).map(|t| vec![t as f64]).collect();
        let a = acceleration(&frames);
        assert_eq!(a.len(), 16);
        for i in 6..=9 {
            assert!(a[i][0].abs() < 1e-12, "row {i}: {}", a[i][0]);
        }
    }

    #[test]
    fn shapes_survive_small_inputs() {
        let one = vec![vec![1.0, 2.0]];
        assert_eq!(velocity(&one).len(), 1);
        assert_eq!(acceleration(&one).len(), 1);
        assert_eq!(velocity(&one)[0].len(), 2);
        assert!(velocity(&[]).is_empty());
        assert!(acceleration(&[]).is_empty());
    }
}
