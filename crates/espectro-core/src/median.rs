//! Median filtering for impulse-noise suppression.
//!
//! Both filters use the zero-padded edge convention: samples outside the
//! signal count as zeros inside the kernel window. Kernel lengths must be
//! odd so the window is centered.

/// 1-D median filter with an odd kernel length.
///
/// Returns the input unchanged for `kernel <= 1`.
pub fn medfilt(x: &[f64], kernel: usize) -> Vec<f64> {
    if kernel <= 1 {
        return x.to_vec();
    }
    debug_assert!(kernel % 2 == 1, "median kernel must be odd");

    let half = kernel / 2;
    let mut window = Vec::with_capacity(kernel);
    (0..x.len())
        .map(|i| {
            window.clear();
            for k in 0..kernel {
                let idx = i as isize + k as isize - half as isize;
                if idx >= 0 && (idx as usize) < x.len() {
                    window.push(x[idx as usize]);
                } else {
                    window.push(0.0);
                }
            }
            median_of(&mut window)
        })
        .collect()
}

/// 2-D median filter over a row-major matrix with an odd `(rows, cols)`
/// kernel.
pub fn medfilt2(x: &[Vec<f64>], kernel: (usize, usize)) -> Vec<Vec<f64>> {
    let (kr, kc) = kernel;
    if kr <= 1 && kc <= 1 {
        return x.to_vec();
    }
    debug_assert!(kr % 2 == 1 && kc % 2 == 1, "median kernel must be odd");

    let nrows = x.len();
    let ncols = if nrows > 0 { x[0].len() } else { 0 };
    let (hr, hc) = (kr as isize / 2, kc as isize / 2);

    let mut window = Vec::with_capacity(kr * kc);
    (0..nrows)
        .map(|i| {
            (0..ncols)
                .map(|j| {
                    window.clear();
                    for di in -hr..=hr {
                        for dj in -hc..=hc {
                            let r = i as isize + di;
                            let c = j as isize + dj;
                            if r >= 0
                                && (r as usize) < nrows
                                && c >= 0
                                && (c as usize) < ncols
                            {
                                window.push(x[r as usize][c as usize]);
                            } else {
                                window.push(0.0);
                            }
                        }
                    }
                    median_of(&mut window)
                })
                .collect()
        })
        .collect()
}

/// Median of a scratch buffer (sorted in place).
fn median_of(window: &mut [f64]) -> f64 {
    window.sort_by(f64::total_cmp);
    window[window.len() / 2]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn medfilt_hand_computed() {
        // Zero padding at the edges: [0,1,2] -> 1, [1,2,3] -> 2, [2,3,0] -> 2
        let out = medfilt(&[1.0, 2.0, 3.0], 3);
        assert_eq!(out, vec![1.0, 2.0, 2.0]);
    }

    #[test]
    fn medfilt_removes_impulse() {
        let mut x = vec![1.0; 21];
        x[10] = 100.0;
        let out = medfilt(&x, 3);
        assert!((out[10] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn medfilt_kernel_one_is_identity() {
        let x = vec![3.0, 1.0, 4.0, 1.0, 5.0];
        assert_eq!(medfilt(&x, 1), x);
    }

    #[test]
    fn medfilt2_removes_isolated_spike() {
        let mut m = vec![vec![2.0; 7]; 7];
        m[3][3] = 50.0;
        let out = medfilt2(&m, (3, 3));
        assert!((out[3][3] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn medfilt2_zero_pads_corners() {
        // At a corner of a constant matrix, a 3x3 window sees 5 zeros and
        // 4 ones, so the median is 0.
        let m = vec![vec![1.0; 4]; 4];
        let out = medfilt2(&m, (3, 3));
        assert_eq!(out[0][0], 0.0);
        assert_eq!(out[1][1], 1.0);
    }

    #[test]
    fn medfilt2_shape_preserved() {
        let m = vec![vec![1.0; 5]; 9];
        let out = medfilt2(&m, (3, 5));
        assert_eq!(out.len(), 9);
        assert_eq!(out[0].len(), 5);
    }
}
