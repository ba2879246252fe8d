//! Perceptual frequency scale conversions.
//!
//! Closed-form mappings between Hertz and the mel, Bark, and ERB scales,
//! plus a [`Scale`] enum that dispatches over the fixed set of scales used
//! for filterbank warping.
//!
//! # Example
//!
//! ```rust
//! use espectro_core::scale::Scale;
//!
//! let warped = Scale::Mel.from_hertz(1000.0);
//! let back = Scale::Mel.to_hertz(warped);
//! assert!((back - 1000.0).abs() < 1e-9);
//! ```

/// Perceptual frequency scale for filterbank warping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Scale {
    /// No warping; identity in both directions.
    Hertz,
    /// Mel scale (O'Shaughnessy 1987): `m = 2595 log10(1 + f/700)`.
    Mel,
    /// Bark scale (Traunmueller 1990 form): `z = 6 asinh(f/600)`.
    Bark,
    /// Equivalent rectangular bandwidth rate scale.
    Erb,
}

impl Scale {
    /// Convert a frequency in Hertz to this scale.
    pub fn from_hertz(self, f: f64) -> f64 {
        match self {
            Scale::Hertz => f,
            Scale::Mel => hertz_to_mel(f),
            Scale::Bark => hertz_to_bark(f),
            Scale::Erb => hertz_to_erb(f),
        }
    }

    /// Convert a value on this scale back to Hertz.
    pub fn to_hertz(self, v: f64) -> f64 {
        match self {
            Scale::Hertz => v,
            Scale::Mel => mel_to_hertz(v),
            Scale::Bark => bark_to_hertz(v),
            Scale::Erb => erb_to_hertz(v),
        }
    }
}

/// Convert frequency in Hertz to mel.
///
/// `m = 2595 log10(1 + f/700)` (O'Shaughnessy, "Speech communication:
/// human and machine", 1987).
pub fn hertz_to_mel(f: f64) -> f64 {
    2595.0 * (1.0 + f / 700.0).log10()
}

/// Convert frequency in mel to Hertz. Inverse of [`hertz_to_mel`].
pub fn mel_to_hertz(m: f64) -> f64 {
    700.0 * (10.0_f64.powf(m / 2595.0) - 1.0)
}

/// Convert frequency in Hertz to Bark.
///
/// `z = 6 asinh(f/600)` (Traunmueller, JASA 88(1), 1990).
pub fn hertz_to_bark(f: f64) -> f64 {
    6.0 * (f / 600.0).asinh()
}

/// Convert frequency in Bark to Hertz. Inverse of [`hertz_to_bark`].
pub fn bark_to_hertz(z: f64) -> f64 {
    600.0 * (z / 6.0).sinh()
}

/// Convert frequency in Hertz to the ERB rate scale.
pub fn hertz_to_erb(f: f64) -> f64 {
    let g = f.abs();
    11.17268 * sign(f) * (1.0 + 46.06538 * g / (g + 14678.49)).ln()
}

/// Convert frequency on the ERB rate scale to Hertz. Inverse of
/// [`hertz_to_erb`].
pub fn erb_to_hertz(e: f64) -> f64 {
    sign(e) * (676170.4 / (47.06538 - (0.08959494 * e.abs()).exp()) - 14678.49)
}

/// Sign with `sign(0) = 0`, matching the mathematical convention the ERB
/// formulas assume (`f64::signum` maps 0 to 1).
fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}
