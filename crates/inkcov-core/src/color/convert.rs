//! RGB ↔ CMYK conversion.
//!
//! Two forward transforms are provided:
//!
//! ```text
//! basic:    K = 1 − max(R, G, B)
//!           C = (1 − R − K) / max(1 − K, ε)      (likewise M, Y)
//!
//! advanced: R' = R^2.2                            (likewise G', B')
//!           K_max  = 1 − max(R, G, B)
//!           K_gray = min(1 − R', 1 − G', 1 − B')
//!           K = (1 − gcr) · K_max + gcr · K_gray
//!           C = (1 − R' − K) / max(1 − K, ε)     (likewise M, Y)
//! ```
//!
//! The inverse is the naive `R = (1 − C)(1 − K)` model. It is exact for the
//! basic transform and lossy for the advanced one.

use serde::{Deserialize, Serialize};

use crate::color::cmyk::CoverageMatrix;
use crate::raster::Raster;

/// Divisor floor for pure-black pixels where `1 − K` reaches zero.
const EPSILON: f64 = 1e-10;

/// Gamma applied to normalized RGB by the advanced transform.
const GAMMA: f64 = 2.2;

/// Forward conversion strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum ConversionMethod {
    /// Max-based black generation on the raw RGB values.
    Basic,
    /// Gamma-corrected conversion with gray-component replacement.
    Advanced {
        /// Blend between max-based K (0.0) and gray-component K (1.0).
        gcr_fraction: f64,
    },
}

impl Default for ConversionMethod {
    fn default() -> Self {
        Self::Basic
    }
}

impl ConversionMethod {
    /// Advanced conversion with the GCR fraction clamped to `[0, 1]`.
    pub fn advanced(gcr_fraction: f64) -> Self {
        Self::Advanced {
            gcr_fraction: clamp_fraction(gcr_fraction),
        }
    }

    /// Short tag recorded on every page analysis.
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Advanced { .. } => "advanced_gcr",
        }
    }

    /// Convert a single pixel to `[c, m, y, k]` percentages.
    pub fn convert_pixel(&self, rgb: [u8; 3]) -> [f64; 4] {
        match *self {
            Self::Basic => rgb_to_cmyk_basic(rgb),
            Self::Advanced { gcr_fraction } => rgb_to_cmyk_advanced(rgb, gcr_fraction),
        }
    }

    /// Convert a whole raster into a coverage matrix.
    ///
    /// The matrix always has `width × height` pixels; surplus raster pixels
    /// are ignored and missing ones stay at zero coverage.
    pub fn convert(&self, raster: &Raster) -> CoverageMatrix {
        let mut coverage = CoverageMatrix::zeros(raster.width, raster.height);
        let CoverageMatrix { cyan, magenta, yellow, black, .. } = &mut coverage;
        let planes = cyan
            .iter_mut()
            .zip(magenta.iter_mut())
            .zip(yellow.iter_mut())
            .zip(black.iter_mut());
        for ((((c, m), y), k), px) in planes.zip(&raster.pixels) {
            let cmyk = self.convert_pixel(*px);
            *c = cmyk[0];
            *m = cmyk[1];
            *y = cmyk[2];
            *k = cmyk[3];
        }
        coverage
    }
}

/// Clamp a GCR fraction to `[0, 1]`; NaN maps to 0.
fn clamp_fraction(fraction: f64) -> f64 {
    if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    }
}

fn normalize(rgb: [u8; 3]) -> [f64; 3] {
    [
        rgb[0] as f64 / 255.0,
        rgb[1] as f64 / 255.0,
        rgb[2] as f64 / 255.0,
    ]
}

/// Derive C, M, Y against a fixed K and scale everything to percent.
fn cmy_against_k(rgb: [f64; 3], k: f64) -> [f64; 4] {
    let divisor = (1.0 - k).max(EPSILON);
    let cmy = |v: f64| ((1.0 - v - k) / divisor).clamp(0.0, 1.0) * 100.0;
    [cmy(rgb[0]), cmy(rgb[1]), cmy(rgb[2]), (k * 100.0).clamp(0.0, 100.0)]
}

/// Basic max-based RGB → CMYK.
pub fn rgb_to_cmyk_basic(rgb: [u8; 3]) -> [f64; 4] {
    let rgb = normalize(rgb);
    let k = 1.0 - rgb[0].max(rgb[1]).max(rgb[2]);
    cmy_against_k(rgb, k)
}

/// Gamma-corrected RGB → CMYK with gray-component replacement.
///
/// `gcr_fraction` is clamped to `[0, 1]`; NaN counts as 0.
pub fn rgb_to_cmyk_advanced(rgb: [u8; 3], gcr_fraction: f64) -> [f64; 4] {
    let gcr = clamp_fraction(gcr_fraction);
    let raw = normalize(rgb);
    let lin = raw.map(|v| v.powf(GAMMA));

    let k_max = 1.0 - raw[0].max(raw[1]).max(raw[2]);
    let k_gray = (1.0 - lin[0]).min(1.0 - lin[1]).min(1.0 - lin[2]);
    let k = (1.0 - gcr) * k_max + gcr * k_gray;

    cmy_against_k(lin, k)
}

/// Naive CMYK → RGB used to re-render adjusted coverage.
pub fn cmyk_to_rgb(cmyk: [f64; 4]) -> [u8; 3] {
    let [c, m, y, k] = cmyk.map(|v| (v / 100.0).clamp(0.0, 1.0));
    let channel = |v: f64| ((1.0 - v) * (1.0 - k) * 255.0).round().clamp(0.0, 255.0) as u8;
    [channel(c), channel(m), channel(y)]
}

/// Convert a coverage matrix back into an RGB raster.
pub fn coverage_to_raster(coverage: &CoverageMatrix) -> Raster {
    let pixels = (0..coverage.len())
        .map(|idx| cmyk_to_rgb(coverage.pixel(idx)))
        .collect();
    Raster {
        width: coverage.width,
        height: coverage.height,
        pixels,
    }
}
