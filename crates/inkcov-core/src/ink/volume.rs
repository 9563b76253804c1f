//! Coverage → milliliters.
//!
//! Both modes reduce coverage to inked-pixel equivalents and share one
//! conversion:
//!
//! ```text
//! drop devices:  ml = inked × drops_per_pixel × pl_per_drop / 1e9
//! toner devices: ml = inked / dpi² × 6.4516 × 0.0005
//! ```
//!
//! Aggregate mode takes `inked = pixels × mean / 100`. Pixel-level mode sums
//! `v / 100` over pixels at or above the minimum printable coverage, so it
//! never exceeds the aggregate estimate and matches it exactly when no pixel
//! falls below the threshold.

use serde::{Deserialize, Serialize};

use crate::color::cmyk::{Channel, CoverageMatrix};
use crate::ink::profile::PrinterProfile;

pub const PICOLITERS_PER_MILLILITER: f64 = 1_000_000_000.0;
pub const SQ_CM_PER_SQ_INCH: f64 = 6.4516;
/// Toner laid down per cm² at 100% coverage.
pub const TONER_ML_PER_SQ_CM: f64 = 0.0005;
/// Coverage (percent) below which a printer deposits nothing.
pub const MIN_PRINTABLE_COVERAGE: f64 = 1.0;

/// Volume estimation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeMode {
    /// Mean coverage × pixel count.
    Aggregate,
    /// Per-pixel sum with the minimum printable threshold.
    #[default]
    PixelLevel,
}

impl VolumeMode {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Aggregate => "aggregate",
            Self::PixelLevel => "pixel_level",
        }
    }

    /// Estimate the volume of one channel plane.
    pub fn estimate(&self, plane: &[f64], profile: &PrinterProfile) -> f64 {
        match self {
            Self::Aggregate => {
                if plane.is_empty() {
                    return 0.0;
                }
                let mean = plane.iter().sum::<f64>() / plane.len() as f64;
                aggregate_volume_ml(mean, plane.len(), profile)
            }
            Self::PixelLevel => pixel_volume_ml(plane, profile),
        }
    }

    /// Estimate all four channels, in CMYK order.
    pub fn estimate_channels(&self, coverage: &CoverageMatrix, profile: &PrinterProfile) -> [f64; 4] {
        Channel::ALL.map(|ch| self.estimate(coverage.channel(ch), profile))
    }
}

/// Volume from a mean coverage percentage over `total_pixels` pixels.
pub fn aggregate_volume_ml(coverage_percent: f64, total_pixels: usize, profile: &PrinterProfile) -> f64 {
    let inked = total_pixels as f64 * (coverage_percent / 100.0);
    inked_pixels_to_ml(inked, profile)
}

/// Volume from a full coverage plane, ignoring unprintably light pixels.
pub fn pixel_volume_ml(plane: &[f64], profile: &PrinterProfile) -> f64 {
    let inked: f64 = plane
        .iter()
        .filter(|v| **v >= MIN_PRINTABLE_COVERAGE)
        .map(|v| v / 100.0)
        .sum();
    inked_pixels_to_ml(inked, profile)
}

fn inked_pixels_to_ml(inked: f64, profile: &PrinterProfile) -> f64 {
    if profile.is_toner() {
        let dpi = profile.dpi.max(1) as f64;
        let sq_cm = inked / (dpi * dpi) * SQ_CM_PER_SQ_INCH;
        sq_cm * TONER_ML_PER_SQ_CM
    } else {
        let drops = inked * profile.drops_per_pixel;
        drops * profile.ink_per_drop_pl / PICOLITERS_PER_MILLILITER
    }
}
