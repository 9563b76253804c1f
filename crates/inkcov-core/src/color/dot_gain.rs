//! Dot gain simulation.
//!
//! Printed dots spread beyond their nominal size, and mid-to-dark tones
//! spread the most. Coverage is inflated with a process-specific factor:
//!
//! ```text
//! v' = clamp(v × (1 + g × v / 100), 0, 100)
//! ```
//!
//! Apply at most once per pipeline pass.

use crate::color::cmyk::{Channel, CoverageMatrix};

/// Inflate a single coverage value by dot-gain factor `gain`.
pub fn apply_to_value(value: f64, gain: f64) -> f64 {
    (value * (1.0 + gain * (value / 100.0))).clamp(0.0, 100.0)
}

/// Apply dot gain to every channel of `coverage` in place.
///
/// `gain = 0.0` produces no change.
pub fn apply(coverage: &mut CoverageMatrix, gain: f64) {
    if gain.abs() < 1e-12 {
        return;
    }
    for channel in Channel::ALL {
        for v in coverage.channel_mut(channel) {
            *v = apply_to_value(*v, gain);
        }
    }
}
