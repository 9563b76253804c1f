//! Total area coverage reduction.
//!
//! Both methods cap per-pixel TAC at a target and leave every pixel that is
//! already at or below the target untouched.
//!
//! # Gray component replacement (GCR)
//! ```text
//! excess    = max(0, TAC − target)
//! reduction = min(min(C, M, Y), excess)
//! C, M, Y  −= reduction
//! K         = min(K + reduction, 100)
//! ```
//! If the gray component runs out before the excess is gone, the remainder is
//! taken from C, M and Y proportionally. K only grows; C, M and Y only shrink.
//!
//! # Under color removal (UCR)
//! ```text
//! excess = max(0, TAC − target)
//! C'     = max(0, C − C / (C + M + Y + ε) × excess)      (likewise M, Y)
//! ```
//! K is untouched, so a pixel whose black alone exceeds the target stays above
//! it once C, M and Y reach zero.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::color::cmyk::CoverageMatrix;
use crate::error::AnalysisError;

/// Guards the proportional split for pixels with no colored ink.
const EPSILON: f64 = 1e-10;

/// TAC reduction strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReductionMethod {
    /// Gray component replacement: move shared CMY into K.
    #[default]
    Gcr,
    /// Under color removal: remove CMY without adding K.
    Ucr,
}

impl ReductionMethod {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Gcr => "gcr",
            Self::Ucr => "ucr",
        }
    }

    /// Reduce one `[c, m, y, k]` pixel. Pixels at or below `target` are
    /// returned unchanged.
    pub fn reduce_pixel(&self, cmyk: [f64; 4], target: f64) -> [f64; 4] {
        let excess = cmyk.iter().sum::<f64>() - target;
        if excess <= 0.0 {
            return cmyk;
        }
        match self {
            Self::Gcr => gcr_pixel(cmyk, target, excess),
            Self::Ucr => remove_under_color(cmyk, excess),
        }
    }

    /// Reduce `coverage` in place and return the number of adjusted pixels.
    pub fn reduce_in_place(&self, coverage: &mut CoverageMatrix, target: f64) -> usize {
        let mut adjusted = 0;
        for idx in 0..coverage.len() {
            if coverage.tac_at(idx) <= target {
                continue;
            }
            let reduced = self.reduce_pixel(coverage.pixel(idx), target);
            coverage.set_pixel(idx, reduced);
            adjusted += 1;
        }
        adjusted
    }

    /// Return a reduced copy of `coverage`.
    pub fn reduce(&self, coverage: &CoverageMatrix, target: f64) -> CoverageMatrix {
        let mut out = coverage.clone();
        self.reduce_in_place(&mut out, target);
        out
    }
}

fn gcr_pixel(cmyk: [f64; 4], target: f64, excess: f64) -> [f64; 4] {
    let [c, m, y, k] = cmyk;
    let gray = c.min(m).min(y);
    let reduction = gray.min(excess);
    let out = [
        c - reduction,
        m - reduction,
        y - reduction,
        (k + reduction).min(100.0),
    ];

    let remaining = out.iter().sum::<f64>() - target;
    if remaining > 0.0 {
        remove_under_color(out, remaining)
    } else {
        out
    }
}

fn remove_under_color(cmyk: [f64; 4], excess: f64) -> [f64; 4] {
    let [c, m, y, k] = cmyk;
    let cmy_sum = c + m + y + EPSILON;
    let take = |v: f64| (v - v / cmy_sum * excess).max(0.0);
    [take(c), take(m), take(y), k]
}

impl FromStr for ReductionMethod {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match key.as_str() {
            "gcr" | "gray_component_replacement" => Ok(Self::Gcr),
            "ucr" | "under_color_removal" => Ok(Self::Ucr),
            _ => Err(AnalysisError::UnknownReductionMethod(s.to_string())),
        }
    }
}

impl fmt::Display for ReductionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-6;

    fn rich_black() -> CoverageMatrix {
        CoverageMatrix::uniform(10, 10, [80.0, 75.0, 70.0, 60.0])
    }

    fn sample_pixels() -> Vec<[f64; 4]> {
        let mut out = Vec::new();
        for c in [0.0, 20.0, 55.0, 90.0, 100.0] {
            for m in [0.0, 35.0, 80.0, 100.0] {
                for y in [5.0, 60.0, 100.0] {
                    for k in [0.0, 40.0, 95.0, 100.0] {
                        out.push([c, m, y, k]);
                    }
                }
            }
        }
        out
    }

    #[test]
    fn test_gcr_rich_black() {
        let out = ReductionMethod::Gcr.reduce(&rich_black(), 280.0);
        let px = out.pixel(0);
        assert!(out.tac_at(0) <= 280.0 + TOL);
        assert!(px[0] < 80.0, "cyan should drop");
        assert!(px[3] > 60.0, "black should grow");
    }

    #[test]
    fn test_ucr_rich_black() {
        let out = ReductionMethod::Ucr.reduce(&rich_black(), 280.0);
        let px = out.pixel(0);
        assert!(out.tac_at(0) <= 280.0 + TOL);
        assert!(px[0] < 80.0);
        assert_eq!(px[3], 60.0, "UCR never touches black");
    }

    #[test]
    fn test_below_target_is_bit_identical() {
        let low = CoverageMatrix::uniform(10, 10, [20.0, 20.0, 20.0, 20.0]);
        for method in [ReductionMethod::Gcr, ReductionMethod::Ucr] {
            let mut m = low.clone();
            assert_eq!(method.reduce_in_place(&mut m, 280.0), 0);
            assert_eq!(m, low);
        }
    }

    #[test]
    fn test_mixed_matrix_only_touches_pixels_over_target() {
        let mut m = CoverageMatrix::zeros(2, 1);
        m.set_pixel(0, [10.0, 33.3, 0.7, 5.0]);
        m.set_pixel(1, [100.0, 100.0, 100.0, 100.0]);
        for method in [ReductionMethod::Gcr, ReductionMethod::Ucr] {
            let out = method.reduce(&m, 300.0);
            assert_eq!(out.pixel(0), m.pixel(0));
            assert!(out.tac_at(1) <= 300.0 + TOL, "{method}: {}", out.tac_at(1));
        }
    }

    #[test]
    fn test_both_methods_cap_tac() {
        for method in [ReductionMethod::Gcr, ReductionMethod::Ucr] {
            for px in sample_pixels() {
                let tac: f64 = px.iter().sum();
                let out = method.reduce_pixel(px, 280.0);
                let out_tac: f64 = out.iter().sum();
                if tac <= 280.0 {
                    assert_eq!(out, px);
                } else {
                    assert!(out_tac <= 280.0 + TOL, "{method} {px:?} -> {out:?}");
                }
                assert!(out.iter().all(|v| (0.0..=100.0).contains(v)));
            }
        }
    }

    #[test]
    fn test_gcr_moves_ink_into_black_only() {
        for px in sample_pixels() {
            let out = ReductionMethod::Gcr.reduce_pixel(px, 260.0);
            assert!(out[3] >= px[3]);
            for c in 0..3 {
                assert!(out[c] <= px[c]);
            }
        }
    }

    #[test]
    fn test_gcr_with_exhausted_gray_component() {
        // gray = 10 cannot cover an excess of 30 on its own.
        let out = ReductionMethod::Gcr.reduce_pixel([100.0, 100.0, 10.0, 100.0], 280.0);
        assert!(out.iter().sum::<f64>() <= 280.0 + TOL);
        assert_eq!(out[3], 100.0);
        assert_eq!(out[2], 0.0);
    }

    #[test]
    fn test_ucr_cannot_reach_target_below_black() {
        let out = ReductionMethod::Ucr.reduce_pixel([10.0, 0.0, 0.0, 80.0], 50.0);
        assert_eq!(out, [0.0, 0.0, 0.0, 80.0]);
    }

    #[test]
    fn test_ucr_handles_pixel_without_color() {
        let out = ReductionMethod::Ucr.reduce_pixel([0.0, 0.0, 0.0, 100.0], 90.0);
        assert_eq!(out, [0.0, 0.0, 0.0, 100.0]);
    }

    #[test]
    fn test_method_names() {
        assert_eq!("gcr".parse::<ReductionMethod>().unwrap(), ReductionMethod::Gcr);
        assert_eq!("UCR".parse::<ReductionMethod>().unwrap(), ReductionMethod::Ucr);
        assert_eq!(
            "gray-component-replacement".parse::<ReductionMethod>().unwrap(),
            ReductionMethod::Gcr
        );
        let err = "auto".parse::<ReductionMethod>().unwrap_err();
        assert!(matches!(err, AnalysisError::UnknownReductionMethod(ref m) if m == "auto"));
    }
}
