//! Aggregate coverage statistics.
//!
//! Every statistic covers the full pixel population. Standard deviations are
//! population deviations and percentiles interpolate linearly between order
//! statistics:
//!
//! ```text
//! rank = p / 100 × (n − 1)
//! P(p) = x[⌊rank⌋] + (rank − ⌊rank⌋) × (x[⌊rank⌋ + 1] − x[⌊rank⌋])
//! ```

use serde::{Deserialize, Serialize};

use crate::color::cmyk::{Channel, CoverageMatrix};

/// Mean and population standard deviation of one series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MeanStd {
    pub mean: f64,
    pub std_dev: f64,
}

/// Per-channel statistics in CMYK order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelStats {
    pub cyan: MeanStd,
    pub magenta: MeanStd,
    pub yellow: MeanStd,
    pub black: MeanStd,
}

impl ChannelStats {
    pub fn get(&self, channel: Channel) -> MeanStd {
        match channel {
            Channel::Cyan => self.cyan,
            Channel::Magenta => self.magenta,
            Channel::Yellow => self.yellow,
            Channel::Black => self.black,
        }
    }

    pub(crate) fn set(&mut self, channel: Channel, value: MeanStd) {
        match channel {
            Channel::Cyan => self.cyan = value,
            Channel::Magenta => self.magenta = value,
            Channel::Yellow => self.yellow = value,
            Channel::Black => self.black = value,
        }
    }
}

/// Statistics of the per-pixel total area coverage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TacStats {
    pub mean: f64,
    pub max: f64,
    pub std_dev: f64,
    pub p50: f64,
    pub p95: f64,
    pub p99: f64,
}

/// Full statistics for one coverage matrix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverageStatistics {
    pub channels: ChannelStats,
    pub tac: TacStats,
}

/// Compute channel and TAC statistics. An empty matrix yields all zeros.
pub fn compute(coverage: &CoverageMatrix) -> CoverageStatistics {
    let mut channels = ChannelStats::default();
    for channel in Channel::ALL {
        channels.set(channel, mean_std(coverage.channel(channel)));
    }

    let mut tac_values = coverage.tac();
    let MeanStd { mean, std_dev } = mean_std(&tac_values);
    tac_values.sort_unstable_by(f64::total_cmp);

    let tac = TacStats {
        mean,
        max: tac_values.last().copied().unwrap_or(0.0),
        std_dev,
        p50: percentile_sorted(&tac_values, 50.0),
        p95: percentile_sorted(&tac_values, 95.0),
        p99: percentile_sorted(&tac_values, 99.0),
    };

    CoverageStatistics { channels, tac }
}

/// Two-pass mean and population standard deviation.
pub fn mean_std(values: &[f64]) -> MeanStd {
    if values.is_empty() {
        return MeanStd::default();
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    MeanStd {
        mean,
        std_dev: variance.max(0.0).sqrt(),
    }
}

/// Linear-interpolated percentile of an ascending slice. Returns 0 when empty.
pub fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        n => {
            let rank = (p.clamp(0.0, 100.0) / 100.0) * (n - 1) as f64;
            let lo = rank.floor() as usize;
            let hi = (lo + 1).min(n - 1);
            let frac = rank - lo as f64;
            sorted[lo] + frac * (sorted[hi] - sorted[lo])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn percentile(values: &[f64], p: f64) -> f64 {
        let mut sorted = values.to_vec();
        sorted.sort_unstable_by(f64::total_cmp);
        percentile_sorted(&sorted, p)
    }

    #[test]
    fn test_percentile_interpolates_linearly() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(percentile(&values, 0.0), 1.0);
        assert_eq!(percentile(&values, 100.0), 4.0);
        assert!((percentile(&values, 50.0) - 2.5).abs() < 1e-12);
        // rank = 0.95 × 3 = 2.85
        assert!((percentile(&values, 95.0) - 3.85).abs() < 1e-12);
    }

    #[test]
    fn test_percentile_ignores_input_order() {
        let values = [40.0, 10.0, 30.0, 20.0, 50.0];
        assert!((percentile(&values, 50.0) - 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_mean_std_population() {
        let ms = mean_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((ms.mean - 5.0).abs() < 1e-12);
        assert!((ms.std_dev - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_compute_on_split_matrix() {
        let mut m = CoverageMatrix::zeros(2, 2);
        m.set_pixel(0, [100.0, 100.0, 100.0, 100.0]);
        m.set_pixel(1, [50.0, 0.0, 0.0, 0.0]);
        let stats = compute(&m);

        assert!((stats.channels.cyan.mean - 37.5).abs() < 1e-12);
        assert!((stats.channels.black.mean - 25.0).abs() < 1e-12);
        assert_eq!(stats.tac.max, 400.0);
        assert!((stats.tac.mean - 112.5).abs() < 1e-12);
        // sorted TAC: 0, 0, 50, 400
        assert!((stats.tac.p50 - 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_compute_empty_matrix_is_zero() {
        let stats = compute(&CoverageMatrix::zeros(0, 0));
        assert_eq!(stats, CoverageStatistics::default());
    }
}
