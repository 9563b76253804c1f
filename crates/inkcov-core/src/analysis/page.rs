//! Per-page analysis record.

use serde::{Deserialize, Serialize};

use crate::color::cmyk::Channel;
use crate::compliance::{ComplianceVerdict, LegacyFlags};
use crate::cost::CostBlock;
use crate::ink::volume::VolumeMode;
use crate::stats::{ChannelStats, TacStats};

/// Estimated ink volume per channel, in milliliters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InkBlock {
    /// Printer profile the estimate was made for.
    pub profile: String,
    pub mode: VolumeMode,
    pub cyan_ml: f64,
    pub magenta_ml: f64,
    pub yellow_ml: f64,
    pub black_ml: f64,
    pub total_ml: f64,
}

impl InkBlock {
    /// Build from CMYK-ordered volumes.
    pub fn from_channels(profile: &str, mode: VolumeMode, ml: [f64; 4]) -> Self {
        Self {
            profile: profile.to_string(),
            mode,
            cyan_ml: ml[0],
            magenta_ml: ml[1],
            yellow_ml: ml[2],
            black_ml: ml[3],
            total_ml: ml.iter().sum(),
        }
    }

    pub fn get(&self, channel: Channel) -> f64 {
        match channel {
            Channel::Cyan => self.cyan_ml,
            Channel::Magenta => self.magenta_ml,
            Channel::Yellow => self.yellow_ml,
            Channel::Black => self.black_ml,
        }
    }

    /// Volumes in CMYK order.
    pub fn channels(&self) -> [f64; 4] {
        Channel::ALL.map(|ch| self.get(ch))
    }
}

/// Analysis of one rendered page. Optional blocks are absent, not zero,
/// when the matching configuration was not supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageAnalysis {
    /// 1-based page number in submission order.
    pub page: usize,
    pub width: u32,
    pub height: u32,
    pub channels: ChannelStats,
    pub tac: TacStats,
    #[serde(flatten)]
    pub legacy: LegacyFlags,
    pub compliance: ComplianceVerdict,
    /// Tag of the conversion method that produced the coverage.
    pub conversion: String,
    pub dot_gain_applied: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ink: Option<InkBlock>,
    /// Cost of printing this page once.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<CostBlock>,
}

impl PageAnalysis {
    /// Mean coverage of one channel, in percent.
    pub fn channel_mean(&self, channel: Channel) -> f64 {
        self.channels.get(channel).mean
    }
}
