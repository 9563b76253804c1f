//! Run-level summary across all analysed pages.
//!
//! Summaries are rebuilt from the page records on demand. Every field uses
//! an order-independent reduction, so pages analysed out of order or in
//! parallel summarise identically.

use serde::{Deserialize, Serialize};

use crate::analysis::page::{InkBlock, PageAnalysis};
use crate::color::cmyk::Channel;
use crate::compliance::ComplianceStatus;
use crate::cost::{CartridgeConfig, CostBlock};
use crate::error::{AnalysisError, Result};
use crate::stats::{self, ChannelStats};

/// TAC figures across pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TacSummary {
    /// Mean of the per-page TAC means.
    pub mean: f64,
    /// Highest per-pixel TAC on any page.
    pub max: f64,
    /// Percentiles of the per-page maximum TAC.
    pub max_p50: f64,
    pub max_p95: f64,
    pub max_p99: f64,
}

/// Pages per compliance band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceCounts {
    pub compliant: usize,
    pub caution: usize,
    pub exceeds: usize,
}

/// Pages over the fixed legacy thresholds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyCounts {
    pub pages_exceeding_280: usize,
    pub pages_exceeding_300: usize,
    pub pages_exceeding_320: usize,
}

/// Aggregate over all pages for a print run of `copies` copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub total_pages: usize,
    pub copies: u32,
    /// Mean and spread of the per-page channel means.
    pub channels: ChannelStats,
    pub tac: TacSummary,
    pub compliance: ComplianceCounts,
    pub legacy: LegacyCounts,
    /// Ink for the whole run (all pages × copies).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ink: Option<InkBlock>,
    /// Cartridge use and cost for the whole run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<CostBlock>,
}

/// Summarise `pages` for `copies` copies.
///
/// Fails with [`AnalysisError::NoResults`] for an empty page set and with
/// [`AnalysisError::InvalidParameter`] for zero copies.
pub fn summarize(
    pages: &[PageAnalysis],
    copies: u32,
    cartridges: Option<&CartridgeConfig>,
) -> Result<AnalysisSummary> {
    if pages.is_empty() {
        return Err(AnalysisError::NoResults);
    }
    if copies == 0 {
        return Err(AnalysisError::InvalidParameter("copies must be at least 1".to_string()));
    }

    let mut channels = ChannelStats::default();
    for channel in Channel::ALL {
        let means: Vec<f64> = pages.iter().map(|p| p.channel_mean(channel)).collect();
        channels.set(channel, stats::mean_std(&means));
    }

    let page_means: Vec<f64> = pages.iter().map(|p| p.tac.mean).collect();
    let mut page_maxima: Vec<f64> = pages.iter().map(|p| p.tac.max).collect();
    page_maxima.sort_unstable_by(f64::total_cmp);
    let tac = TacSummary {
        mean: stats::mean_std(&page_means).mean,
        max: page_maxima.last().copied().unwrap_or(0.0),
        max_p50: stats::percentile_sorted(&page_maxima, 50.0),
        max_p95: stats::percentile_sorted(&page_maxima, 95.0),
        max_p99: stats::percentile_sorted(&page_maxima, 99.0),
    };

    let mut compliance = ComplianceCounts::default();
    let mut legacy = LegacyCounts::default();
    for page in pages {
        match page.compliance.status {
            ComplianceStatus::Compliant => compliance.compliant += 1,
            ComplianceStatus::Caution => compliance.caution += 1,
            ComplianceStatus::Exceeds => compliance.exceeds += 1,
        }
        legacy.pages_exceeding_280 += page.legacy.exceeds_280 as usize;
        legacy.pages_exceeding_300 += page.legacy.exceeds_300 as usize;
        legacy.pages_exceeding_320 += page.legacy.exceeds_320 as usize;
    }

    let ink = summarize_ink(pages, copies);
    let cost = cartridges.map(|c| c.cost_for_pages(pages.len() as f64 * copies as f64));

    tracing::info!(
        "Summary: {} pages × {copies} copies, TAC max {:.2}%, {} exceeding",
        pages.len(),
        tac.max,
        compliance.exceeds
    );

    Ok(AnalysisSummary {
        total_pages: pages.len(),
        copies,
        channels,
        tac,
        compliance,
        legacy,
        ink,
        cost,
    })
}

fn summarize_ink(pages: &[PageAnalysis], copies: u32) -> Option<InkBlock> {
    let mut blocks = pages.iter().filter_map(|p| p.ink.as_ref()).peekable();
    let first = blocks.peek().copied()?;
    let (profile, mode) = (first.profile.clone(), first.mode);

    let mut totals = [0.0_f64; 4];
    for block in blocks {
        for (total, ml) in totals.iter_mut().zip(block.channels()) {
            *total += ml;
        }
    }
    let scaled = totals.map(|ml| ml * copies as f64);
    Some(InkBlock::from_channels(&profile, mode, scaled))
}
