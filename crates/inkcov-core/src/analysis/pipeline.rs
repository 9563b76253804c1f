//! Raster → page analysis.
//!
//! ```text
//! raster ─► convert ─► [dot gain] ─► statistics ─► classify ─┐
//!                          │                                 ├─► PageAnalysis
//!                          └────────► ink volume ─► cost ────┘
//! ```
//!
//! A `PagePipeline` holds only resolved, read-only configuration, so pages
//! can be analysed from several threads through a shared reference.

use crate::analysis::config::AnalyzerConfig;
use crate::analysis::page::{InkBlock, PageAnalysis};
use crate::color::cmyk::CoverageMatrix;
use crate::color::convert::ConversionMethod;
use crate::color::dot_gain;
use crate::compliance::{ComplianceStatus, IsoProcess, LegacyFlags};
use crate::cost::CartridgeConfig;
use crate::error::Result;
use crate::ink::profile::PrinterProfile;
use crate::ink::volume::VolumeMode;
use crate::raster::Raster;
use crate::stats;

/// Resolved configuration for analysing single pages.
#[derive(Debug, Clone)]
pub struct PagePipeline {
    conversion: ConversionMethod,
    process: IsoProcess,
    apply_dot_gain: bool,
    profile: Option<PrinterProfile>,
    volume_mode: VolumeMode,
    cartridges: Option<CartridgeConfig>,
}

impl PagePipeline {
    /// Resolve `config`. An unknown printer profile fails here, before any
    /// page is touched; an unknown process falls back to generic limits.
    pub fn new(config: &AnalyzerConfig) -> Result<Self> {
        let profile = config
            .printer_profile
            .as_deref()
            .map(PrinterProfile::by_name)
            .transpose()?;

        let conversion = match config.conversion {
            ConversionMethod::Advanced { gcr_fraction } => ConversionMethod::advanced(gcr_fraction),
            basic => basic,
        };

        Ok(Self {
            conversion,
            process: IsoProcess::resolve(&config.iso_process),
            apply_dot_gain: config.apply_dot_gain,
            profile,
            volume_mode: config.volume_mode,
            cartridges: None,
        })
    }

    /// Attach a validated cartridge table.
    pub fn with_cartridges(mut self, cartridges: CartridgeConfig) -> Result<Self> {
        cartridges.validate()?;
        self.cartridges = Some(cartridges);
        Ok(self)
    }

    pub fn conversion(&self) -> ConversionMethod {
        self.conversion
    }

    pub fn process(&self) -> IsoProcess {
        self.process
    }

    pub fn profile(&self) -> Option<&PrinterProfile> {
        self.profile.as_ref()
    }

    pub fn cartridges(&self) -> Option<&CartridgeConfig> {
        self.cartridges.as_ref()
    }

    /// Coverage as the statistics see it: converted, then dot gain if enabled.
    pub fn coverage(&self, raster: &Raster) -> CoverageMatrix {
        let mut coverage = self.conversion.convert(raster);
        if self.apply_dot_gain {
            dot_gain::apply(&mut coverage, self.process.dot_gain());
        }
        coverage
    }

    /// Analyse one page. `page` is the 1-based number recorded on the result.
    pub fn analyze(&self, raster: &Raster, page: usize) -> PageAnalysis {
        let coverage = self.coverage(raster);
        self.analyze_coverage(&coverage, page)
    }

    /// Analyse an already converted coverage matrix.
    pub fn analyze_coverage(&self, coverage: &CoverageMatrix, page: usize) -> PageAnalysis {
        let statistics = stats::compute(coverage);
        let compliance = self.process.classify(statistics.tac.max);

        let ink = self.profile.as_ref().map(|profile| {
            let ml = self.volume_mode.estimate_channels(coverage, profile);
            InkBlock::from_channels(profile.name, self.volume_mode, ml)
        });
        let cost = self.cartridges.as_ref().map(|c| c.cost_for_pages(1.0));

        tracing::debug!(
            "Page {page}: {}x{}, TAC max {:.2}%, {}",
            coverage.width,
            coverage.height,
            statistics.tac.max,
            compliance.status.label()
        );
        if compliance.status == ComplianceStatus::Exceeds {
            tracing::warn!(
                "Page {page} exceeds the {} TAC limit ({:.2}% > {:.0}%)",
                self.process,
                statistics.tac.max,
                compliance.limit
            );
        }

        PageAnalysis {
            page,
            width: coverage.width,
            height: coverage.height,
            channels: statistics.channels,
            tac: statistics.tac,
            legacy: LegacyFlags::from_max_tac(statistics.tac.max),
            compliance,
            conversion: self.conversion.tag().to_string(),
            dot_gain_applied: self.apply_dot_gain,
            ink,
            cost,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::cmyk::Channel;
    use crate::error::AnalysisError;

    #[test]
    fn test_unknown_profile_fails_construction() {
        let config = AnalyzerConfig {
            printer_profile: Some("plotter".to_string()),
            ..AnalyzerConfig::default()
        };
        assert!(matches!(
            PagePipeline::new(&config),
            Err(AnalysisError::UnknownPrinterProfile(_))
        ));
    }

    #[test]
    fn test_unknown_process_uses_generic_limits() {
        let config = AnalyzerConfig {
            iso_process: "flexo".to_string(),
            ..AnalyzerConfig::default()
        };
        let pipeline = PagePipeline::new(&config).unwrap();
        assert_eq!(pipeline.process(), IsoProcess::Generic);
    }

    #[test]
    fn test_dot_gain_raises_midtones() {
        let raster = Raster::filled(4, 4, [128, 128, 128]);
        let plain = PagePipeline::new(&AnalyzerConfig::default()).unwrap();
        let gained = PagePipeline::new(&AnalyzerConfig {
            apply_dot_gain: true,
            ..AnalyzerConfig::default()
        })
        .unwrap();

        let a = plain.analyze(&raster, 1);
        let b = gained.analyze(&raster, 1);
        assert!(b.channel_mean(Channel::Black) > a.channel_mean(Channel::Black));
        assert!(b.dot_gain_applied);
        assert!(!a.dot_gain_applied);
    }

    #[test]
    fn test_optional_blocks_follow_configuration() {
        let raster = Raster::filled(2, 2, [0, 0, 0]);
        let bare = PagePipeline::new(&AnalyzerConfig::default()).unwrap();
        let page = bare.analyze(&raster, 1);
        assert!(page.ink.is_none());
        assert!(page.cost.is_none());

        let config = AnalyzerConfig {
            printer_profile: Some("inkjet_office".to_string()),
            ..AnalyzerConfig::default()
        };
        let page = PagePipeline::new(&config).unwrap().analyze(&raster, 1);
        let ink = page.ink.expect("ink block");
        assert!(ink.black_ml > 0.0);
        assert_eq!(ink.cyan_ml, 0.0);
        assert_eq!(ink.profile, "inkjet_office");
    }

    #[test]
    fn test_advanced_fraction_is_clamped() {
        let config = AnalyzerConfig {
            conversion: ConversionMethod::Advanced { gcr_fraction: 3.0 },
            ..AnalyzerConfig::default()
        };
        let pipeline = PagePipeline::new(&config).unwrap();
        assert_eq!(pipeline.conversion(), ConversionMethod::Advanced { gcr_fraction: 1.0 });
    }
}
