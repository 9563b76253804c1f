//! Analysis session: ordered page results plus on-demand summaries.

use serde::Serialize;

use crate::analysis::config::AnalyzerConfig;
use crate::analysis::page::PageAnalysis;
use crate::analysis::pipeline::PagePipeline;
use crate::analysis::summary::{self, AnalysisSummary};
use crate::color::convert::{self, ConversionMethod};
use crate::cost::CartridgeConfig;
use crate::error::{AnalysisError, Result};
use crate::raster::Raster;
use crate::reduction::ReductionMethod;

/// Result of reducing TAC on one page raster.
#[derive(Debug, Clone)]
pub struct ReductionOutcome {
    /// Reduced coverage converted back to RGB.
    pub raster: Raster,
    pub method: ReductionMethod,
    pub target: f64,
    /// Pixels whose TAC was above `target`.
    pub pixels_adjusted: usize,
    pub tac_max_before: f64,
    /// Highest TAC of the reduced coverage, before RGB re-encoding.
    pub tac_max_after: f64,
}

/// One analysis run over a document's pages.
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: AnalyzerConfig,
    pipeline: PagePipeline,
    pages: Vec<PageAnalysis>,
}

#[derive(Serialize)]
struct ExportDocument<'a> {
    dpi: u32,
    conversion: ConversionMethod,
    iso_process: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    printer_profile: Option<&'a str>,
    pages: &'a [PageAnalysis],
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<AnalysisSummary>,
}

impl Analyzer {
    /// Start a session. Configuration errors surface here.
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        let pipeline = PagePipeline::new(&config)?;
        tracing::info!(
            "Analyzer ready: conversion={}, process={}, profile={}",
            pipeline.conversion().tag(),
            pipeline.process(),
            pipeline.profile().map_or("none", |p| p.name)
        );
        Ok(Self {
            config,
            pipeline,
            pages: Vec::new(),
        })
    }

    /// Enable cost estimation. The cartridge table is fixed for the whole run,
    /// so it must be attached before the first page is analysed.
    pub fn with_cartridges(mut self, cartridges: CartridgeConfig) -> Result<Self> {
        if !self.pages.is_empty() {
            return Err(AnalysisError::InvalidParameter(format!(
                "cartridge configuration must be set before analysis ({} pages already analysed)",
                self.pages.len()
            )));
        }
        self.pipeline = self.pipeline.with_cartridges(cartridges)?;
        Ok(self)
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn pipeline(&self) -> &PagePipeline {
        &self.pipeline
    }

    /// Analyse the next page and keep its result.
    pub fn analyze_page(&mut self, raster: &Raster) -> &PageAnalysis {
        let page = self.pipeline.analyze(raster, self.pages.len() + 1);
        self.pages.push(page);
        &self.pages[self.pages.len() - 1]
    }

    /// Analyse several pages in order and return the new results.
    pub fn analyze_pages<'a, I>(&mut self, rasters: I) -> &[PageAnalysis]
    where
        I: IntoIterator<Item = &'a Raster>,
    {
        let start = self.pages.len();
        for raster in rasters {
            self.analyze_page(raster);
        }
        &self.pages[start..]
    }

    /// Page results in submission order.
    pub fn pages(&self) -> &[PageAnalysis] {
        &self.pages
    }

    /// Drop all page results, keeping the configuration.
    pub fn clear(&mut self) {
        self.pages.clear();
    }

    /// Summary for a run of `copies` copies.
    pub fn summary(&self, copies: u32) -> Result<AnalysisSummary> {
        summary::summarize(&self.pages, copies, self.pipeline.cartridges())
    }

    /// Pretty JSON document with page results and, optionally, the summary.
    pub fn export_json(&self, copies: u32, include_summary: bool) -> Result<String> {
        if self.pages.is_empty() {
            return Err(AnalysisError::NoResults);
        }
        let summary = if include_summary {
            Some(self.summary(copies)?)
        } else {
            None
        };
        let document = ExportDocument {
            dpi: self.config.dpi,
            conversion: self.pipeline.conversion(),
            iso_process: self.pipeline.process().name(),
            printer_profile: self.pipeline.profile().map(|p| p.name),
            pages: &self.pages,
            summary,
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }

    /// Cap TAC on `raster` at `target` using the named method and return the
    /// re-rendered raster. The method name is checked before any work.
    pub fn reduce_tac(&self, raster: &Raster, target: f64, method: &str) -> Result<ReductionOutcome> {
        let method: ReductionMethod = method.parse()?;
        if !target.is_finite() || target < 0.0 {
            return Err(AnalysisError::InvalidParameter(format!(
                "TAC target must be a non-negative percentage, got {target}"
            )));
        }

        let mut coverage = self.pipeline.conversion().convert(raster);
        let tac_max_before = coverage.max_tac();
        let pixels_adjusted = method.reduce_in_place(&mut coverage, target);
        let tac_max_after = coverage.max_tac();

        if pixels_adjusted > 0 {
            tracing::info!(
                "TAC reduction ({method}) to {target}%: {pixels_adjusted} pixels adjusted, max {tac_max_before:.2}% -> {tac_max_after:.2}%"
            );
        }

        Ok(ReductionOutcome {
            raster: convert::coverage_to_raster(&coverage),
            method,
            target,
            pixels_adjusted,
            tac_max_before,
            tac_max_after,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_are_numbered_in_order() {
        let mut analyzer = Analyzer::new(AnalyzerConfig::default()).unwrap();
        let rasters = [Raster::filled(2, 2, [255, 255, 255]), Raster::filled(2, 2, [0, 0, 0])];
        let added = analyzer.analyze_pages(&rasters);
        assert_eq!(added.len(), 2);
        assert_eq!(added[1].page, 2);
        analyzer.analyze_page(&rasters[0]);
        assert_eq!(analyzer.pages()[2].page, 3);
    }

    #[test]
    fn test_summary_and_export_need_results() {
        let analyzer = Analyzer::new(AnalyzerConfig::default()).unwrap();
        assert!(matches!(analyzer.summary(1), Err(AnalysisError::NoResults)));
        assert!(matches!(analyzer.export_json(1, true), Err(AnalysisError::NoResults)));
    }

    #[test]
    fn test_clear_resets_numbering() {
        let mut analyzer = Analyzer::new(AnalyzerConfig::default()).unwrap();
        analyzer.analyze_page(&Raster::filled(1, 1, [0, 0, 0]));
        analyzer.clear();
        assert!(analyzer.pages().is_empty());
        assert_eq!(analyzer.analyze_page(&Raster::filled(1, 1, [0, 0, 0])).page, 1);
    }

    #[test]
    fn test_reduce_rejects_unknown_method_and_bad_target() {
        let analyzer = Analyzer::new(AnalyzerConfig::default()).unwrap();
        let raster = Raster::filled(1, 1, [0, 0, 0]);
        assert!(matches!(
            analyzer.reduce_tac(&raster, 280.0, "blackout"),
            Err(AnalysisError::UnknownReductionMethod(_))
        ));
        assert!(matches!(
            analyzer.reduce_tac(&raster, f64::NAN, "gcr"),
            Err(AnalysisError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_cartridges_rejected_after_first_page() {
        use crate::cost::CartridgeSpec;

        let spec = CartridgeSpec::new(200.0, 25.0);
        let cartridges = CartridgeConfig {
            cyan: spec.clone(),
            magenta: spec.clone(),
            yellow: spec.clone(),
            black: spec,
        };
        let mut analyzer = Analyzer::new(AnalyzerConfig::default()).unwrap();
        analyzer.analyze_page(&Raster::filled(2, 2, [0, 0, 0]));
        assert!(matches!(
            analyzer.clone().with_cartridges(cartridges.clone()),
            Err(AnalysisError::InvalidParameter(_))
        ));

        analyzer.clear();
        let mut analyzer = analyzer.with_cartridges(cartridges).unwrap();
        analyzer.analyze_page(&Raster::filled(2, 2, [0, 0, 0]));
        assert!(analyzer.pages()[0].cost.is_some());
        assert!(analyzer.summary(1).unwrap().cost.is_some());
    }

    #[test]
    fn test_export_json_shape() {
        let mut analyzer = Analyzer::new(AnalyzerConfig::default()).unwrap();
        analyzer.analyze_page(&Raster::filled(2, 2, [255, 0, 0]));

        let with: serde_json::Value =
            serde_json::from_str(&analyzer.export_json(10, true).unwrap()).unwrap();
        assert_eq!(with["dpi"], 150);
        assert_eq!(with["iso_process"], "heatset_web");
        assert_eq!(with["pages"][0]["page"], 1);
        assert_eq!(with["pages"][0]["exceeds_280"], false);
        assert_eq!(with["summary"]["copies"], 10);
        assert!(with.get("printer_profile").is_none());

        let without: serde_json::Value =
            serde_json::from_str(&analyzer.export_json(10, false).unwrap()).unwrap();
        assert!(without.get("summary").is_none());
    }
}
