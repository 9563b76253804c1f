//! Inkcov Core — colorimetric analysis for print cost estimation.
//!
//! This crate turns rendered page rasters into CMYK coverage, measures
//! total area coverage (TAC) against print-process limits, optionally
//! reduces TAC, and estimates ink volume and cartridge cost. Rendering
//! documents and writing result files are left to the caller.

pub mod analysis;
pub mod color;
pub mod compliance;
pub mod cost;
pub mod error;
pub mod ink;
pub mod raster;
pub mod reduction;
pub mod report;
pub mod stats;

// Re-exports for convenience.
pub use analysis::analyzer::{Analyzer, ReductionOutcome};
pub use analysis::config::AnalyzerConfig;
pub use analysis::page::{InkBlock, PageAnalysis};
pub use analysis::pipeline::PagePipeline;
pub use analysis::summary::AnalysisSummary;
pub use color::cmyk::{Channel, CoverageMatrix};
pub use color::convert::ConversionMethod;
pub use compliance::{ComplianceStatus, ComplianceVerdict, IsoProcess};
pub use cost::{CartridgeConfig, CartridgeSpec, CostBlock};
pub use error::{AnalysisError, Result};
pub use ink::profile::PrinterProfile;
pub use ink::volume::VolumeMode;
pub use raster::Raster;
pub use reduction::ReductionMethod;
