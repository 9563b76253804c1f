use thiserror::Error;

/// Errors surfaced by the analysis pipeline.
///
/// Numeric degeneracies (pure-black pixels, empty CMY under removal) are
/// absorbed where they occur and never appear here.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("unknown printer profile: {0}")]
    UnknownPrinterProfile(String),
    #[error("unknown TAC reduction method: {0} (expected \"gcr\" or \"ucr\")")]
    UnknownReductionMethod(String),
    #[error("no results available, analyze at least one page first")]
    NoResults,
    #[error("raster buffer holds {len} pixels, expected {width}x{height}")]
    InvalidRaster { width: u32, height: u32, len: usize },
    #[error("invalid cartridge configuration: {0}")]
    InvalidCartridgeConfig(String),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
