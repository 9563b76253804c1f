//! Analyzer configuration.

use serde::{Deserialize, Serialize};

use crate::color::convert::ConversionMethod;
use crate::error::Result;
use crate::ink::volume::VolumeMode;

/// Everything an analysis session needs besides the cartridge table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Resolution the pages were rendered at. Recorded in exports only; the
    /// pipeline never resamples.
    pub dpi: u32,
    /// RGB → CMYK strategy.
    pub conversion: ConversionMethod,
    /// Print process name used for compliance and dot gain.
    pub iso_process: String,
    /// Inflate coverage with the process dot-gain factor before statistics.
    pub apply_dot_gain: bool,
    /// Printer profile name. `None` skips ink estimation.
    pub printer_profile: Option<String>,
    /// Ink estimation strategy.
    pub volume_mode: VolumeMode,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            dpi: 150,
            conversion: ConversionMethod::Basic,
            iso_process: "heatset_web".to_string(),
            apply_dot_gain: false,
            printer_profile: None,
            volume_mode: VolumeMode::PixelLevel,
        }
    }
}

impl AnalyzerConfig {
    /// Parse a configuration document; missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(AnalyzerConfig::from_json("{}").unwrap(), AnalyzerConfig::default());
    }

    #[test]
    fn test_partial_document() {
        let config = AnalyzerConfig::from_json(
            r#"{
                "conversion": {"method": "advanced", "gcr_fraction": 0.6},
                "printer_profile": "laser",
                "volume_mode": "aggregate"
            }"#,
        )
        .unwrap();
        assert_eq!(config.conversion, ConversionMethod::Advanced { gcr_fraction: 0.6 });
        assert_eq!(config.printer_profile.as_deref(), Some("laser"));
        assert_eq!(config.volume_mode, VolumeMode::Aggregate);
        assert_eq!(config.iso_process, "heatset_web");
        assert_eq!(config.dpi, 150);
    }
}
