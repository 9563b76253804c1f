//! Print-process TAC limits and compliance classification.
//!
//! Each process partitions the coverage axis into three bands:
//!
//! ```text
//! max_tac ≤ warning            → compliant
//! warning < max_tac ≤ limit    → caution
//! max_tac > limit              → exceeds
//! ```
//!
//! Unknown process names resolve to [`IsoProcess::Generic`] (limit 300,
//! warning 280). Classification is advisory, so this never fails.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Named print process with its coverage limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IsoProcess {
    /// Sheet-fed offset on coated stock.
    SheetfedCoated,
    /// Sheet-fed offset on uncoated stock.
    SheetfedUncoated,
    /// Heatset web offset.
    HeatsetWeb,
    /// Coldset web offset.
    ColdsetWeb,
    /// Newsprint.
    Newspaper,
    /// Toner or liquid-toner digital press.
    DigitalPress,
    /// Fallback for unrecognised process names.
    Generic,
}

impl IsoProcess {
    /// The named processes, excluding the generic fallback.
    pub fn all() -> &'static [Self] {
        const ALL: [IsoProcess; 6] = [
            IsoProcess::SheetfedCoated,
            IsoProcess::SheetfedUncoated,
            IsoProcess::HeatsetWeb,
            IsoProcess::ColdsetWeb,
            IsoProcess::Newspaper,
            IsoProcess::DigitalPress,
        ];
        &ALL
    }

    /// Catalog key.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SheetfedCoated => "sheetfed_coated",
            Self::SheetfedUncoated => "sheetfed_uncoated",
            Self::HeatsetWeb => "heatset_web",
            Self::ColdsetWeb => "coldset_web",
            Self::Newspaper => "newspaper",
            Self::DigitalPress => "digital_press",
            Self::Generic => "generic",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            Self::SheetfedCoated => "ISO 12647-2 sheet-fed offset, coated paper",
            Self::SheetfedUncoated => "ISO 12647-2 sheet-fed offset, uncoated paper",
            Self::HeatsetWeb => "ISO 12647-2 heatset web offset",
            Self::ColdsetWeb => "ISO 12647-3 coldset web offset",
            Self::Newspaper => "ISO 12647-3 newsprint",
            Self::DigitalPress => "ISO/TS 15311 digital production press",
            Self::Generic => "Generic print process",
        }
    }

    /// Hard TAC limit in percent.
    pub const fn limit(&self) -> f64 {
        match self {
            Self::SheetfedCoated => 350.0,
            Self::SheetfedUncoated => 320.0,
            Self::HeatsetWeb => 300.0,
            Self::ColdsetWeb => 260.0,
            Self::Newspaper => 240.0,
            Self::DigitalPress => 320.0,
            Self::Generic => 300.0,
        }
    }

    /// TAC above which a page is flagged for caution.
    pub const fn warning_threshold(&self) -> f64 {
        match self {
            Self::SheetfedCoated => 330.0,
            Self::SheetfedUncoated => 300.0,
            Self::HeatsetWeb => 280.0,
            Self::ColdsetWeb => 240.0,
            Self::Newspaper => 220.0,
            Self::DigitalPress => 300.0,
            Self::Generic => 280.0,
        }
    }

    /// Dot-gain compensation factor used by [`crate::color::dot_gain`].
    pub const fn dot_gain(&self) -> f64 {
        match self {
            Self::SheetfedCoated => 0.12,
            Self::SheetfedUncoated => 0.18,
            Self::HeatsetWeb => 0.15,
            Self::ColdsetWeb => 0.22,
            Self::Newspaper => 0.28,
            Self::DigitalPress => 0.10,
            Self::Generic => 0.15,
        }
    }

    /// Exact catalog lookup.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Catalog lookup falling back to [`IsoProcess::Generic`].
    pub fn resolve(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            tracing::warn!("Unknown ISO process '{name}', using generic limits");
            Self::Generic
        })
    }

    /// Classify a page's maximum TAC against this process.
    pub fn classify(&self, max_tac: f64) -> ComplianceVerdict {
        let status = if max_tac <= self.warning_threshold() {
            ComplianceStatus::Compliant
        } else if max_tac <= self.limit() {
            ComplianceStatus::Caution
        } else {
            ComplianceStatus::Exceeds
        };

        ComplianceVerdict {
            status,
            severity: status.severity(),
            limit: self.limit(),
            warning_threshold: self.warning_threshold(),
            process: self.name().to_string(),
        }
    }
}

impl Default for IsoProcess {
    fn default() -> Self {
        Self::HeatsetWeb
    }
}

impl fmt::Display for IsoProcess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Compliance band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    Compliant,
    Caution,
    Exceeds,
}

impl ComplianceStatus {
    pub const fn severity(&self) -> Severity {
        match self {
            Self::Compliant => Severity::Info,
            Self::Caution => Severity::Warning,
            Self::Exceeds => Severity::Critical,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Compliant => "compliant",
            Self::Caution => "caution",
            Self::Exceeds => "exceeds",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

/// Outcome of classifying one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceVerdict {
    pub status: ComplianceStatus,
    pub severity: Severity,
    pub limit: f64,
    pub warning_threshold: f64,
    pub process: String,
}

/// Fixed-threshold flags kept for older reports, independent of process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyFlags {
    pub exceeds_280: bool,
    pub exceeds_300: bool,
    pub exceeds_320: bool,
}

impl LegacyFlags {
    pub fn from_max_tac(max_tac: f64) -> Self {
        Self {
            exceeds_280: max_tac > 280.0,
            exceeds_300: max_tac > 300.0,
            exceeds_320: max_tac > 320.0,
        }
    }
}
