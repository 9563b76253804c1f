//! Printer physical models.

use serde::Serialize;

use crate::error::{AnalysisError, Result};

/// Physical model of a printer used to turn coverage into ink volume.
///
/// `drops_per_pixel = 0` marks a toner device, which is estimated by area
/// instead of by drop count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PrinterProfile {
    /// Catalog key.
    pub name: &'static str,
    /// Device resolution in dots per inch.
    pub dpi: u32,
    /// Volume of one ink drop in picoliters.
    pub ink_per_drop_pl: f64,
    /// Drops deposited for one raster pixel at 100% coverage.
    pub drops_per_pixel: f64,
    pub description: &'static str,
    /// Yield standard the profile is modelled after.
    pub standard: &'static str,
}

const CATALOG: [PrinterProfile; 4] = [
    PrinterProfile {
        name: "inkjet_standard",
        dpi: 1200,
        ink_per_drop_pl: 4.0,
        drops_per_pixel: 32.0,
        description: "Consumer inkjet, standard quality",
        standard: "ISO/IEC 24711",
    },
    PrinterProfile {
        name: "inkjet_photo",
        dpi: 2400,
        ink_per_drop_pl: 1.5,
        drops_per_pixel: 96.0,
        description: "Photo inkjet with small-droplet heads",
        standard: "ISO/IEC 29102",
    },
    PrinterProfile {
        name: "inkjet_office",
        dpi: 600,
        ink_per_drop_pl: 8.0,
        drops_per_pixel: 12.0,
        description: "Business inkjet, draft to normal quality",
        standard: "ISO/IEC 24711",
    },
    PrinterProfile {
        name: "laser",
        dpi: 600,
        ink_per_drop_pl: 0.0,
        drops_per_pixel: 0.0,
        description: "Toner-based laser printer",
        standard: "ISO/IEC 19752",
    },
];

impl PrinterProfile {
    /// Every built-in profile.
    pub fn all() -> &'static [Self] {
        &CATALOG
    }

    /// Look a profile up by name. Unknown names are a configuration error.
    pub fn by_name(name: &str) -> Result<Self> {
        CATALOG
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
            .copied()
            .ok_or_else(|| AnalysisError::UnknownPrinterProfile(name.to_string()))
    }

    /// True for area-based (toner) devices.
    pub fn is_toner(&self) -> bool {
        self.drops_per_pixel <= 0.0
    }
}
