//! Cartridge yield and cost.
//!
//! Cost follows the yield model printer vendors publish: a cartridge prints
//! a rated number of pages, so
//!
//! ```text
//! cartridges = pages_printed / pages_per_cartridge
//! cost       = cartridges × price_per_cartridge
//! ```
//!
//! A run without a [`CartridgeConfig`] carries no cost block at all.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::color::cmyk::Channel;
use crate::error::{AnalysisError, Result};

/// Yield and price of one channel's cartridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartridgeSpec {
    /// Rated page yield. Must be positive.
    pub pages_per_cartridge: f64,
    /// Price of one cartridge. Must be non-negative.
    pub price_per_cartridge: f64,
    #[serde(default)]
    pub description: String,
}

impl CartridgeSpec {
    pub fn new(pages_per_cartridge: f64, price_per_cartridge: f64) -> Self {
        Self {
            pages_per_cartridge,
            price_per_cartridge,
            description: String::new(),
        }
    }

    /// Cartridges and cost for `pages` printed pages.
    pub fn cost_for_pages(&self, pages: f64) -> ChannelCost {
        let cartridges = pages / self.pages_per_cartridge;
        ChannelCost {
            cartridges,
            cost: cartridges * self.price_per_cartridge,
        }
    }
}

/// Cartridge table for the four process channels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartridgeConfig {
    pub cyan: CartridgeSpec,
    pub magenta: CartridgeSpec,
    pub yellow: CartridgeSpec,
    pub black: CartridgeSpec,
}

/// On-disk wrapper: `{"cartridge_configuration": {...}}`.
#[derive(Debug, Deserialize)]
struct CartridgeFile {
    cartridge_configuration: CartridgeConfig,
}

impl CartridgeConfig {
    /// Parse and validate a cartridge configuration document.
    pub fn from_json(text: &str) -> Result<Self> {
        let file: CartridgeFile = serde_json::from_str(text)?;
        let config = file.cartridge_configuration;
        config.validate()?;
        Ok(config)
    }

    /// Read a cartridge configuration document from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        tracing::info!("Loaded cartridge configuration from {}", path.display());
        Ok(config)
    }

    pub fn get(&self, channel: Channel) -> &CartridgeSpec {
        match channel {
            Channel::Cyan => &self.cyan,
            Channel::Magenta => &self.magenta,
            Channel::Yellow => &self.yellow,
            Channel::Black => &self.black,
        }
    }

    /// Reject non-positive yields and negative or non-finite prices.
    pub fn validate(&self) -> Result<()> {
        for channel in Channel::ALL {
            let spec = self.get(channel);
            if !(spec.pages_per_cartridge.is_finite() && spec.pages_per_cartridge > 0.0) {
                return Err(AnalysisError::InvalidCartridgeConfig(format!(
                    "{channel}: pages_per_cartridge must be positive, got {}",
                    spec.pages_per_cartridge
                )));
            }
            if !(spec.price_per_cartridge.is_finite() && spec.price_per_cartridge >= 0.0) {
                return Err(AnalysisError::InvalidCartridgeConfig(format!(
                    "{channel}: price_per_cartridge must be non-negative, got {}",
                    spec.price_per_cartridge
                )));
            }
        }
        Ok(())
    }

    /// Cost of printing `pages` pages (already multiplied by copies).
    pub fn cost_for_pages(&self, pages: f64) -> CostBlock {
        let [cyan, magenta, yellow, black] =
            Channel::ALL.map(|ch| self.get(ch).cost_for_pages(pages));
        let total_cost = cyan.cost + magenta.cost + yellow.cost + black.cost;
        CostBlock {
            cyan,
            magenta,
            yellow,
            black,
            total_cost,
        }
    }
}

/// Cartridge consumption of one channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelCost {
    pub cartridges: f64,
    pub cost: f64,
}

/// Cartridge consumption and cost across all channels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CostBlock {
    pub cyan: ChannelCost,
    pub magenta: ChannelCost,
    pub yellow: ChannelCost,
    pub black: ChannelCost,
    pub total_cost: f64,
}

impl CostBlock {
    pub fn get(&self, channel: Channel) -> ChannelCost {
        match channel {
            Channel::Cyan => self.cyan,
            Channel::Magenta => self.magenta,
            Channel::Yellow => self.yellow,
            Channel::Black => self.black,
        }
    }
}
