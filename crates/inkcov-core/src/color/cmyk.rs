//! Per-pixel CMYK coverage for one page.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A process colorant channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Cyan,
    Magenta,
    Yellow,
    Black,
}

impl Channel {
    /// All channels in CMYK order.
    pub const ALL: [Channel; 4] = [Self::Cyan, Self::Magenta, Self::Yellow, Self::Black];

    /// Lowercase name used in configuration files and reports.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Cyan => "cyan",
            Self::Magenta => "magenta",
            Self::Yellow => "yellow",
            Self::Black => "black",
        }
    }

    /// Position in CMYK order.
    pub const fn index(&self) -> usize {
        match self {
            Self::Cyan => 0,
            Self::Magenta => 1,
            Self::Yellow => 2,
            Self::Black => 3,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Four same-shaped coverage planes, each value a percentage in `[0, 100]`.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageMatrix {
    /// Plane width in pixels.
    pub width: u32,
    /// Plane height in pixels.
    pub height: u32,
    /// Cyan coverage (width × height, row-major).
    pub cyan: Vec<f64>,
    /// Magenta coverage (width × height, row-major).
    pub magenta: Vec<f64>,
    /// Yellow coverage (width × height, row-major).
    pub yellow: Vec<f64>,
    /// Black coverage (width × height, row-major).
    pub black: Vec<f64>,
}

impl CoverageMatrix {
    /// An all-zero (paper white) matrix.
    pub fn zeros(width: u32, height: u32) -> Self {
        Self::uniform(width, height, [0.0; 4])
    }

    /// A matrix where every pixel carries the same `[c, m, y, k]` coverage.
    pub fn uniform(width: u32, height: u32, cmyk: [f64; 4]) -> Self {
        let n = width as usize * height as usize;
        Self {
            width,
            height,
            cyan: vec![cmyk[0]; n],
            magenta: vec![cmyk[1]; n],
            yellow: vec![cmyk[2]; n],
            black: vec![cmyk[3]; n],
        }
    }

    /// Number of pixels per plane.
    pub fn len(&self) -> usize {
        self.cyan.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cyan.is_empty()
    }

    /// Borrow one channel plane.
    pub fn channel(&self, channel: Channel) -> &[f64] {
        match channel {
            Channel::Cyan => &self.cyan,
            Channel::Magenta => &self.magenta,
            Channel::Yellow => &self.yellow,
            Channel::Black => &self.black,
        }
    }

    /// Mutably borrow one channel plane.
    pub fn channel_mut(&mut self, channel: Channel) -> &mut [f64] {
        match channel {
            Channel::Cyan => &mut self.cyan,
            Channel::Magenta => &mut self.magenta,
            Channel::Yellow => &mut self.yellow,
            Channel::Black => &mut self.black,
        }
    }

    /// `[c, m, y, k]` at pixel index `idx`.
    pub fn pixel(&self, idx: usize) -> [f64; 4] {
        [self.cyan[idx], self.magenta[idx], self.yellow[idx], self.black[idx]]
    }

    pub fn set_pixel(&mut self, idx: usize, cmyk: [f64; 4]) {
        self.cyan[idx] = cmyk[0];
        self.magenta[idx] = cmyk[1];
        self.yellow[idx] = cmyk[2];
        self.black[idx] = cmyk[3];
    }

    /// Total area coverage at pixel index `idx`.
    pub fn tac_at(&self, idx: usize) -> f64 {
        self.cyan[idx] + self.magenta[idx] + self.yellow[idx] + self.black[idx]
    }

    /// Element-wise sum of the four planes.
    pub fn tac(&self) -> Vec<f64> {
        (0..self.len()).map(|i| self.tac_at(i)).collect()
    }

    /// Highest per-pixel TAC, or 0 for an empty matrix.
    pub fn max_tac(&self) -> f64 {
        (0..self.len()).map(|i| self.tac_at(i)).fold(0.0, f64::max)
    }
}
