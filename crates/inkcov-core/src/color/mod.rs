//! Colorant model — CMYK coverage matrices, RGB↔CMYK conversion, and dot gain.

pub mod cmyk;
pub mod convert;
pub mod dot_gain;
