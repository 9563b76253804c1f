//! Ink and toner volume estimation.

pub mod profile;
pub mod volume;
