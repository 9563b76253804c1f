//! Page analysis — configuration, per-page pipeline, results, and summaries.

pub mod analyzer;
pub mod config;
pub mod page;
pub mod pipeline;
pub mod summary;
