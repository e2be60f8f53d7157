//! Output generation for analysis results.
//!
//! # Submodules
//!
//! - [`json`]: Writes an `AnalysisReport` to a dated JSON file
//! - [`summary`]: Renders percentages and popularity extremes as plain text

pub mod json;
pub mod summary;
