//! JSON report output.
//!
//! # Output Structure
//!
//! One file per analysis run, grouped by UTC date:
//! ```text
//! json_output_dir/
//! └── 2021-12-13/
//!     ├── 14-02-31.json
//!     └── 14-10-05.json
//! ```

use crate::models::AnalysisReport;
use std::error::Error;
use std::path::PathBuf;
use tokio::fs;
use tracing::{error, info, instrument};

/// Write an [`AnalysisReport`] to a JSON file with a date-based directory structure.
///
/// Creates the date directory if needed and writes the pretty-printed report.
/// Date and time both come from the report's `generated_at` (UTC).
///
/// # Arguments
///
/// * `report` - The analysis run to serialize
/// * `json_output_dir` - Base directory for JSON output
///
/// # Returns
///
/// The path of the written file: `{json_output_dir}/{YYYY-MM-DD}/{HH-MM-SS}.json`.
///
/// # Errors
///
/// Returns an error if serialization, directory creation, or the write fails.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir))]
pub async fn write_report(
    report: &AnalysisReport,
    json_output_dir: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(report)?;

    let full_json_dir = PathBuf::from(json_output_dir)
        .join(report.generated_at.format("%Y-%m-%d").to_string());
    info!(full_json_dir = %full_json_dir.display(), "Ensuring JSON directory exists");
    if let Err(e) = fs::create_dir_all(&full_json_dir).await {
        error!(full_json_dir = %full_json_dir.display(), error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let output_json_filename =
        full_json_dir.join(format!("{}.json", report.generated_at.format("%H-%M-%S")));
    fs::write(&output_json_filename, json).await?;
    info!(path = %output_json_filename.display(), "Wrote JSON report");

    Ok(output_json_filename)
}
