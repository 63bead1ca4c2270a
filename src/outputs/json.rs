//! JSON report output.
//!
//! Reports are named after the window they cover:
//! ```text
//! json_output_dir/
//! └── 2011-01-01_2011-01-15.json
//! ```

use crate::error::Result;
use crate::models::HarvestReport;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

/// Path of the report for `report`'s window under `json_output_dir`.
pub fn report_path(report: &HarvestReport, json_output_dir: &Path) -> PathBuf {
    json_output_dir.join(format!("{}_{}.json", report.start_date, report.end_date))
}

/// Write a [`HarvestReport`] as pretty-printed JSON, creating the directory
/// if needed. Returns the path written.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir.display()))]
pub async fn write_report(report: &HarvestReport, json_output_dir: &Path) -> Result<PathBuf> {
    let json = serde_json::to_string_pretty(report)?;

    info!("Ensuring JSON directory exists");
    if let Err(e) = fs::create_dir_all(json_output_dir).await {
        error!(error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let path = report_path(report, json_output_dir);
    fs::write(&path, json).await?;
    info!(path = %path.display(), collected = report.collected, "Wrote JSON report");

    Ok(path)
}
