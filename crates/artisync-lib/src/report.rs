use crate::download::DownloadReport;
use crate::error::ArtifactSyncError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Result of one sync run, as written by `--report`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    /// Build URL taken from the status feed
    pub build_url: String,
    pub artifact_base: String,
    #[serde(flatten)]
    pub downloads: DownloadReport,
}

impl SyncReport {
    pub fn is_success(&self) -> bool {
        self.downloads.is_success()
    }
}

pub fn write_report(path: &Path, report: &SyncReport) -> Result<(), ArtifactSyncError> {
    let contents = serde_json::to_string_pretty(report)?;
    std::fs::write(path, contents).map_err(|e| ArtifactSyncError::ReportWrite {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    tracing::info!("Run report written to {}", path.display());
    Ok(())
}
