use crate::artifact::ArtifactBase;
use crate::error::ArtifactSyncError;
use crate::manifest::Manifest;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadItem {
    /// Name of the remote file, reused as the local filename
    pub filename: String,
    pub url: String,
}

impl DownloadItem {
    pub fn from_manifest(base: &ArtifactBase, manifest: &Manifest) -> Vec<DownloadItem> {
        manifest
            .iter()
            .map(|filename| DownloadItem {
                filename: filename.to_string(),
                url: base.url_for(filename),
            })
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DownloadStatus {
    Downloaded { bytes: u64, sha256: String },
    Failed { reason: String },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadOutcome {
    pub filename: String,
    pub url: String,
    #[serde(flatten)]
    pub status: DownloadStatus,
}

impl DownloadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self.status, DownloadStatus::Downloaded { .. })
    }
}

/// Per-file outcomes in the order the files were attempted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadReport {
    pub outcomes: Vec<DownloadOutcome>,
}

impl DownloadReport {
    pub fn failures(&self) -> impl Iterator<Item = &DownloadOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.is_success())
    }

    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }

    /// Error describing the failures in this report, if any.
    pub fn failure(&self) -> Option<ArtifactSyncError> {
        let failed = self.failures().count();
        self.outcomes.iter().find_map(|outcome| match &outcome.status {
            DownloadStatus::Failed { reason } => Some(ArtifactSyncError::ArtifactDownload {
                failed,
                filename: outcome.filename.clone(),
                url: outcome.url.clone(),
                reason: reason.clone(),
            }),
            DownloadStatus::Downloaded { .. } => None,
        })
    }

    pub fn into_result(self) -> Result<Vec<DownloadOutcome>, ArtifactSyncError> {
        match self.failure() {
            None => Ok(self.outcomes),
            Some(err) => Err(err),
        }
    }
}
