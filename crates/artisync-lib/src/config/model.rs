use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_FEED_URL: &str =
    "http://hudson-sca.us.oracle.com/view/JAX-WS/view/WLS/job/jaxws-ri-wls/api/xml";
pub const DEFAULT_ARTIFACT_SUBPATH: &str = "artifact/jaxws-ri/dist/jaxws-ri/lib/";
pub const DEFAULT_MANIFEST: &[&str] = &["jsr181-api.jar", "common.sdo.jar"];
pub const DEFAULT_STATUS_FILE: &str = "urlretrieve.xml";
pub const DEFAULT_WORK_DIR: &str = "jaxwstop4";
pub const DEFAULT_LIB_DIR: &str = "libDir";

/// What the downloader does after an artifact fails to download.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Stop at the first failed artifact.
    #[default]
    FailFast,
    /// Attempt every artifact and report all failures at the end.
    BestEffort,
}

impl FailurePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailurePolicy::FailFast => "fail_fast",
            FailurePolicy::BestEffort => "best_effort",
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Root directory every local path is derived from.
    pub workspace: PathBuf,
    /// Machine-readable status feed of the build job.
    pub feed_url: String,
    /// Path of the published library directory relative to a build URL.
    pub artifact_subpath: String,
    /// Artifact filenames, fetched in this order.
    pub manifest: Vec<String>,
    pub status_file: String,
    pub work_dir: String,
    pub lib_dir: String,
    pub failure_policy: FailurePolicy,
}

impl Config {
    pub fn layout(&self) -> WorkspaceLayout {
        WorkspaceLayout {
            status_file_path: self.workspace.join(&self.status_file),
            work_dir: self.workspace.join(&self.work_dir),
            lib_dir: self.workspace.join(&self.lib_dir),
        }
    }
}

/// Local paths a sync run reads and writes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkspaceLayout {
    pub status_file_path: PathBuf,
    pub work_dir: PathBuf,
    pub lib_dir: PathBuf,
}

/// Values supplied on the command line. They take precedence over every other source.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub workspace: Option<PathBuf>,
    pub feed_url: Option<String>,
    pub artifact_subpath: Option<String>,
    pub manifest: Option<Vec<String>>,
    pub failure_policy: Option<FailurePolicy>,
}
