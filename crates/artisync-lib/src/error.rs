use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArtifactSyncError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid configuration: {details}")]
    ConfigValidation { details: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to fetch status feed from {url}: {reason}")]
    StatusFetch { url: String, reason: String },

    #[error("Failed to parse status document {document}: {reason}")]
    XmlParse { document: String, reason: String },

    #[error("Status document has no node at path '{path}'")]
    MissingNode { path: String },

    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid manifest entry '{entry}': {reason}")]
    InvalidManifestEntry { entry: String, reason: String },

    #[error("A file with the same name as the desired directory, '{}', already exists", path.display())]
    DirectoryConflict { path: PathBuf },

    #[error("Directory creation failed at {path}: {reason}")]
    DirectoryCreation { path: PathBuf, reason: String },

    #[error("Failed to clear directory {path}: {reason}")]
    DirectoryClear { path: PathBuf, reason: String },

    #[error("{failed} artifact download(s) failed, first failure: {filename} from {url}: {reason}")]
    ArtifactDownload {
        failed: usize,
        filename: String,
        url: String,
        reason: String,
    },

    #[error("Failed to write run report to {path}: {reason}")]
    ReportWrite { path: PathBuf, reason: String },

    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected error: {0}")]
    Unexpected(#[from] eyre::Report),
}
