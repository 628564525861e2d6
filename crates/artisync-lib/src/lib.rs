pub mod artifact;
pub mod cli;
pub mod config;
pub mod directory;
pub mod download;
pub mod error;
pub mod feed;
pub mod manifest;
pub mod report;

pub use crate::config::Config;
pub use crate::error::ArtifactSyncError;
