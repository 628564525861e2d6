use crate::config::Config;
use crate::manifest::Manifest;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct SyncParams {
    pub config: Config,
    pub manifest: Manifest,
    pub report_path: Option<PathBuf>,
}
