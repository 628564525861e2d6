use crate::cli::args::SyncOptions;
use crate::cli::params::SyncParams;
use crate::config::{ConfigOverrides, FailurePolicy, load_config};
use crate::error::ArtifactSyncError;
use crate::manifest::Manifest;
use std::path::PathBuf;

pub fn resolve_params(options: SyncOptions) -> Result<SyncParams, ArtifactSyncError> {
    let SyncOptions {
        config_path,
        workspace,
        feed_url,
        artifact_subpath,
        artifacts,
        best_effort,
        report_path,
    } = options;

    let overrides = ConfigOverrides {
        workspace: workspace.map(PathBuf::from),
        feed_url,
        artifact_subpath,
        manifest: (!artifacts.is_empty()).then_some(artifacts),
        failure_policy: best_effort.then_some(FailurePolicy::BestEffort),
    };

    let config = load_config(config_path.as_deref(), &overrides)?;

    url::Url::parse(&config.feed_url).map_err(|e| ArtifactSyncError::InvalidUrl {
        url: config.feed_url.clone(),
        reason: e.to_string(),
    })?;

    let manifest = Manifest::new(config.manifest.iter().cloned())?;
    if manifest.is_empty() {
        tracing::warn!("Artifact manifest is empty, nothing will be downloaded");
    }

    Ok(SyncParams {
        config,
        manifest,
        report_path: report_path.map(PathBuf::from),
    })
}
