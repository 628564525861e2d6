use crate::artifact::ArtifactBase;
use crate::cli::SyncParams;
use crate::directory::{clear_dir, ensure_dir};
use crate::download::{DownloadItem, download_all};
use crate::error::ArtifactSyncError;
use crate::feed::{extract_last_successful_build_url, fetch_status_document};
use crate::report::{SyncReport, write_report};
use tracing;

const USER_AGENT: &str = concat!("artisync/", env!("CARGO_PKG_VERSION"));

/// Fetches the status feed, resolves the last successful build and downloads its artifacts.
pub async fn run_sync(params: SyncParams) -> Result<SyncReport, ArtifactSyncError> {
    let SyncParams {
        config,
        manifest,
        report_path,
    } = params;
    let layout = config.layout();

    let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

    ensure_dir(&config.workspace)?;
    fetch_status_document(&client, &config.feed_url, &layout.status_file_path).await?;

    tracing::info!(
        "Reading last successful build from {}",
        layout.status_file_path.display()
    );
    let build_url = extract_last_successful_build_url(&layout.status_file_path)?;
    let artifact_base = ArtifactBase::from_build_url(&build_url, &config.artifact_subpath)?;
    tracing::info!(build_url = %build_url, "Artifact base URL is {}", artifact_base);

    ensure_dir(&layout.work_dir)?;

    // Stale artifacts from an earlier run must not survive into this one.
    clear_dir(&layout.lib_dir)?;
    ensure_dir(&layout.lib_dir)?;

    let items = DownloadItem::from_manifest(&artifact_base, &manifest);
    tracing::info!(
        "Downloading {} artifact(s) into {}",
        items.len(),
        layout.lib_dir.display()
    );
    let downloads = download_all(&client, items, &layout.lib_dir, config.failure_policy).await;

    let report = SyncReport {
        build_url,
        artifact_base: artifact_base.to_string(),
        downloads,
    };

    if let Some(report_path) = &report_path {
        write_report(report_path, &report)?;
    }

    if let Some(err) = report.downloads.failure() {
        return Err(err);
    }

    tracing::info!("Artifact sync completed successfully");
    Ok(report)
}
