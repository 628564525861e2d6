use super::types::{DownloadItem, DownloadOutcome, DownloadReport, DownloadStatus};
use crate::config::FailurePolicy;
use eyre::{Result, WrapErr};
use sha2::{Digest, Sha256};
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

/// Fetches every item into `output_dir`, one at a time and in order.
///
/// `output_dir` must already exist. Failures are recorded in the report rather than
/// returned; with [`FailurePolicy::FailFast`] nothing after the first failure is attempted.
pub async fn download_all(
    client: &reqwest::Client,
    items: Vec<DownloadItem>,
    output_dir: impl AsRef<Path>,
    policy: FailurePolicy,
) -> DownloadReport {
    let output_dir = output_dir.as_ref();
    let total = items.len();
    let mut report = DownloadReport::default();

    for (index, item) in items.into_iter().enumerate() {
        let output_path = output_dir.join(&item.filename);
        info!(
            url = %item.url,
            output = %output_path.display(),
            "Downloading {} ({}/{})",
            item.filename,
            index + 1,
            total
        );

        let status = match download_one(client, &item.url, &output_path).await {
            Ok((bytes, sha256)) => {
                tracing::debug!(url = %item.url, bytes, sha256 = %sha256, "Downloaded");
                DownloadStatus::Downloaded { bytes, sha256 }
            }
            Err(err) => {
                warn!("Download failed: {:#}", err);
                DownloadStatus::Failed {
                    reason: format!("{:#}", err),
                }
            }
        };

        let failed = matches!(status, DownloadStatus::Failed { .. });
        report.outcomes.push(DownloadOutcome {
            filename: item.filename,
            url: item.url,
            status,
        });

        if failed && policy == FailurePolicy::FailFast {
            let skipped = total - index - 1;
            if skipped > 0 {
                warn!("Stopping after first failure, {} artifact(s) not attempted", skipped);
            }
            break;
        }
    }

    report
}

async fn download_one(
    client: &reqwest::Client,
    url: &str,
    output_path: &Path,
) -> Result<(u64, String)> {
    let mut response = client
        .get(url)
        .send()
        .await
        .wrap_err_with(|| format!("Failed to request {}", url))?
        .error_for_status()
        .wrap_err_with(|| format!("Failed to fetch {}", url))?;

    let file = tokio::fs::File::create(output_path)
        .await
        .wrap_err_with(|| format!("Failed to create output file: {}", output_path.display()))?;
    let mut writer = tokio::io::BufWriter::new(file);
    let mut hasher = Sha256::new();
    let mut written = 0u64;

    // Stream the body to disk, hashing as we go
    while let Some(chunk) = response
        .chunk()
        .await
        .wrap_err_with(|| format!("Failed to read from {}", url))?
    {
        hasher.update(&chunk);
        writer
            .write_all(&chunk)
            .await
            .wrap_err_with(|| format!("Failed to write to {}", output_path.display()))?;
        written += chunk.len() as u64;
    }

    writer
        .flush()
        .await
        .wrap_err_with(|| format!("Failed to flush {}", output_path.display()))?;

    Ok((written, hex::encode(hasher.finalize())))
}
