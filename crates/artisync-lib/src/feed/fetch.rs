use crate::error::ArtifactSyncError;
use std::path::Path;
use tokio::io::AsyncWriteExt;

/// Downloads the status feed at `feed_url` into `dest`, replacing any previous snapshot.
///
/// Returns the number of bytes written. Non-success HTTP statuses are errors.
pub async fn fetch_status_document(
    client: &reqwest::Client,
    feed_url: &str,
    dest: &Path,
) -> Result<u64, ArtifactSyncError> {
    let fetch_error = |e: reqwest::Error| ArtifactSyncError::StatusFetch {
        url: feed_url.to_string(),
        reason: e.to_string(),
    };

    tracing::info!("Fetching status feed from {}", feed_url);
    let mut response = client
        .get(feed_url)
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(fetch_error)?;

    let file = tokio::fs::File::create(dest).await?;
    let mut writer = tokio::io::BufWriter::new(file);
    let mut written = 0u64;

    while let Some(chunk) = response.chunk().await.map_err(fetch_error)? {
        writer.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    writer.flush().await?;

    tracing::debug!(
        url = feed_url,
        output = %dest.display(),
        bytes = written,
        "Stored status feed snapshot"
    );
    Ok(written)
}
