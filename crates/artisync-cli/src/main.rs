use artisync_lib::cli::{parse_args, resolve_params, run_sync};
use artisync_lib::error::ArtifactSyncError;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), ArtifactSyncError> {
    color_eyre::install()?;

    let args = parse_args();
    let params = resolve_params(args.options)?;
    run_sync(params).await?;

    Ok(())
}
