use clap::{ArgAction, Parser};
use tracing::Level;
use tracing_subscriber;

/// Sync options as given on the command line, before configuration is loaded.
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    pub config_path: Option<String>,
    pub workspace: Option<String>,
    pub feed_url: Option<String>,
    pub artifact_subpath: Option<String>,
    pub artifacts: Vec<String>,
    pub best_effort: bool,
    pub report_path: Option<String>,
}

pub struct Args {
    pub options: SyncOptions,
    pub log_level: Level,
}

#[derive(Debug, Parser)]
#[command(
    name = "artisync",
    version,
    about = "Download the libraries published by the last successful build of a CI job"
)]
struct Cli {
    #[arg(
        short = 'v',
        long = "verbose",
        help = "Sets the level of verbosity",
        action = ArgAction::Count
    )]
    verbose: u8,

    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Optional config file (YAML, TOML or JSON)"
    )]
    config: Option<String>,

    #[arg(
        short = 'w',
        long = "workspace",
        value_name = "DIR",
        help = "Overrides the workspace root (default: $WORKSPACE)"
    )]
    workspace: Option<String>,

    #[arg(
        long = "feed-url",
        value_name = "URL",
        help = "Overrides the build status feed URL"
    )]
    feed_url: Option<String>,

    #[arg(
        long = "artifact-subpath",
        value_name = "PATH",
        help = "Overrides the artifact directory path relative to the build URL"
    )]
    artifact_subpath: Option<String>,

    #[arg(
        short = 'm',
        long = "artifact",
        value_name = "NAME",
        help = "Replaces the artifact manifest (repeat or use comma-separated values)",
        action = ArgAction::Append,
        value_delimiter = ','
    )]
    artifacts: Vec<String>,

    #[arg(
        long = "best-effort",
        help = "Attempt every artifact even after a download fails"
    )]
    best_effort: bool,

    #[arg(
        long = "report",
        value_name = "FILE",
        help = "Writes a JSON report of every download attempt"
    )]
    report: Option<String>,
}

pub fn parse_args() -> Args {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(log_level.into())
                .from_env_lossy(),
        )
        .init();

    let options = SyncOptions {
        config_path: cli.config,
        workspace: cli.workspace,
        feed_url: cli.feed_url,
        artifact_subpath: cli.artifact_subpath,
        artifacts: cli.artifacts,
        best_effort: cli.best_effort,
        report_path: cli.report,
    };

    Args { options, log_level }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_artifacts_accept_repeats_and_commas() {
        let cli = Cli::try_parse_from([
            "artisync",
            "-m",
            "a.jar,b.jar",
            "--artifact",
            "c.zip",
            "-vv",
            "--best-effort",
        ])
        .unwrap();

        assert_eq!(cli.artifacts, vec!["a.jar", "b.jar", "c.zip"]);
        assert_eq!(cli.verbose, 2);
        assert!(cli.best_effort);
        assert!(cli.config.is_none());
    }
}
