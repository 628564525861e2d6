use super::Config;
use super::model::{
    ConfigOverrides, DEFAULT_ARTIFACT_SUBPATH, DEFAULT_FEED_URL, DEFAULT_LIB_DIR,
    DEFAULT_MANIFEST, DEFAULT_STATUS_FILE, DEFAULT_WORK_DIR, FailurePolicy,
};
use crate::error::ArtifactSyncError;
use config::Config as ConfigBuilder;

/// Environment variable the calling automation job uses to publish its workspace root.
pub const WORKSPACE_ENV_VAR: &str = "WORKSPACE";

pub fn load_config(
    config_path: Option<&str>,
    overrides: &ConfigOverrides,
) -> Result<Config, ArtifactSyncError> {
    let workspace_default = std::env::var(WORKSPACE_ENV_VAR).ok();
    load_config_from_sources(config_path, workspace_default, None, overrides)
}

/// `environment` replaces the process environment for `ARTISYNC_*` lookups when given.
fn load_config_from_sources(
    config_path: Option<&str>,
    workspace_default: Option<String>,
    environment: Option<config::Map<String, String>>,
    overrides: &ConfigOverrides,
) -> Result<Config, ArtifactSyncError> {
    let mut builder = ConfigBuilder::builder()
        .set_default("feed_url", DEFAULT_FEED_URL)?
        .set_default("artifact_subpath", DEFAULT_ARTIFACT_SUBPATH)?
        .set_default(
            "manifest",
            DEFAULT_MANIFEST
                .iter()
                .map(|name| name.to_string())
                .collect::<Vec<_>>(),
        )?
        .set_default("status_file", DEFAULT_STATUS_FILE)?
        .set_default("work_dir", DEFAULT_WORK_DIR)?
        .set_default("lib_dir", DEFAULT_LIB_DIR)?
        .set_default("failure_policy", FailurePolicy::default().as_str())?;

    if let Some(workspace) = workspace_default {
        builder = builder.set_default("workspace", workspace)?;
    }

    if let Some(config_path) = config_path {
        tracing::debug!("Reading configuration file {}", config_path);
        builder = builder.add_source(config::File::with_name(config_path));
    }

    let settings = builder
        .add_source(
            config::Environment::with_prefix("ARTISYNC")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("manifest")
                .source(environment),
        )
        .set_override_option(
            "workspace",
            overrides
                .workspace
                .as_ref()
                .map(|path| path.to_string_lossy().into_owned()),
        )?
        .set_override_option("feed_url", overrides.feed_url.clone())?
        .set_override_option("artifact_subpath", overrides.artifact_subpath.clone())?
        .set_override_option("manifest", overrides.manifest.clone())?
        .set_override_option(
            "failure_policy",
            overrides.failure_policy.map(|policy| policy.as_str()),
        )?
        .build()?;

    if settings.get_string("workspace").is_err() {
        return Err(ArtifactSyncError::ConfigValidation {
            details: format!(
                "No workspace provided. Set {WORKSPACE_ENV_VAR}, configure workspace or pass --workspace."
            ),
        });
    }

    settings.try_deserialize().map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn load_config_with_workspace(
        config_path: Option<&str>,
        workspace_default: Option<String>,
        overrides: &ConfigOverrides,
    ) -> Result<Config, ArtifactSyncError> {
        load_config_from_sources(config_path, workspace_default, Some(Default::default()), overrides)
    }

    fn artisync_env(vars: &[(&str, &str)]) -> Option<config::Map<String, String>> {
        Some(
            vars.iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_defaults_apply_when_only_workspace_is_known() {
        let config = load_config_with_workspace(
            None,
            Some("/srv/ci/workspace".to_string()),
            &ConfigOverrides::default(),
        )
        .expect("config should load");

        assert_eq!(config.workspace, PathBuf::from("/srv/ci/workspace"));
        assert_eq!(config.feed_url, DEFAULT_FEED_URL);
        assert_eq!(config.artifact_subpath, DEFAULT_ARTIFACT_SUBPATH);
        assert_eq!(config.manifest, vec!["jsr181-api.jar", "common.sdo.jar"]);
        assert_eq!(config.failure_policy, FailurePolicy::FailFast);

        let layout = config.layout();
        assert_eq!(
            layout.status_file_path,
            PathBuf::from("/srv/ci/workspace/urlretrieve.xml")
        );
        assert_eq!(layout.work_dir, PathBuf::from("/srv/ci/workspace/jaxwstop4"));
        assert_eq!(layout.lib_dir, PathBuf::from("/srv/ci/workspace/libDir"));
    }

    #[test]
    fn test_missing_workspace_is_rejected() {
        let err = load_config_with_workspace(None, None, &ConfigOverrides::default())
            .expect_err("config without workspace must fail");
        assert!(matches!(err, ArtifactSyncError::ConfigValidation { .. }));
    }

    #[test]
    fn test_file_overrides_environment_workspace() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("artisync.toml");
        std::fs::write(
            &config_path,
            r#"
workspace = "/from/file"
feed_url = "http://ci.example.com/job/lib/api/xml"
manifest = ["a.jar", "b.zip"]
failure_policy = "best_effort"
"#,
        )
        .unwrap();

        let config = load_config_with_workspace(
            Some(config_path.to_str().unwrap()),
            Some("/from/env".to_string()),
            &ConfigOverrides::default(),
        )
        .expect("config should load");

        assert_eq!(config.workspace, PathBuf::from("/from/file"));
        assert_eq!(config.feed_url, "http://ci.example.com/job/lib/api/xml");
        assert_eq!(config.manifest, vec!["a.jar", "b.zip"]);
        assert_eq!(config.failure_policy, FailurePolicy::BestEffort);
        assert_eq!(config.lib_dir, DEFAULT_LIB_DIR);
    }

    #[test]
    fn test_command_line_overrides_win() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("artisync.toml");
        std::fs::write(&config_path, "workspace = \"/from/file\"\n").unwrap();

        let overrides = ConfigOverrides {
            workspace: Some(PathBuf::from("/from/cli")),
            manifest: Some(vec!["only.jar".to_string()]),
            failure_policy: Some(FailurePolicy::BestEffort),
            ..Default::default()
        };
        let config =
            load_config_with_workspace(Some(config_path.to_str().unwrap()), None, &overrides)
                .expect("config should load");

        assert_eq!(config.workspace, PathBuf::from("/from/cli"));
        assert_eq!(config.manifest, vec!["only.jar"]);
        assert_eq!(config.failure_policy, FailurePolicy::BestEffort);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("artisync.toml");
        std::fs::write(&config_path, "workspace = \"/ws\"\nretries = 3\n").unwrap();

        let result =
            load_config_with_workspace(Some(config_path.to_str().unwrap()), None, &Default::default());
        assert!(matches!(result, Err(ArtifactSyncError::Config(_))));
    }

    #[test]
    fn test_environment_overrides_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("artisync.toml");
        std::fs::write(
            &config_path,
            "workspace = \"/from/file\"\nmanifest = [\"file.jar\"]\nlib_dir = \"fileLib\"\n",
        )
        .unwrap();

        let config = load_config_from_sources(
            Some(config_path.to_str().unwrap()),
            None,
            artisync_env(&[
                ("ARTISYNC_MANIFEST", "a.jar,b.jar"),
                ("ARTISYNC_LIB_DIR", "envLib"),
            ]),
            &ConfigOverrides::default(),
        )
        .expect("config should load");

        assert_eq!(config.manifest, vec!["a.jar", "b.jar"]);
        assert_eq!(config.lib_dir, "envLib");
        assert_eq!(config.workspace, PathBuf::from("/from/file"));
    }

    #[test]
    fn test_command_line_overrides_environment() {
        let overrides = ConfigOverrides {
            manifest: Some(vec!["cli.jar".to_string()]),
            ..Default::default()
        };

        let config = load_config_from_sources(
            None,
            Some("/ws".to_string()),
            artisync_env(&[
                ("ARTISYNC_MANIFEST", "a.jar,b.jar"),
                ("ARTISYNC_LIB_DIR", "envLib"),
            ]),
            &overrides,
        )
        .expect("config should load");

        assert_eq!(config.manifest, vec!["cli.jar"]);
        assert_eq!(config.lib_dir, "envLib");
    }

    #[test]
    fn test_environment_workspace_beats_workspace_variable() {
        let config = load_config_from_sources(
            None,
            Some("/from/workspace-var".to_string()),
            artisync_env(&[("ARTISYNC_WORKSPACE", "/from/artisync-var")]),
            &ConfigOverrides::default(),
        )
        .expect("config should load");

        assert_eq!(config.workspace, PathBuf::from("/from/artisync-var"));
    }

    #[test]
    fn test_load_config_reads_workspace_variable() {
        let workspace = std::env::temp_dir().join("artisync-workspace-var-test");
        let previous = std::env::var_os(WORKSPACE_ENV_VAR);
        // No other test in this crate sets WORKSPACE.
        unsafe { std::env::set_var(WORKSPACE_ENV_VAR, &workspace) };
        let result = load_config(None, &ConfigOverrides::default());
        match previous {
            Some(value) => unsafe { std::env::set_var(WORKSPACE_ENV_VAR, value) },
            None => unsafe { std::env::remove_var(WORKSPACE_ENV_VAR) },
        }

        assert_eq!(result.expect("config should load").workspace, workspace);
    }
}
