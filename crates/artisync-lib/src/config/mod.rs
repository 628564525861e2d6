mod loader;
mod model;

pub use loader::{WORKSPACE_ENV_VAR, load_config};
pub use model::{Config, ConfigOverrides, FailurePolicy, WorkspaceLayout};
