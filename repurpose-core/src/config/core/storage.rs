use crate::config::constants::{defaults, project};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Persistence settings for saved posts
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Allow requests to persist their outputs
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Directory holding saved posts; relative paths resolve against the workspace
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    /// Default number of posts returned by history queries
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            directory: default_directory(),
            history_limit: default_history_limit(),
        }
    }
}

impl StorageConfig {
    pub fn resolve_directory(&self, workspace: &std::path::Path) -> PathBuf {
        if self.directory.is_absolute() {
            self.directory.clone()
        } else {
            workspace.join(&self.directory)
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_directory() -> PathBuf {
    PathBuf::from(project::POSTS_DIR)
}

fn default_history_limit() -> usize {
    defaults::HISTORY_LIMIT
}
