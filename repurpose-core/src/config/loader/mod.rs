use crate::config::constants::project;
use crate::config::core::{GenerationConfig, SegmentationConfig, ServerConfig, StorageConfig};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Template overrides keyed by platform key, then tone key
pub type TemplateOverrides = BTreeMap<String, BTreeMap<String, String>>;

/// Main configuration structure loaded from `repurpose.toml`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RepurposeConfig {
    /// Segment sizing and word limits
    #[serde(default)]
    pub segmentation: SegmentationConfig,

    /// Generative backend settings
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Saved post storage
    #[serde(default)]
    pub storage: StorageConfig,

    /// HTTP surface
    #[serde(default)]
    pub server: ServerConfig,

    /// Per platform/tone prompt template overrides
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub templates: TemplateOverrides,
}

impl RepurposeConfig {
    /// Write the default configuration to `<workspace>/repurpose.toml`.
    ///
    /// Returns the created path, or `None` when the file exists and `force` is false.
    pub fn bootstrap_project<P: AsRef<Path>>(workspace: P, force: bool) -> Result<Option<PathBuf>> {
        let config_path = workspace.as_ref().join(project::CONFIG_FILE_NAME);
        if config_path.exists() && !force {
            return Ok(None);
        }

        Self::create_sample_config(&config_path)?;
        Ok(Some(config_path))
    }

    /// Create sample configuration file
    pub fn create_sample_config<P: AsRef<Path>>(output: P) -> Result<()> {
        let output = output.as_ref();
        let config_content = toml::to_string_pretty(&RepurposeConfig::default())
            .context("Failed to serialize default configuration")?;

        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create directory: {}", parent.display())
                })?;
            }
        }

        fs::write(output, config_content)
            .with_context(|| format!("Failed to write config file: {}", output.display()))?;

        Ok(())
    }
}

/// Configuration manager for locating and loading `repurpose.toml`
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: RepurposeConfig,
    config_path: Option<PathBuf>,
    workspace: PathBuf,
}

impl ConfigManager {
    /// Load configuration from the default locations
    pub fn load() -> Result<Self> {
        Self::load_from_workspace(std::env::current_dir()?)
    }

    /// Load configuration from a specific workspace
    ///
    /// Lookup order: `<workspace>/repurpose.toml`, `<workspace>/.repurpose/repurpose.toml`,
    /// `~/.repurpose/repurpose.toml`, then built-in defaults.
    pub fn load_from_workspace(workspace: impl AsRef<Path>) -> Result<Self> {
        let workspace = workspace.as_ref().to_path_buf();

        let mut candidates = vec![
            workspace.join(project::CONFIG_FILE_NAME),
            workspace
                .join(project::CONFIG_DIR_NAME)
                .join(project::CONFIG_FILE_NAME),
        ];
        if let Some(home_dir) = dirs::home_dir() {
            candidates.push(
                home_dir
                    .join(project::CONFIG_DIR_NAME)
                    .join(project::CONFIG_FILE_NAME),
            );
        }

        for path in candidates {
            if path.exists() {
                let config = Self::parse_file(&path)?;
                tracing::debug!(path = %path.display(), "loaded configuration");
                return Ok(Self {
                    config,
                    config_path: Some(path),
                    workspace,
                });
            }
        }

        Ok(Self {
            config: RepurposeConfig::default(),
            config_path: None,
            workspace,
        })
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<Path>, workspace: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config = Self::parse_file(path)?;

        Ok(Self {
            config,
            config_path: Some(path.to_path_buf()),
            workspace: workspace.as_ref().to_path_buf(),
        })
    }

    fn parse_file(path: &Path) -> Result<RepurposeConfig> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &RepurposeConfig {
        &self.config
    }

    /// Mutable access for CLI overrides applied after loading
    pub fn config_mut(&mut self) -> &mut RepurposeConfig {
        &mut self.config
    }

    /// Get the configuration file path (if loaded from file)
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    /// Directory where saved posts live for this workspace
    pub fn storage_dir(&self) -> PathBuf {
        self.config.storage.resolve_directory(&self.workspace)
    }
}
