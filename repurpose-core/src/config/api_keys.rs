//! API key retrieval from environment variables, .env files and configuration.
//!
//! Environment variables win over configuration values so keys can stay out of
//! `repurpose.toml`.

use crate::config::constants::env_vars;
use anyhow::Result;
use std::env;

/// Where to look for the Gemini API key
#[derive(Debug, Clone)]
pub struct ApiKeySources {
    /// Primary environment variable name
    pub gemini_env: String,
    /// Key from the configuration file
    pub gemini_config: Option<String>,
}

impl Default for ApiKeySources {
    fn default() -> Self {
        Self {
            gemini_env: env_vars::GEMINI_API_KEY.to_string(),
            gemini_config: None,
        }
    }
}

impl ApiKeySources {
    pub fn from_generation_config(config: &crate::config::GenerationConfig) -> Self {
        Self {
            gemini_env: config.api_key_env.clone(),
            gemini_config: config.api_key.clone(),
        }
    }
}

/// Load environment variables from a `.env` file in the current directory.
///
/// A missing file is not an error.
pub fn load_dotenv() -> Result<()> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "loaded environment variables");
            Ok(())
        }
        Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => {
            tracing::warn!("Failed to load .env file: {e}");
            Ok(())
        }
    }
}

/// Get the Gemini API key.
///
/// Checks the configured environment variable, then `GOOGLE_API_KEY`, then the
/// configuration value.
pub fn get_gemini_api_key(sources: &ApiKeySources) -> Result<String> {
    for var in [sources.gemini_env.as_str(), env_vars::GOOGLE_API_KEY] {
        if let Ok(key) = env::var(var) {
            if !key.trim().is_empty() {
                return Ok(key.trim().to_string());
            }
        }
    }

    if let Some(key) = &sources.gemini_config {
        if !key.trim().is_empty() {
            return Ok(key.trim().to_string());
        }
    }

    Err(anyhow::anyhow!(
        "No API key found for Gemini. Set {} or {} (or add it to a .env file) or configure generation.api_key in repurpose.toml",
        sources.gemini_env,
        env_vars::GOOGLE_API_KEY
    ))
}

/// The `GEMINI_MODEL` override, if set and non-empty
pub fn model_override() -> Option<String> {
    env::var(env_vars::GEMINI_MODEL)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
