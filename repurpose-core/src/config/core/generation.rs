use crate::config::constants::{defaults, env_vars, models, urls};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Generative backend settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerationConfig {
    /// Explicit model preference, tried before everything else
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Ordered static preference list
    #[serde(default = "default_preferred_models")]
    pub preferred_models: Vec<String>,

    /// Query the backend for models supporting generateContent and append them
    #[serde(default = "default_true")]
    pub discover_models: bool,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// API key fallback when no environment variable is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Backend base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Upper bound for one generation call
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Number of generation calls kept in flight; 1 keeps the batch strictly sequential
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: None,
            preferred_models: default_preferred_models(),
            discover_models: default_true(),
            api_key_env: default_api_key_env(),
            api_key: None,
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            max_concurrency: default_max_concurrency(),
        }
    }
}

impl GenerationConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs.max(1))
    }

    /// Static preference order: configured model, then `GEMINI_MODEL`, then the preferred list.
    ///
    /// Duplicates are removed keeping the first occurrence.
    pub fn static_preferences(&self, env_model: Option<&str>) -> Vec<String> {
        let explicit = self
            .model
            .as_deref()
            .or(env_model)
            .map(str::trim)
            .filter(|name| !name.is_empty());

        explicit
            .into_iter()
            .chain(self.preferred_models.iter().map(String::as_str))
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect::<IndexSet<String>>()
            .into_iter()
            .collect()
    }
}

fn default_true() -> bool {
    true
}

fn default_preferred_models() -> Vec<String> {
    models::google::PREFERRED_MODELS
        .iter()
        .map(|name| name.to_string())
        .collect()
}

fn default_api_key_env() -> String {
    env_vars::GEMINI_API_KEY.to_string()
}

fn default_base_url() -> String {
    urls::GEMINI_API_BASE.to_string()
}

fn default_request_timeout() -> u64 {
    defaults::REQUEST_TIMEOUT_SECS
}

fn default_connect_timeout() -> u64 {
    defaults::CONNECT_TIMEOUT_SECS
}

fn default_max_concurrency() -> usize {
    defaults::MAX_CONCURRENCY
}
