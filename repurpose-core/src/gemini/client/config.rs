use crate::config::GenerationConfig;
use crate::config::constants::{defaults, urls};
use std::time::Duration;

/// HTTP client settings for the Gemini API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root, e.g. `https://generativelanguage.googleapis.com/v1beta`
    pub base_url: String,
    /// Maximum number of idle connections per host
    pub pool_max_idle_per_host: usize,
    /// How long to keep idle connections alive
    pub pool_idle_timeout: Duration,
    /// Upper bound for one request, including the response body
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: urls::GEMINI_API_BASE.to_string(),
            pool_max_idle_per_host: 4,
            pool_idle_timeout: Duration::from_secs(90),
            request_timeout: Duration::from_secs(defaults::REQUEST_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(defaults::CONNECT_TIMEOUT_SECS),
            user_agent: defaults::USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn from_generation_config(config: &GenerationConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            request_timeout: config.request_timeout(),
            connect_timeout: config.connect_timeout(),
            ..Self::default()
        }
    }

    /// Same settings against a different API root
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}
