pub mod config;

pub use config::ClientConfig;

use crate::gemini::models::{
    GenerateContentRequest, GenerateContentResponse, ListModelsResponse, ModelInfo,
};
use reqwest::Client as ReqwestClient;
use serde::de::DeserializeOwned;
use std::time::Instant;
use thiserror::Error;

/// Upper bound on `models.list` pages followed in one discovery call
const MAX_MODEL_PAGES: usize = 20;

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("Failed to build HTTP client: {0}")]
    Build(String),

    #[error("Request failed: {source}")]
    Transport {
        #[source]
        source: reqwest::Error,
    },

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl GeminiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            GeminiError::Api { status, .. } => Some(*status),
            GeminiError::Transport { source } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, GeminiError::Transport { source } if source.is_timeout())
    }
}

#[derive(Clone)]
pub struct Client {
    api_key: String,
    http: ReqwestClient,
    config: ClientConfig,
}

impl Client {
    pub fn new(api_key: String) -> Result<Self, GeminiError> {
        Self::with_config(api_key, ClientConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(api_key: String, config: ClientConfig) -> Result<Self, GeminiError> {
        let http = ReqwestClient::builder()
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .pool_idle_timeout(config.pool_idle_timeout)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| GeminiError::Build(e.to_string()))?;

        Ok(Self {
            api_key,
            http,
            config,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Generate content with one model
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let start_time = Instant::now();
        let url = format!("{}/models/{}:generateContent", self.config.base_url, model);

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(request)
            .send()
            .await
            .map_err(|source| GeminiError::Transport { source })?;

        let parsed = Self::read_json(response).await?;
        tracing::debug!(
            model,
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "generateContent completed"
        );
        Ok(parsed)
    }

    /// Fetch one page of the model catalogue
    pub async fn list_models_page(
        &self,
        page_token: Option<&str>,
    ) -> Result<ListModelsResponse, GeminiError> {
        let url = format!("{}/models", self.config.base_url);
        let mut request = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str())]);
        if let Some(token) = page_token {
            request = request.query(&[("pageToken", token)]);
        }

        let response = request
            .send()
            .await
            .map_err(|source| GeminiError::Transport { source })?;
        Self::read_json(response).await
    }

    /// Every model in the catalogue, following `nextPageToken`
    pub async fn list_models(&self) -> Result<Vec<ModelInfo>, GeminiError> {
        let mut models = Vec::new();
        let mut token: Option<String> = None;

        for _ in 0..MAX_MODEL_PAGES {
            let page = self.list_models_page(token.as_deref()).await?;
            models.extend(page.models);
            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(next) => token = Some(next),
                None => return Ok(models),
            }
        }

        tracing::warn!(
            pages = MAX_MODEL_PAGES,
            "model listing truncated after page limit"
        );
        Ok(models)
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, GeminiError> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| GeminiError::Transport { source })?;
        serde_json::from_str(&body).map_err(|e| GeminiError::Decode(e.to_string()))
    }
}
