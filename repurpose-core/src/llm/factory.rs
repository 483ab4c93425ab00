use super::client::GenerationClient;
use super::provider::{GenerationBackend, LLMError};
use super::providers::GeminiProvider;
use crate::config::GenerationConfig;
use crate::config::api_keys::{ApiKeySources, get_gemini_api_key, model_override};
use async_trait::async_trait;
use std::sync::Arc;

/// Produces a ready [`GenerationClient`] on demand.
///
/// Connecting resolves credentials and runs model discovery, so callers defer
/// it until a batch actually has prompts to send.
#[async_trait]
pub trait ClientConnector: Send + Sync {
    async fn connect(&self) -> Result<GenerationClient, LLMError>;
}

/// Connects to Gemini using `[generation]` settings and the process environment
#[derive(Debug, Clone)]
pub struct GeminiConnector {
    config: GenerationConfig,
}

impl GeminiConnector {
    pub fn new(config: GenerationConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ClientConnector for GeminiConnector {
    async fn connect(&self) -> Result<GenerationClient, LLMError> {
        let sources = ApiKeySources::from_generation_config(&self.config);
        let api_key = get_gemini_api_key(&sources)
            .map_err(|e| LLMError::Authentication(e.to_string()))?;

        let provider = GeminiProvider::from_config(api_key, &self.config)?;
        let env_model = model_override();
        GenerationClient::connect(Arc::new(provider), &self.config, env_model.as_deref()).await
    }
}

/// Connects an already-constructed backend
pub struct BackendConnector {
    backend: Arc<dyn GenerationBackend>,
    config: GenerationConfig,
}

impl BackendConnector {
    pub fn new(backend: Arc<dyn GenerationBackend>, config: GenerationConfig) -> Self {
        Self { backend, config }
    }
}

#[async_trait]
impl ClientConnector for BackendConnector {
    async fn connect(&self) -> Result<GenerationClient, LLMError> {
        GenerationClient::connect(self.backend.clone(), &self.config, None).await
    }
}
