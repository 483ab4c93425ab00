//! Backend abstraction for single-prompt text generation.
//!
//! A backend knows how to run one prompt against one named model and how to
//! list the models it offers. Fallback across models is handled by
//! [`crate::llm::GenerationClient`], which only relies on the error
//! classification exposed here.

use async_trait::async_trait;

#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Backend name (e.g. "gemini")
    fn name(&self) -> &str;

    /// Generate text for `prompt` with `model`.
    ///
    /// An `Ok` value may be empty when the backend produced no text.
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, LLMError>;

    /// Models known to support text generation, in backend order
    async fn list_models(&self) -> Result<Vec<String>, LLMError> {
        Ok(Vec::new())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LLMError {
    #[error("Model '{model}' is not available: {message}")]
    ModelNotFound { model: String, message: String },
    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),
    #[error("Request timed out: {0}")]
    Timeout(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Authentication failed: {0}")]
    Authentication(String),
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    #[error("Provider error: {0}")]
    Provider(String),
}

impl LLMError {
    /// The model is missing or cannot serve generation; the next candidate may work.
    pub fn is_model_unavailable(&self) -> bool {
        matches!(self, LLMError::ModelNotFound { .. })
    }

    /// Transient failure worth retrying later on the same model
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            LLMError::RateLimit(_) | LLMError::Timeout(_) | LLMError::Network(_)
        )
    }

    pub fn is_authentication(&self) -> bool {
        matches!(self, LLMError::Authentication(_))
    }

    /// Classify a raw backend message that carries no structured status.
    pub fn from_message(model: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_lowercase();
        if lower.contains("404") || lower.contains("not found") || lower.contains("not supported")
        {
            LLMError::ModelNotFound {
                model: model.to_string(),
                message,
            }
        } else if lower.contains("429") || lower.contains("quota") || lower.contains("rate limit") {
            LLMError::RateLimit(message)
        } else if lower.contains("timeout") || lower.contains("timed out") {
            LLMError::Timeout(message)
        } else {
            LLMError::Provider(message)
        }
    }
}
