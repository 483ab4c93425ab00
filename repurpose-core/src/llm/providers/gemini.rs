use crate::config::GenerationConfig;
use crate::config::constants::models;
use crate::gemini::{Client, ClientConfig, GeminiError, GenerateContentRequest};
use crate::llm::provider::{GenerationBackend, LLMError};
use async_trait::async_trait;

/// Gemini REST backend
pub struct GeminiProvider {
    client: Client,
}

impl GeminiProvider {
    pub fn new(api_key: String, config: ClientConfig) -> Result<Self, LLMError> {
        let client =
            Client::with_config(api_key, config).map_err(|e| LLMError::Provider(e.to_string()))?;
        Ok(Self { client })
    }

    pub fn from_config(api_key: String, config: &GenerationConfig) -> Result<Self, LLMError> {
        Self::new(api_key, ClientConfig::from_generation_config(config))
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl GenerationBackend for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, model: &str, prompt: &str) -> Result<String, LLMError> {
        let request = GenerateContentRequest::from_prompt(prompt);
        let response = self
            .client
            .generate_content(model, &request)
            .await
            .map_err(|e| classify(model, e))?;
        Ok(response.extract_text())
    }

    async fn list_models(&self) -> Result<Vec<String>, LLMError> {
        let listed = self
            .client
            .list_models()
            .await
            .map_err(|e| classify("models", e))?;

        Ok(listed
            .iter()
            .filter(|info| info.supports(models::google::GENERATE_CONTENT_METHOD))
            .map(|info| info.id().to_string())
            .collect())
    }
}

/// Map a transport or HTTP failure onto the fallback taxonomy
fn classify(model: &str, error: GeminiError) -> LLMError {
    if error.is_timeout() {
        return LLMError::Timeout(error.to_string());
    }

    match &error {
        GeminiError::Decode(detail) => LLMError::MalformedResponse(detail.clone()),
        GeminiError::Build(detail) => LLMError::Provider(detail.clone()),
        GeminiError::Transport { .. } => LLMError::Network(error.to_string()),
        GeminiError::Api { status, message } => match status {
            404 => LLMError::ModelNotFound {
                model: model.to_string(),
                message: format!("HTTP {status}: {message}"),
            },
            401 | 403 => LLMError::Authentication(format!("HTTP {status}: {message}")),
            429 => LLMError::RateLimit(format!("HTTP {status}: {message}")),
            408 | 504 => LLMError::Timeout(format!("HTTP {status}: {message}")),
            // 400 with "API key not valid" is how Gemini reports bad keys
            400 if message.contains("API key not valid") || message.contains("API_KEY_INVALID") => {
                LLMError::Authentication(format!("HTTP {status}: {message}"))
            }
            _ => LLMError::from_message(model, format!("HTTP {status}: {message}")),
        },
    }
}
