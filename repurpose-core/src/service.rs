//! Request/response surface shared by the CLI and the HTTP server.
//!
//! Validates free-form labels at the boundary, runs the pipeline and
//! optionally persists the combined outputs. Persistence failures never fail
//! a generation request; they are logged and reported as `saved = false`.

use crate::config::RepurposeConfig;
use crate::config::constants::{defaults, messages};
use crate::input::enforce_word_limit;
use crate::llm::{ClientConnector, GeminiConnector};
use crate::pipeline::{
    PipelineError, PipelineOutcome, PipelineSettings, ProgressObserver, RepurposePipeline,
};
use crate::prompts::{Platform, PromptError, TemplateRegistry, Tone};
use crate::segmentation;
use crate::storage::{MarkdownPostStore, PostQuery, PostStore, SavedPost};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl ServiceError {
    /// HTTP status equivalent
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 400,
            ServiceError::Pipeline(PipelineError::Prompt(_)) => 400,
            ServiceError::Pipeline(PipelineError::BackendUnavailable(_)) => 503,
            ServiceError::Storage(_) => 500,
        }
    }
}

impl From<PromptError> for ServiceError {
    fn from(error: PromptError) -> Self {
        ServiceError::Pipeline(PipelineError::Prompt(error))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Raw text to segment; ignored when `segments` is non-empty
    #[serde(default)]
    pub text: Option<String>,
    /// Pre-segmented input
    #[serde(default)]
    pub segments: Option<Vec<String>>,
    /// Tone display label, e.g. "Professional"
    pub tone: String,
    /// Platform display labels, e.g. ["LinkedIn", "Instagram"]
    pub platforms: Vec<String>,
    #[serde(default)]
    pub project_title: Option<String>,
    #[serde(default)]
    pub save: bool,
    #[serde(default)]
    pub user_id: Option<i64>,
}

impl GenerateRequest {
    /// Check labels and field combinations before any work is done.
    pub fn validate(&self) -> Result<(), ServiceError> {
        if Tone::from_label(&self.tone).is_none() {
            return Err(PromptError::unsupported_tone(&self.tone).into());
        }

        if self.platforms.is_empty() {
            return Err(ServiceError::Validation(
                "At least one platform is required.".to_string(),
            ));
        }
        let unknown: Vec<&str> = self
            .platforms
            .iter()
            .map(String::as_str)
            .filter(|label| Platform::from_label(label).is_none())
            .collect();
        if !unknown.is_empty() {
            return Err(ServiceError::Validation(format!(
                "Unsupported platform(s): {unknown:?}. Expected one of {:?}",
                Platform::labels()
            )));
        }

        if let Some(segments) = &self.segments {
            if segments.iter().any(|segment| segment.trim().is_empty()) {
                return Err(ServiceError::Validation(
                    "Segments must contain text.".to_string(),
                ));
            }
        }

        if !self.has_segments() && self.text.as_deref().is_none_or(|t| t.trim().is_empty()) {
            return Err(ServiceError::Validation(
                "Provide either text or segments to repurpose.".to_string(),
            ));
        }

        if self.save && self.project_title().is_none() {
            return Err(ServiceError::Validation(
                "Project title is required when save=true.".to_string(),
            ));
        }

        Ok(())
    }

    fn has_segments(&self) -> bool {
        self.segments.as_ref().is_some_and(|s| !s.is_empty())
    }

    fn project_title(&self) -> Option<&str> {
        self.project_title
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub tone: String,
    pub platforms: Vec<String>,
    pub segment_count: usize,
    /// Combined copy keyed by platform key
    pub outputs: IndexMap<String, String>,
    pub saved: bool,
    /// Set when the request had nothing to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    pub response: String,
}

#[derive(Debug, Clone, Copy)]
pub struct ServiceSettings {
    pub max_words: usize,
    pub history_limit: usize,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            max_words: defaults::DEFAULT_MAX_WORDS,
            history_limit: defaults::HISTORY_LIMIT,
        }
    }
}

pub struct RepurposeService {
    pipeline: Arc<RepurposePipeline>,
    store: Option<Arc<dyn PostStore>>,
    settings: ServiceSettings,
}

impl RepurposeService {
    pub fn new(
        pipeline: Arc<RepurposePipeline>,
        store: Option<Arc<dyn PostStore>>,
        settings: ServiceSettings,
    ) -> Self {
        Self {
            pipeline,
            store,
            settings,
        }
    }

    /// Service backed by Gemini and, when enabled, the markdown post store
    pub fn from_config(config: &RepurposeConfig, workspace: &Path) -> Result<Self, ServiceError> {
        let connector: Arc<dyn ClientConnector> =
            Arc::new(GeminiConnector::new(config.generation.clone()));
        Self::with_connector(config, workspace, connector)
    }

    /// Service using `connector` for generation, configured otherwise from `config`
    pub fn with_connector(
        config: &RepurposeConfig,
        workspace: &Path,
        connector: Arc<dyn ClientConnector>,
    ) -> Result<Self, ServiceError> {
        let registry = Arc::new(TemplateRegistry::with_overrides(&config.templates)?);
        let pipeline = Arc::new(RepurposePipeline::new(
            registry,
            connector,
            PipelineSettings::from_config(config),
        ));

        let store: Option<Arc<dyn PostStore>> = config.storage.enabled.then(|| {
            Arc::new(MarkdownPostStore::new(
                config.storage.resolve_directory(workspace),
            )) as Arc<dyn PostStore>
        });

        Ok(Self::new(
            pipeline,
            store,
            ServiceSettings {
                max_words: config.segmentation.max_words,
                history_limit: config.storage.history_limit,
            },
        ))
    }

    pub fn pipeline(&self) -> &RepurposePipeline {
        &self.pipeline
    }

    pub fn settings(&self) -> ServiceSettings {
        self.settings
    }

    /// Validate, generate and optionally save.
    pub async fn handle_generate(
        &self,
        request: &GenerateRequest,
        observer: &dyn ProgressObserver,
    ) -> Result<GenerateResponse, ServiceError> {
        request.validate()?;

        let outcome = if let Some(segments) = request.segments.as_ref().filter(|s| !s.is_empty()) {
            let segments = segmentation::from_presegmented(segments);
            self.pipeline
                .run_segments(segments, &request.tone, &request.platforms, observer)
                .await?
        } else {
            let text = request.text.as_deref().unwrap_or_default();
            let limited = enforce_word_limit(text, self.settings.max_words);
            if limited.truncated {
                tracing::info!(
                    max_words = self.settings.max_words,
                    "input trimmed to word limit"
                );
            }
            self.pipeline
                .run(&limited.text, &request.tone, &request.platforms, observer)
                .await?
        };

        let output = match outcome {
            PipelineOutcome::Completed(output) => output,
            PipelineOutcome::NothingToDo { reason } => {
                return Ok(GenerateResponse {
                    tone: request.tone.clone(),
                    platforms: request.platforms.clone(),
                    segment_count: 0,
                    outputs: IndexMap::new(),
                    saved: false,
                    message: Some(reason.message().to_string()),
                });
            }
        };

        let outputs = output.outputs();
        let saved = if request.save {
            self.save_outputs(request, &outputs)
        } else {
            false
        };

        Ok(GenerateResponse {
            tone: request.tone.clone(),
            platforms: request.platforms.clone(),
            segment_count: output.segment_count(),
            outputs,
            saved,
            message: None,
        })
    }

    fn save_outputs(&self, request: &GenerateRequest, outputs: &IndexMap<String, String>) -> bool {
        let Some(store) = &self.store else {
            tracing::warn!("save requested but storage is disabled");
            return false;
        };
        let title = request.project_title().unwrap_or_default();

        match store.save(title, &request.tone, outputs, request.user_id) {
            Ok(records) => !records.is_empty(),
            Err(err) => {
                tracing::warn!(error = %format!("{err:#}"), "failed to save generated posts");
                false
            }
        }
    }

    /// Answer a single free-form question.
    pub async fn ask(&self, question: &str) -> Result<AskResponse, ServiceError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(ServiceError::Validation(
                "Question cannot be empty".to_string(),
            ));
        }

        let client = self.pipeline.client().await?;
        let prompt = format!("{}\n\n{question}", messages::ASK_PROMPT_PREFIX);
        let response = client.generate_text(&prompt).await;
        Ok(AskResponse { response })
    }

    /// Saved posts, newest first
    pub fn history(
        &self,
        user_id: Option<i64>,
        limit: Option<usize>,
        include_content: bool,
    ) -> Result<Vec<SavedPost>, ServiceError> {
        let store = self
            .store
            .as_ref()
            .ok_or_else(|| ServiceError::Storage("storage is disabled".to_string()))?;

        let query = PostQuery {
            user_id,
            limit: limit.unwrap_or(self.settings.history_limit),
            include_content,
        };
        store
            .list(&query)
            .map_err(|err| ServiceError::Storage(format!("{err:#}")))
    }
}
