//! Generation client with forward-only model fallback.
//!
//! The client walks an ordered list of candidate models. A "model
//! unavailable" failure advances to the next candidate and retries the same
//! prompt once; any other failure leaves the current model in place. The
//! index never moves backwards, so once a working model is found it serves
//! the rest of the batch.

use crate::config::GenerationConfig;
use crate::llm::error_display;
use crate::llm::provider::{GenerationBackend, LLMError};
use indexmap::IndexSet;
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// Where a candidate model name came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateSource {
    /// `generation.model` or `GEMINI_MODEL`
    Configured,
    /// Static preference list
    Preferred,
    /// Reported by the backend's model listing
    Discovered,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateModel {
    pub name: String,
    pub source: CandidateSource,
}

/// A prompt that could not be turned into text
#[derive(Debug, Clone, Error)]
pub enum GenerationFailure {
    #[error("{error}")]
    FallbackExhausted {
        attempted: Vec<String>,
        error: LLMError,
    },

    #[error("{error}")]
    Request { model: String, error: LLMError },

    #[error("no candidate models configured")]
    NoCandidates,
}

impl GenerationFailure {
    /// Text substituted into the batch in place of generated copy
    pub fn placeholder(&self) -> String {
        match self {
            GenerationFailure::FallbackExhausted { attempted, error } => {
                error_display::generation_placeholder_with_tip(&error.to_string(), attempted)
            }
            GenerationFailure::Request { error, .. } => {
                error_display::generation_placeholder(&error.to_string())
            }
            GenerationFailure::NoCandidates => {
                error_display::generation_placeholder_with_tip(&self.to_string(), &[])
            }
        }
    }

    pub fn error(&self) -> Option<&LLMError> {
        match self {
            GenerationFailure::FallbackExhausted { error, .. }
            | GenerationFailure::Request { error, .. } => Some(error),
            GenerationFailure::NoCandidates => None,
        }
    }
}

/// Merge preferred and discovered names, dropping duplicates and blanks while
/// keeping first-seen order.
pub fn merge_candidates(preferred: &[String], discovered: &[String]) -> Vec<String> {
    let mut merged: IndexSet<String> = IndexSet::new();
    for name in preferred.iter().chain(discovered) {
        let name = name.trim();
        if !name.is_empty() {
            merged.insert(name.to_string());
        }
    }
    merged.into_iter().collect()
}

pub struct GenerationClient {
    backend: Arc<dyn GenerationBackend>,
    candidates: Vec<CandidateModel>,
    index: Mutex<usize>,
}

impl GenerationClient {
    /// Client over an explicit candidate list
    pub fn new(backend: Arc<dyn GenerationBackend>, candidates: Vec<CandidateModel>) -> Self {
        Self {
            backend,
            candidates,
            index: Mutex::new(0),
        }
    }

    /// Client whose candidates are plain names in preference order
    pub fn with_models<I, S>(backend: Arc<dyn GenerationBackend>, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let candidates = models
            .into_iter()
            .map(|name| CandidateModel {
                name: name.into(),
                source: CandidateSource::Preferred,
            })
            .collect();
        Self::new(backend, candidates)
    }

    /// Build the candidate list from configuration and, when enabled, backend discovery.
    ///
    /// Discovery failures leave the static list in place, except authentication
    /// failures which mean no call can succeed.
    pub async fn connect(
        backend: Arc<dyn GenerationBackend>,
        config: &GenerationConfig,
        env_model: Option<&str>,
    ) -> Result<Self, LLMError> {
        let preferred = config.static_preferences(env_model);

        let discovered = if config.discover_models {
            match backend.list_models().await {
                Ok(models) => {
                    tracing::debug!(count = models.len(), "discovered generation models");
                    models
                }
                Err(err) if err.is_authentication() => return Err(err),
                Err(err) => {
                    tracing::warn!(error = %err, "model discovery failed; using preference list");
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };

        let explicit = config
            .model
            .as_deref()
            .or(env_model)
            .map(str::trim)
            .filter(|name| !name.is_empty());
        let candidates = merge_candidates(&preferred, &discovered)
            .into_iter()
            .map(|name| {
                let source = if explicit == Some(name.as_str()) {
                    CandidateSource::Configured
                } else if preferred.contains(&name) {
                    CandidateSource::Preferred
                } else {
                    CandidateSource::Discovered
                };
                CandidateModel { name, source }
            })
            .collect::<Vec<_>>();

        tracing::info!(
            backend = backend.name(),
            candidates = candidates.len(),
            first = candidates.first().map(|c| c.name.as_str()).unwrap_or("<none>"),
            "generation client ready"
        );
        Ok(Self::new(backend, candidates))
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    pub fn candidates(&self) -> &[CandidateModel] {
        &self.candidates
    }

    /// Model the next call will use
    pub fn current_model(&self) -> Option<&str> {
        let index = *self.index.lock();
        self.candidates.get(index).map(|c| c.name.as_str())
    }

    pub fn current_index(&self) -> usize {
        *self.index.lock()
    }

    /// Move past `failed` unless another call already did.
    ///
    /// Returns the index to retry with, or `None` when no later candidate exists.
    fn advance_from(&self, failed: usize) -> Option<usize> {
        let mut index = self.index.lock();
        if *index == failed {
            if failed + 1 >= self.candidates.len() {
                return None;
            }
            *index = failed + 1;
            tracing::warn!(
                from = %self.candidates[failed].name,
                to = %self.candidates[failed + 1].name,
                "model unavailable; falling back"
            );
        }
        Some(*index)
    }

    /// Generate text for one prompt, reporting failures as values.
    ///
    /// A blank prompt yields an empty string without calling the backend.
    pub async fn try_generate(&self, prompt: &str) -> Result<String, GenerationFailure> {
        if prompt.trim().is_empty() {
            return Ok(String::new());
        }

        let index = self.current_index();
        let Some(model) = self.candidates.get(index).map(|c| c.name.clone()) else {
            return Err(GenerationFailure::NoCandidates);
        };

        let error = match self.backend.generate(&model, prompt).await {
            Ok(text) => return Ok(text),
            Err(error) => error,
        };

        if !error.is_model_unavailable() {
            return Err(GenerationFailure::Request { model, error });
        }

        let Some(next) = self.advance_from(index) else {
            return Err(GenerationFailure::FallbackExhausted {
                attempted: vec![model],
                error,
            });
        };
        let retry_model = self.candidates[next].name.clone();

        match self.backend.generate(&retry_model, prompt).await {
            Ok(text) => Ok(text),
            Err(error) if error.is_model_unavailable() => {
                // The retry target is unavailable too; later calls start past it.
                self.advance_from(next);
                Err(GenerationFailure::FallbackExhausted {
                    attempted: vec![model, retry_model],
                    error,
                })
            }
            Err(error) => Err(GenerationFailure::Request {
                model: retry_model,
                error,
            }),
        }
    }

    /// Generate text for one prompt; failures become a placeholder string.
    pub async fn generate_text(&self, prompt: &str) -> String {
        match self.try_generate(prompt).await {
            Ok(text) => text,
            Err(failure) => {
                tracing::warn!(error = %failure, "generation failed for prompt");
                failure.placeholder()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn merge_keeps_first_seen_order() {
        let merged = merge_candidates(
            &names(&["gemini-2.5-flash", "gemini-1.5-pro"]),
            &names(&["gemini-1.5-pro", " ", "gemini-exp", "gemini-2.5-flash"]),
        );
        assert_eq!(
            merged,
            names(&["gemini-2.5-flash", "gemini-1.5-pro", "gemini-exp"])
        );
    }

    #[test]
    fn empty_discovery_keeps_preferences() {
        let merged = merge_candidates(&names(&["a", "b"]), &[]);
        assert_eq!(merged, names(&["a", "b"]));
    }

    #[test]
    fn placeholder_variants() {
        let exhausted = GenerationFailure::FallbackExhausted {
            attempted: names(&["a", "b"]),
            error: LLMError::ModelNotFound {
                model: "b".into(),
                message: "HTTP 404".into(),
            },
        };
        assert_eq!(
            exhausted.placeholder(),
            "Error generating content: Model 'b' is not available: HTTP 404\nTip: Set GEMINI_MODEL to one of: a, b"
        );

        let request = GenerationFailure::Request {
            model: "a".into(),
            error: LLMError::RateLimit("HTTP 429".into()),
        };
        assert_eq!(
            request.placeholder(),
            "Error generating content: Rate limit exceeded: HTTP 429"
        );
    }
}
