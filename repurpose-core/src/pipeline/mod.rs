//! Orchestration: segment, build prompts, generate, combine.
//!
//! Prompts run in batch order (platform by platform, segment by segment).
//! With `max_concurrency > 1` several calls are in flight at once, but results
//! are still consumed in batch order, so per-platform ordering and the
//! completed-call progress count hold either way.

pub mod combiner;
pub mod progress;

pub use combiner::combine;
pub use progress::{NoProgress, Progress, ProgressObserver, ProgressTracker};

use crate::config::RepurposeConfig;
use crate::llm::{ClientConnector, GenerationClient, LLMError};
use crate::prompts::{Platform, PromptBuilder, PromptError, TemplateRegistry, Tone};
use crate::segmentation::{self, Segment};
use futures::StreamExt;
use indexmap::IndexMap;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::OnceCell;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error("Generation backend unavailable: {0}")]
    BackendUnavailable(String),
}

impl From<LLMError> for PipelineError {
    fn from(error: LLMError) -> Self {
        PipelineError::BackendUnavailable(error.to_string())
    }
}

/// Why a batch had nothing to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyInput {
    NoText,
    NoSegments,
    NoPrompts,
}

impl EmptyInput {
    pub fn message(self) -> &'static str {
        match self {
            EmptyInput::NoText => "No text provided; nothing to repurpose.",
            EmptyInput::NoSegments => "No segments found in the provided text.",
            EmptyInput::NoPrompts => "No prompts were generated from the provided segments.",
        }
    }
}

/// Generated copy for one segment of one platform
#[derive(Debug, Clone, Serialize)]
pub struct SegmentResult {
    pub segment_index: usize,
    pub text: String,
    /// `text` is a failure placeholder
    pub failed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlatformOutput {
    pub platform: Platform,
    pub results: Vec<SegmentResult>,
    pub combined: String,
}

impl PlatformOutput {
    pub fn failures(&self) -> usize {
        self.results.iter().filter(|r| r.failed).count()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RepurposeOutput {
    pub tone: Tone,
    pub segments: Vec<Segment>,
    pub platforms: IndexMap<Platform, PlatformOutput>,
}

impl RepurposeOutput {
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Combined copy keyed by platform key, in request order
    pub fn outputs(&self) -> IndexMap<String, String> {
        self.platforms
            .iter()
            .map(|(platform, output)| (platform.key().to_string(), output.combined.clone()))
            .collect()
    }

    pub fn failures(&self) -> usize {
        self.platforms.values().map(PlatformOutput::failures).sum()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PipelineOutcome {
    Completed(RepurposeOutput),
    NothingToDo { reason: EmptyInput },
}

impl PipelineOutcome {
    pub fn output(&self) -> Option<&RepurposeOutput> {
        match self {
            PipelineOutcome::Completed(output) => Some(output),
            PipelineOutcome::NothingToDo { .. } => None,
        }
    }

    pub fn into_output(self) -> Option<RepurposeOutput> {
        match self {
            PipelineOutcome::Completed(output) => Some(output),
            PipelineOutcome::NothingToDo { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PipelineSettings {
    pub min_words: usize,
    pub max_concurrency: usize,
}

impl PipelineSettings {
    pub fn from_config(config: &RepurposeConfig) -> Self {
        Self {
            min_words: config.segmentation.min_words,
            max_concurrency: config.generation.max_concurrency,
        }
    }
}

pub struct RepurposePipeline {
    registry: Arc<TemplateRegistry>,
    /// `None` when the pipeline was built around a connected client
    connector: Option<Arc<dyn ClientConnector>>,
    client: OnceCell<Arc<GenerationClient>>,
    settings: PipelineSettings,
}

impl RepurposePipeline {
    pub fn new(
        registry: Arc<TemplateRegistry>,
        connector: Arc<dyn ClientConnector>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            registry,
            connector: Some(connector),
            client: OnceCell::new(),
            settings,
        }
    }

    /// Pipeline over an already connected client
    pub fn with_client(
        registry: Arc<TemplateRegistry>,
        client: Arc<GenerationClient>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            registry,
            connector: None,
            client: OnceCell::new_with(Some(client)),
            settings,
        }
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    pub fn settings(&self) -> PipelineSettings {
        self.settings
    }

    /// The shared generation client, connecting on first use.
    ///
    /// A failed connection is not cached; the next call tries again.
    pub async fn client(&self) -> Result<Arc<GenerationClient>, PipelineError> {
        let client = self
            .client
            .get_or_try_init(|| async {
                let connector = self.connector.as_ref().ok_or_else(|| {
                    PipelineError::BackendUnavailable("no connector configured".to_string())
                })?;
                let client = connector.connect().await?;
                Ok::<_, PipelineError>(Arc::new(client))
            })
            .await?;
        Ok(client.clone())
    }

    /// Segment raw text and repurpose it.
    ///
    /// Labels are resolved before anything else, so bad labels are reported
    /// even for blank text. When segmentation finds no paragraphs the whole
    /// trimmed text becomes one segment.
    pub async fn run<S: AsRef<str>>(
        &self,
        text: &str,
        tone_label: &str,
        platform_labels: &[S],
        observer: &dyn ProgressObserver,
    ) -> Result<PipelineOutcome, PipelineError> {
        let builder = PromptBuilder::new(&self.registry, tone_label, platform_labels)?;

        if text.trim().is_empty() {
            return Ok(PipelineOutcome::NothingToDo {
                reason: EmptyInput::NoText,
            });
        }

        let segments = segmentation::segment_or_whole(text, self.settings.min_words);
        self.execute(&builder, segments, observer).await
    }

    /// Repurpose caller-supplied segments without re-segmenting them.
    pub async fn run_segments<S: AsRef<str>>(
        &self,
        segments: Vec<Segment>,
        tone_label: &str,
        platform_labels: &[S],
        observer: &dyn ProgressObserver,
    ) -> Result<PipelineOutcome, PipelineError> {
        let builder = PromptBuilder::new(&self.registry, tone_label, platform_labels)?;
        self.execute(&builder, segments, observer).await
    }

    async fn execute(
        &self,
        builder: &PromptBuilder<'_>,
        segments: Vec<Segment>,
        observer: &dyn ProgressObserver,
    ) -> Result<PipelineOutcome, PipelineError> {
        if segments.is_empty() {
            return Ok(PipelineOutcome::NothingToDo {
                reason: EmptyInput::NoSegments,
            });
        }

        let plan = builder.build_prompts(&segments)?;
        if plan.is_empty() {
            return Ok(PipelineOutcome::NothingToDo {
                reason: EmptyInput::NoPrompts,
            });
        }

        let client = self.client().await?;
        let total = plan.total();
        let concurrency = self.settings.max_concurrency.max(1);
        tracing::info!(
            tone = builder.tone().key(),
            segments = segments.len(),
            prompts = total,
            concurrency,
            "starting generation batch"
        );

        let mut tracker = ProgressTracker::new(total);
        observer.on_progress(tracker.snapshot());

        let client_ref = client.as_ref();
        let mut calls = futures::stream::iter(plan.requests().cloned())
            .map(|request| async move {
                let outcome = client_ref.try_generate(&request.prompt).await;
                (request, outcome)
            })
            .buffered(concurrency);

        let mut platforms: IndexMap<Platform, Vec<SegmentResult>> =
            plan.platforms().map(|p| (p, Vec::new())).collect();

        while let Some((request, outcome)) = calls.next().await {
            let result = match outcome {
                Ok(text) => SegmentResult {
                    segment_index: request.segment_index,
                    text,
                    failed: false,
                },
                Err(failure) => {
                    tracing::warn!(
                        platform = request.platform.key(),
                        segment = request.segment_index,
                        error = %failure,
                        "segment generation failed"
                    );
                    SegmentResult {
                        segment_index: request.segment_index,
                        text: failure.placeholder(),
                        failed: true,
                    }
                }
            };
            platforms.entry(request.platform).or_default().push(result);
            observer.on_progress(tracker.record());
        }

        let platforms = platforms
            .into_iter()
            .map(|(platform, results)| {
                let combined = combine(results.iter().map(|r| r.text.as_str()));
                (
                    platform,
                    PlatformOutput {
                        platform,
                        results,
                        combined,
                    },
                )
            })
            .collect::<IndexMap<_, _>>();

        let output = RepurposeOutput {
            tone: builder.tone(),
            segments,
            platforms,
        };
        tracing::info!(
            platforms = output.platforms.len(),
            failures = output.failures(),
            "generation batch finished"
        );
        Ok(PipelineOutcome::Completed(output))
    }
}
