//! # repurpose-core - Runtime for repurpose
//!
//! `repurpose-core` turns long-form documents into platform-specific social
//! posts. It provides the building blocks used by the `repurpose` CLI and
//! HTTP server.
//!
//! ## Highlights
//!
//! - **Segmentation**: paragraph-aware chunking where every segment but the
//!   last meets a configurable minimum word count.
//! - **Prompt Templates**: a (platform, tone) registry with built-in
//!   templates for LinkedIn, Instagram and YouTube, overridable from
//!   `repurpose.toml`.
//! - **Resilient Generation**: a Gemini client that merges a static model
//!   preference list with discovered models and falls forward to the next
//!   candidate when a model is unavailable.
//! - **Per-request Failure Isolation**: a failed segment becomes a
//!   descriptive placeholder; the rest of the batch still completes.
//!
//! ## Architecture Overview
//!
//! - `config/`: `repurpose.toml` loader, defaults and API key resolution.
//! - `input/`: normalization, word limits and PDF/DOCX text extraction.
//! - `segmentation/`: paragraph splitting and segment accumulation.
//! - `prompts/`: tones, platforms, templates and prompt expansion.
//! - `gemini/`: REST client for `generateContent` and `models.list`.
//! - `llm/`: backend trait, Gemini backend and the fallback client.
//! - `pipeline/`: orchestration, progress accounting and output combining.
//! - `storage/`: markdown-backed saved posts.
//! - `service`: validated request/response surface shared by CLI and server.
//!
//! ## Quickstart
//!
//! ```rust,ignore
//! use repurpose_core::{ConfigManager, GenerateRequest, NoProgress, RepurposeService};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), anyhow::Error> {
//!     let manager = ConfigManager::load()?;
//!     let service = RepurposeService::from_config(manager.config(), manager.workspace())?;
//!
//!     let request = GenerateRequest {
//!         text: Some(std::fs::read_to_string("article.md")?),
//!         tone: "Professional".into(),
//!         platforms: vec!["LinkedIn".into(), "YouTube".into()],
//!         ..Default::default()
//!     };
//!     let response = service.handle_generate(&request, &NoProgress).await?;
//!     for (platform, copy) in &response.outputs {
//!         println!("## {platform}\n{copy}\n");
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod gemini;
pub mod input;
pub mod llm;
pub mod pipeline;
pub mod prompts;
pub mod segmentation;
pub mod service;
pub mod storage;
pub mod ui;

pub use config::{ConfigManager, RepurposeConfig};
pub use llm::{
    BackendConnector, ClientConnector, GeminiConnector, GenerationBackend, GenerationClient,
    LLMError,
};
pub use pipeline::{
    NoProgress, PipelineError, PipelineOutcome, Progress, ProgressObserver, RepurposePipeline,
    combine,
};
pub use prompts::{Platform, PromptBuilder, PromptError, TemplateRegistry, Tone};
pub use segmentation::{Segment, segment};
pub use service::{
    AskRequest, AskResponse, GenerateRequest, GenerateResponse, RepurposeService, ServiceError,
};
pub use storage::{MarkdownPostStore, PostQuery, PostStore, SavedPost};
