//! Tones, platforms, prompt templates and prompt expansion.

pub mod builder;
pub mod targets;
pub mod templates;

pub use builder::{GenerationRequest, PromptBuilder, PromptPlan};
pub use targets::{Platform, Tone};
pub use templates::{
    CONTENT_PLACEHOLDER, PromptError, PromptTemplate, TONE_PLACEHOLDER, TemplateRegistry,
};
