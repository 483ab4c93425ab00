//! Text generation: backend trait, Gemini backend and the fallback client.

pub mod client;
pub mod error_display;
pub mod factory;
pub mod provider;
pub mod providers;

pub use client::{
    CandidateModel, CandidateSource, GenerationClient, GenerationFailure, merge_candidates,
};
pub use factory::{BackendConnector, ClientConnector, GeminiConnector};
pub use provider::{GenerationBackend, LLMError};
pub use providers::GeminiProvider;
