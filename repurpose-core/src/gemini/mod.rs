//! Gemini REST client
//!
//! Thin HTTP layer over `generateContent` and `models.list`. Error
//! classification for the fallback logic lives in `llm::providers::gemini`.

pub mod client;
pub mod models;

pub use client::{Client, ClientConfig, GeminiError};
pub use models::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, ListModelsResponse,
    ModelInfo, Part,
};
