//! # repurpose - Document to social post generator
//!
//! `repurpose` turns long-form writing into LinkedIn, Instagram and YouTube
//! copy. A document is split into paragraph-aligned segments, each segment is
//! expanded into a (platform, tone) prompt, and Gemini generates one post per
//! prompt with automatic fallback across models.
//!
//! ## Highlights
//!
//! - **Command line**: `generate`, `segment`, `templates`, `models`, `ask`,
//!   `history`, `serve` and `init` subcommands with progress bars on stderr.
//! - **HTTP API**: an `axum` server exposing generation, question answering
//!   and saved-post history as JSON.
//! - **Config-driven behavior**: segment sizing, model preferences, storage
//!   and template overrides all live in `repurpose.toml`.
//!
//! ## Quickstart
//!
//! ```bash
//! export GEMINI_API_KEY="your-key"
//!
//! # Repurpose a document for two platforms
//! repurpose generate --file article.pdf --tone Professional -p LinkedIn -p YouTube
//!
//! # Preview segment boundaries without calling the model
//! repurpose segment --file article.md --min-words 150
//!
//! # Serve the JSON API
//! repurpose serve --port 8000
//! ```
//!
//! The pipeline itself lives in [`repurpose_core`].

pub mod cli;
pub mod server;
