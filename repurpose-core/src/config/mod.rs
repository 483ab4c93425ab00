//! Configuration Module
//!
//! Loads `repurpose.toml` and exposes the typed sections used by the
//! pipeline, the storage layer and the HTTP surface.

pub mod api_keys;
pub mod constants;
pub mod core;
pub mod loader;

pub use core::{GenerationConfig, SegmentationConfig, ServerConfig, StorageConfig};
pub use loader::{ConfigManager, RepurposeConfig, TemplateOverrides};
