use crate::config::constants::defaults;
use serde::{Deserialize, Serialize};

/// Segmentation and word-limit settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SegmentationConfig {
    /// Minimum words per segment (the final segment may be shorter)
    #[serde(default = "default_min_words")]
    pub min_words: usize,

    /// Maximum words accepted from one document before trimming
    #[serde(default = "default_max_words")]
    pub max_words: usize,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            min_words: default_min_words(),
            max_words: default_max_words(),
        }
    }
}

fn default_min_words() -> usize {
    defaults::MIN_WORDS_PER_SEGMENT
}

fn default_max_words() -> usize {
    defaults::DEFAULT_MAX_WORDS
}
