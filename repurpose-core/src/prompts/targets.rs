use serde::{Deserialize, Serialize};
use std::fmt;

/// Stylistic preset applied to every prompt in one batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Professional,
    Casual,
    Promotional,
}

impl Tone {
    pub const ALL: [Tone; 3] = [Tone::Professional, Tone::Casual, Tone::Promotional];

    /// Stable internal key used in template lookups and config files
    pub fn key(self) -> &'static str {
        match self {
            Tone::Professional => "professional",
            Tone::Casual => "casual",
            Tone::Promotional => "promotional",
        }
    }

    /// Display label accepted from users
    pub fn label(self) -> &'static str {
        match self {
            Tone::Professional => "Professional",
            Tone::Casual => "Casual",
            Tone::Promotional => "Promotional",
        }
    }

    /// Resolve a display label or internal key. Matching is exact.
    pub fn from_label(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tone| tone.label() == value || tone.key() == value)
    }

    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|tone| tone.label()).collect()
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Target output channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    LinkedIn,
    Instagram,
    YouTube,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::LinkedIn, Platform::Instagram, Platform::YouTube];

    pub fn key(self) -> &'static str {
        match self {
            Platform::LinkedIn => "linkedin",
            Platform::Instagram => "instagram",
            Platform::YouTube => "youtube",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Platform::LinkedIn => "LinkedIn",
            Platform::Instagram => "Instagram",
            Platform::YouTube => "YouTube",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|platform| platform.label() == value || platform.key() == value)
    }

    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|platform| platform.label()).collect()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_and_keys_resolve() {
        assert_eq!(Tone::from_label("Professional"), Some(Tone::Professional));
        assert_eq!(Tone::from_label("casual"), Some(Tone::Casual));
        assert_eq!(Tone::from_label("Sarcastic"), None);
        assert_eq!(Tone::from_label("PROFESSIONAL"), None);

        assert_eq!(Platform::from_label("YouTube"), Some(Platform::YouTube));
        assert_eq!(Platform::from_label("linkedin"), Some(Platform::LinkedIn));
        assert_eq!(Platform::from_label("TikTok"), None);
    }

    #[test]
    fn serde_uses_internal_keys() {
        assert_eq!(
            serde_json::to_string(&Platform::LinkedIn).unwrap(),
            "\"linkedin\""
        );
        let tone: Tone = serde_json::from_str("\"promotional\"").unwrap();
        assert_eq!(tone, Tone::Promotional);
    }
}
