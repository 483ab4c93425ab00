//! Prompt templates keyed by (platform, tone).
//!
//! The registry is data only. Built-in templates cover every platform/tone
//! combination; `[templates.<platform>]` sections in `repurpose.toml` replace
//! individual entries.

use super::targets::{Platform, Tone};
use crate::config::TemplateOverrides;
use std::collections::HashMap;
use thiserror::Error;

/// Placeholder substituted with one segment's text
pub const CONTENT_PLACEHOLDER: &str = "{content}";
/// Optional placeholder substituted with the tone key
pub const TONE_PLACEHOLDER: &str = "{tone}";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromptError {
    #[error("Unsupported tone '{label}'. Expected one of {expected:?}")]
    UnsupportedTone {
        label: String,
        expected: Vec<&'static str>,
    },

    #[error("Unsupported platform '{label}'. Expected one of {expected:?}")]
    UnsupportedPlatform {
        label: String,
        expected: Vec<&'static str>,
    },

    #[error("No template configured for platform '{platform}' with tone '{tone}'")]
    MissingTemplate { platform: String, tone: String },

    #[error("Invalid template for '{platform}/{tone}': {reason}")]
    InvalidTemplate {
        platform: String,
        tone: String,
        reason: String,
    },
}

impl PromptError {
    pub fn unsupported_tone(label: &str) -> Self {
        Self::UnsupportedTone {
            label: label.to_string(),
            expected: Tone::labels(),
        }
    }

    pub fn unsupported_platform(label: &str) -> Self {
        Self::UnsupportedPlatform {
            label: label.to_string(),
            expected: Platform::labels(),
        }
    }
}

/// A parameterized instruction for the generation backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    body: String,
}

impl PromptTemplate {
    /// Create a template; the body must contain `{content}`.
    pub fn new(body: impl Into<String>) -> Result<Self, String> {
        let body = body.into();
        if !body.contains(CONTENT_PLACEHOLDER) {
            return Err(format!("template must contain {CONTENT_PLACEHOLDER}"));
        }
        Ok(Self { body })
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Expand the template for a tone and one segment's text.
    ///
    /// `{tone}` is filled before `{content}` so segment text is never rescanned.
    pub fn render(&self, tone: Tone, content: &str) -> String {
        self.body
            .replace(TONE_PLACEHOLDER, tone.key())
            .replace(CONTENT_PLACEHOLDER, content)
    }
}

/// Lookup table from (platform, tone) to a prompt template
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: HashMap<(Platform, Tone), PromptTemplate>,
}

impl TemplateRegistry {
    /// Registry without any templates
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry holding the built-in template for every combination
    pub fn builtin() -> Self {
        let templates = BUILTIN_TEMPLATES
            .iter()
            .map(|(platform, tone, body)| {
                (
                    (*platform, *tone),
                    PromptTemplate {
                        body: (*body).to_string(),
                    },
                )
            })
            .collect();
        Self { templates }
    }

    /// Built-in templates with configuration overrides applied
    pub fn with_overrides(overrides: &TemplateOverrides) -> Result<Self, PromptError> {
        let mut registry = Self::builtin();
        for (platform_key, tones) in overrides {
            let platform = Platform::from_label(platform_key)
                .ok_or_else(|| PromptError::unsupported_platform(platform_key))?;
            for (tone_key, body) in tones {
                let tone = Tone::from_label(tone_key)
                    .ok_or_else(|| PromptError::unsupported_tone(tone_key))?;
                let template = PromptTemplate::new(body.clone()).map_err(|reason| {
                    PromptError::InvalidTemplate {
                        platform: platform.key().to_string(),
                        tone: tone.key().to_string(),
                        reason,
                    }
                })?;
                tracing::debug!(
                    platform = platform.key(),
                    tone = tone.key(),
                    "template overridden from configuration"
                );
                registry.insert(platform, tone, template);
            }
        }
        Ok(registry)
    }

    pub fn insert(&mut self, platform: Platform, tone: Tone, template: PromptTemplate) {
        self.templates.insert((platform, tone), template);
    }

    /// Template for the combination, or `MissingTemplate`
    pub fn template_for(
        &self,
        platform: Platform,
        tone: Tone,
    ) -> Result<&PromptTemplate, PromptError> {
        self.templates
            .get(&(platform, tone))
            .ok_or_else(|| PromptError::MissingTemplate {
                platform: platform.key().to_string(),
                tone: tone.key().to_string(),
            })
    }

    pub fn contains(&self, platform: Platform, tone: Tone) -> bool {
        self.templates.contains_key(&(platform, tone))
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

const BUILTIN_TEMPLATES: &[(Platform, Tone, &str)] = &[
    (
        Platform::LinkedIn,
        Tone::Professional,
        "Rewrite the following text as a professional LinkedIn post of about 100–120 words. \
Use a formal, business-oriented tone suitable for industry professionals. \
Keep language precise, objective, and informative. Avoid emojis or slang. \
Emphasize key insights and end with a reflective question or thought-provoking statement.\n\n\
Content:\n{content}",
    ),
    (
        Platform::LinkedIn,
        Tone::Casual,
        "Rewrite the following text as a casual and engaging LinkedIn post (100–120 words). \
Use friendly, conversational language with occasional emojis and rhetorical questions. \
Make it sound like a personal insight shared by a professional, not a corporate statement.\n\n\
Content:\n{content}",
    ),
    (
        Platform::LinkedIn,
        Tone::Promotional,
        "Rewrite the following text as a promotional LinkedIn post (100–120 words). \
Use energetic, persuasive language focused on benefits and innovation. \
Encourage readers to take action or reflect on future opportunities. \
Add 3–5 relevant professional hashtags at the end.\n\n\
Content:\n{content}",
    ),
    (
        Platform::Instagram,
        Tone::Professional,
        "Create two short Instagram captions (under 80 words each) from the following content in a professional tone. \
Keep them polished but engaging. Avoid slang, keep one emoji if relevant, and include 3–5 professional hashtags.\n\n\
Content:\n{content}",
    ),
    (
        Platform::Instagram,
        Tone::Casual,
        "Create two Instagram captions (under 80 words each) using a casual, relatable tone. \
Use emojis, fun expressions, and hashtags that connect with the audience. \
Make it sound like a friendly, upbeat post from a creative marketer.\n\n\
Content:\n{content}",
    ),
    (
        Platform::Instagram,
        Tone::Promotional,
        "Write two catchy Instagram captions promoting this topic. \
Use exciting language, emojis, and 4–6 marketing hashtags. \
Focus on calls-to-action or benefits while keeping captions short and shareable.\n\n\
Content:\n{content}",
    ),
    (
        Platform::YouTube,
        Tone::Professional,
        "Write a 30-second YouTube Shorts script summarizing the following content in a professional tone. \
Use a confident, clear, and informative delivery style suitable for business or educational audiences. \
Avoid slang or excessive emotion.\n\n\
Content:\n{content}",
    ),
    (
        Platform::YouTube,
        Tone::Casual,
        "Write a 30-second YouTube Shorts script using a casual, energetic tone. \
Start with a catchy hook question or fun statement. \
Use conversational words and light humor to keep it engaging.\n\n\
Content:\n{content}",
    ),
    (
        Platform::YouTube,
        Tone::Promotional,
        "Write a short, high-energy YouTube Shorts script (around 30 seconds) promoting this topic. \
Use persuasive, motivational language with a clear call-to-action at the end. \
Start with a powerful hook to grab attention.\n\n\
Content:\n{content}",
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn builtin_covers_every_combination() {
        let registry = TemplateRegistry::builtin();
        assert_eq!(registry.len(), Platform::ALL.len() * Tone::ALL.len());
        for platform in Platform::ALL {
            for tone in Tone::ALL {
                let template = registry.template_for(platform, tone).unwrap();
                assert!(template.body().ends_with("Content:\n{content}"));
            }
        }
    }

    #[test]
    fn missing_combination_is_an_error() {
        let registry = TemplateRegistry::empty();
        let err = registry
            .template_for(Platform::Instagram, Tone::Casual)
            .unwrap_err();
        assert_eq!(
            err,
            PromptError::MissingTemplate {
                platform: "instagram".into(),
                tone: "casual".into()
            }
        );
    }

    #[test]
    fn render_substitutes_content() {
        let template = PromptTemplate::new("Summarize:\n{content}").unwrap();
        assert_eq!(template.render(Tone::Casual, "hello"), "Summarize:\nhello");
        assert!(PromptTemplate::new("no placeholder").is_err());
    }

    #[test]
    fn render_fills_tone_but_leaves_segment_text_alone() {
        let template = PromptTemplate::new("Write in a {tone} voice:\n{content}").unwrap();
        assert_eq!(
            template.render(Tone::Promotional, "use {tone} literally"),
            "Write in a promotional voice:\nuse {tone} literally"
        );
    }

    #[test]
    fn overrides_replace_single_entries() {
        let mut overrides: TemplateOverrides = BTreeMap::new();
        overrides.insert(
            "youtube".into(),
            BTreeMap::from([("casual".to_string(), "Hook:\n{content}".to_string())]),
        );

        let registry = TemplateRegistry::with_overrides(&overrides).unwrap();
        assert_eq!(
            registry
                .template_for(Platform::YouTube, Tone::Casual)
                .unwrap()
                .body(),
            "Hook:\n{content}"
        );
        assert_ne!(
            registry
                .template_for(Platform::YouTube, Tone::Professional)
                .unwrap()
                .body(),
            "Hook:\n{content}"
        );
    }

    #[test]
    fn invalid_overrides_are_rejected() {
        let mut overrides: TemplateOverrides = BTreeMap::new();
        overrides.insert(
            "mastodon".into(),
            BTreeMap::from([("casual".to_string(), "{content}".to_string())]),
        );
        assert!(matches!(
            TemplateRegistry::with_overrides(&overrides),
            Err(PromptError::UnsupportedPlatform { .. })
        ));

        let mut overrides: TemplateOverrides = BTreeMap::new();
        overrides.insert(
            "linkedin".into(),
            BTreeMap::from([("casual".to_string(), "missing placeholder".to_string())]),
        );
        assert!(matches!(
            TemplateRegistry::with_overrides(&overrides),
            Err(PromptError::InvalidTemplate { .. })
        ));
    }
}
