use super::targets::{Platform, Tone};
use super::templates::{PromptError, TemplateRegistry};
use crate::segmentation::Segment;
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

/// One prompt paired with the platform and segment it was built from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    pub platform: Platform,
    pub segment_index: usize,
    pub prompt: String,
}

/// Prompts per platform, in request order, each list in segment order
#[derive(Debug, Clone, Default)]
pub struct PromptPlan {
    prompts: IndexMap<Platform, Vec<GenerationRequest>>,
}

impl PromptPlan {
    /// Total number of prompts across all platforms
    pub fn total(&self) -> usize {
        self.prompts.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn platforms(&self) -> impl Iterator<Item = Platform> + '_ {
        self.prompts.keys().copied()
    }

    pub fn for_platform(&self, platform: Platform) -> &[GenerationRequest] {
        self.prompts
            .get(&platform)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Platform, &[GenerationRequest])> {
        self.prompts
            .iter()
            .map(|(platform, requests)| (*platform, requests.as_slice()))
    }

    /// Every request in batch order: platform by platform, segment by segment
    pub fn requests(&self) -> impl Iterator<Item = &GenerationRequest> {
        self.prompts.values().flatten()
    }

    /// Prompt strings keyed by platform key
    pub fn into_prompt_map(self) -> IndexMap<&'static str, Vec<String>> {
        self.prompts
            .into_iter()
            .map(|(platform, requests)| {
                (
                    platform.key(),
                    requests.into_iter().map(|r| r.prompt).collect(),
                )
            })
            .collect()
    }
}

/// Binds a tone and a set of platforms to a template registry
#[derive(Debug, Clone)]
pub struct PromptBuilder<'a> {
    registry: &'a TemplateRegistry,
    tone: Tone,
    platforms: IndexSet<Platform>,
}

impl<'a> PromptBuilder<'a> {
    /// Resolve display labels. Duplicate platforms collapse to their first occurrence.
    pub fn new<S: AsRef<str>>(
        registry: &'a TemplateRegistry,
        tone_label: &str,
        platform_labels: &[S],
    ) -> Result<Self, PromptError> {
        let tone =
            Tone::from_label(tone_label).ok_or_else(|| PromptError::unsupported_tone(tone_label))?;

        let mut platforms = IndexSet::with_capacity(platform_labels.len());
        for label in platform_labels {
            let label = label.as_ref();
            let platform = Platform::from_label(label)
                .ok_or_else(|| PromptError::unsupported_platform(label))?;
            platforms.insert(platform);
        }

        Ok(Self::with_targets(registry, tone, platforms))
    }

    pub fn with_targets(
        registry: &'a TemplateRegistry,
        tone: Tone,
        platforms: impl IntoIterator<Item = Platform>,
    ) -> Self {
        Self {
            registry,
            tone,
            platforms: platforms.into_iter().collect(),
        }
    }

    pub fn tone(&self) -> Tone {
        self.tone
    }

    pub fn platforms(&self) -> impl Iterator<Item = Platform> + '_ {
        self.platforms.iter().copied()
    }

    /// Expand each platform's template once per non-empty segment.
    pub fn build_prompts(&self, segments: &[Segment]) -> Result<PromptPlan, PromptError> {
        let mut prompts = IndexMap::with_capacity(self.platforms.len());

        for platform in &self.platforms {
            let template = self.registry.template_for(*platform, self.tone)?;
            let requests = segments
                .iter()
                .enumerate()
                .filter_map(|(segment_index, segment)| {
                    let content = segment.text().trim();
                    (!content.is_empty()).then(|| GenerationRequest {
                        platform: *platform,
                        segment_index,
                        prompt: template.render(self.tone, content),
                    })
                })
                .collect::<Vec<_>>();
            prompts.insert(*platform, requests);
        }

        let plan = PromptPlan { prompts };
        tracing::debug!(
            tone = self.tone.key(),
            platforms = self.platforms.len(),
            prompts = plan.total(),
            "built prompts"
        );
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts::templates::PromptTemplate;

    fn segments(texts: &[&str]) -> Vec<Segment> {
        texts.iter().map(|t| Segment::new(*t)).collect()
    }

    #[test]
    fn unknown_labels_are_rejected_with_name() {
        let registry = TemplateRegistry::builtin();

        let err = PromptBuilder::new(&registry, "Snarky", &["LinkedIn"]).unwrap_err();
        assert!(err.to_string().contains("Snarky"));
        assert!(matches!(err, PromptError::UnsupportedTone { .. }));

        let err = PromptBuilder::new(&registry, "Casual", &["LinkedIn", "MySpace"]).unwrap_err();
        assert!(err.to_string().contains("MySpace"));
        assert!(matches!(err, PromptError::UnsupportedPlatform { .. }));
    }

    #[test]
    fn one_prompt_per_non_empty_segment_in_order() {
        let registry = TemplateRegistry::builtin();
        let builder =
            PromptBuilder::new(&registry, "Professional", &["YouTube", "LinkedIn"]).unwrap();
        let plan = builder
            .build_prompts(&segments(&["first", "   ", "second"]))
            .unwrap();

        let platforms: Vec<Platform> = plan.platforms().collect();
        assert_eq!(platforms, vec![Platform::YouTube, Platform::LinkedIn]);
        assert_eq!(plan.total(), 4);

        let youtube = plan.for_platform(Platform::YouTube);
        assert_eq!(youtube.len(), 2);
        assert_eq!(youtube[0].segment_index, 0);
        assert_eq!(youtube[1].segment_index, 2);
        assert!(youtube[0].prompt.ends_with("Content:\nfirst"));
        assert!(youtube[1].prompt.ends_with("Content:\nsecond"));
    }

    #[test]
    fn duplicate_platforms_collapse() {
        let registry = TemplateRegistry::builtin();
        let builder =
            PromptBuilder::new(&registry, "casual", &["Instagram", "instagram"]).unwrap();
        let plan = builder.build_prompts(&segments(&["x"])).unwrap();
        assert_eq!(plan.platforms().count(), 1);
    }

    #[test]
    fn missing_template_propagates() {
        let mut registry = TemplateRegistry::empty();
        registry.insert(
            Platform::LinkedIn,
            Tone::Casual,
            PromptTemplate::new("{content}").unwrap(),
        );
        let builder = PromptBuilder::new(&registry, "Casual", &["LinkedIn", "YouTube"]).unwrap();
        let err = builder.build_prompts(&segments(&["x"])).unwrap_err();
        assert!(matches!(err, PromptError::MissingTemplate { .. }));
    }

    #[test]
    fn empty_segments_produce_empty_plan() {
        let registry = TemplateRegistry::builtin();
        let builder = PromptBuilder::new(&registry, "Casual", &["LinkedIn"]).unwrap();
        let plan = builder.build_prompts(&segments(&["", "  "])).unwrap();
        assert!(plan.is_empty());
        assert_eq!(plan.into_prompt_map()["linkedin"].len(), 0);
    }
}
