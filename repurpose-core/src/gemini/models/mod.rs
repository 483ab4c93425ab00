use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part::text(text)],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// Single-turn request carrying one user prompt
    pub fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content::user_text(prompt)],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateContentResponse {
    /// Convenience text some gateways return alongside or instead of candidates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default, rename = "promptFeedback")]
    pub prompt_feedback: Option<Value>,
    #[serde(default, rename = "usageMetadata")]
    pub usage_metadata: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default, rename = "finishReason")]
    pub finish_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Generated text, trimmed.
    ///
    /// Uses the top-level `text` when it is non-empty, otherwise joins every
    /// candidate part in order with newlines. Returns an empty string when
    /// neither shape carries text.
    pub fn extract_text(&self) -> String {
        if let Some(text) = self.text.as_deref() {
            if !text.trim().is_empty() {
                return text.trim().to_string();
            }
        }

        self.candidates
            .iter()
            .filter_map(|candidate| candidate.content.as_ref())
            .flat_map(|content| content.parts.iter())
            .filter_map(|part| part.text.as_deref())
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }
}

/// One page of `GET /models`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListModelsResponse {
    #[serde(default)]
    pub models: Vec<ModelInfo>,
    #[serde(default, rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelInfo {
    /// Resource name, e.g. `models/gemini-1.5-pro`
    pub name: String,
    #[serde(default, rename = "supportedGenerationMethods")]
    pub supported_generation_methods: Vec<String>,
}

impl ModelInfo {
    /// Name without the `models/` resource prefix
    pub fn id(&self) -> &str {
        self.name.strip_prefix("models/").unwrap_or(&self.name)
    }

    pub fn supports(&self, method: &str) -> bool {
        self.supported_generation_methods
            .iter()
            .any(|supported| supported == method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn top_level_text_wins() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "text": "  direct answer \n",
            "candidates": [{"content": {"parts": [{"text": "ignored"}]}}]
        }))
        .unwrap();
        assert_eq!(response.extract_text(), "direct answer");
    }

    #[test]
    fn candidate_parts_are_joined_in_order() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "first"}, {"text": "second"}]}},
                {"content": {"parts": [{}, {"text": "third"}]}, "finishReason": "STOP"}
            ]
        }))
        .unwrap();
        assert_eq!(response.extract_text(), "first\nsecond\nthird");
    }

    #[test]
    fn blank_shapes_yield_empty_string() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "text": "   ",
            "candidates": [{"finishReason": "SAFETY"}]
        }))
        .unwrap();
        assert_eq!(response.extract_text(), "");

        let empty: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty.extract_text(), "");
    }

    #[test]
    fn model_info_strips_prefix() {
        let info: ModelInfo = serde_json::from_value(json!({
            "name": "models/gemini-1.5-flash",
            "supportedGenerationMethods": ["generateContent", "countTokens"]
        }))
        .unwrap();
        assert_eq!(info.id(), "gemini-1.5-flash");
        assert!(info.supports("generateContent"));
        assert!(!info.supports("embedContent"));
    }

    #[test]
    fn request_serializes_as_single_user_turn() {
        let request = GenerateContentRequest::from_prompt("hi");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"contents": [{"role": "user", "parts": [{"text": "hi"}]}]})
        );
    }
}
