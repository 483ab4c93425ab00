#![allow(dead_code)]

use async_trait::async_trait;
use repurpose_core::llm::{GenerationBackend, LLMError};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// How a scripted model answers
#[derive(Clone, Debug)]
pub enum Behavior {
    /// Reply with `<model>: <last prompt line>`
    Echo,
    /// Reply with fixed text
    Reply(String),
    /// Echo after sleeping for the first `(marker, millis)` the prompt contains
    DelayedEcho(Vec<(String, u64)>),
    NotFound,
    RateLimit,
}

/// Backend whose per-model behaviour is fixed up front
pub struct ScriptedBackend {
    behaviors: HashMap<String, Behavior>,
    fallback: Behavior,
    discovered: Result<Vec<String>, LLMError>,
    calls: Mutex<Vec<String>>,
    finished: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub fn new(fallback: Behavior) -> Self {
        Self {
            behaviors: HashMap::new(),
            fallback,
            discovered: Ok(Vec::new()),
            calls: Mutex::new(Vec::new()),
            finished: Mutex::new(Vec::new()),
        }
    }

    pub fn with_model(mut self, model: &str, behavior: Behavior) -> Self {
        self.behaviors.insert(model.to_string(), behavior);
        self
    }

    pub fn with_discovery(mut self, discovered: Result<Vec<String>, LLMError>) -> Self {
        self.discovered = discovered;
        self
    }

    /// Model names in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Successful replies in completion order
    pub fn finished(&self) -> Vec<String> {
        self.finished.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationBackend for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, model: &str, prompt: &str) -> Result<String, LLMError> {
        self.calls.lock().unwrap().push(model.to_string());
        let behavior = self.behaviors.get(model).unwrap_or(&self.fallback);
        let echo = format!("{model}: {}", prompt.lines().last().unwrap_or_default());
        let reply = match behavior {
            Behavior::Echo => echo,
            Behavior::Reply(text) => text.clone(),
            Behavior::DelayedEcho(delays) => {
                let millis = delays
                    .iter()
                    .find(|(marker, _)| prompt.contains(marker.as_str()))
                    .map_or(0, |(_, millis)| *millis);
                tokio::time::sleep(Duration::from_millis(millis)).await;
                echo
            }
            Behavior::NotFound => {
                return Err(LLMError::ModelNotFound {
                    model: model.to_string(),
                    message: "HTTP 404: model not found".to_string(),
                });
            }
            Behavior::RateLimit => {
                return Err(LLMError::RateLimit("HTTP 429: quota exceeded".to_string()));
            }
        };
        self.finished.lock().unwrap().push(reply.clone());
        Ok(reply)
    }

    async fn list_models(&self) -> Result<Vec<String>, LLMError> {
        self.discovered.clone()
    }
}

/// `n` distinct whitespace-separated words
pub fn words(n: usize, tag: &str) -> String {
    (0..n)
        .map(|i| format!("{tag}{i}"))
        .collect::<Vec<_>>()
        .join(" ")
}
