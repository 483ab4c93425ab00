mod common;

use common::{Behavior, ScriptedBackend, words};
use repurpose_core::config::{GenerationConfig, RepurposeConfig};
use repurpose_core::llm::{BackendConnector, ClientConnector, GenerationClient, LLMError};
use repurpose_core::pipeline::{
    EmptyInput, NoProgress, PipelineError, PipelineOutcome, PipelineSettings, Progress,
    RepurposePipeline,
};
use repurpose_core::prompts::{Platform, PromptError, TemplateRegistry};
use repurpose_core::service::{GenerateRequest, RepurposeService};
use repurpose_core::storage::{MarkdownPostStore, PostQuery, PostStore};
use std::sync::{Arc, Mutex};

fn settings(max_concurrency: usize) -> PipelineSettings {
    PipelineSettings {
        min_words: 100,
        max_concurrency,
    }
}

fn pipeline(backend: Arc<ScriptedBackend>, max_concurrency: usize) -> RepurposePipeline {
    let client = GenerationClient::with_models(backend, ["model-a", "model-b"]);
    RepurposePipeline::with_client(
        Arc::new(TemplateRegistry::builtin()),
        Arc::new(client),
        settings(max_concurrency),
    )
}

#[tokio::test]
async fn single_paragraph_document_becomes_one_linkedin_post() {
    let backend = Arc::new(ScriptedBackend::new(Behavior::Reply("A LinkedIn post".into())));
    let pipeline = pipeline(backend.clone(), 1);

    let text = words(250, "w");
    let outcome = pipeline
        .run(&text, "Professional", &["LinkedIn"], &NoProgress)
        .await
        .unwrap();

    let output = outcome.into_output().expect("completed batch");
    assert_eq!(output.segment_count(), 1);
    assert_eq!(output.segments[0].word_count(), 250);
    assert_eq!(backend.calls().len(), 1);

    let outputs = output.outputs();
    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs["linkedin"], "A LinkedIn post");
}

#[tokio::test]
async fn per_segment_failures_become_placeholders() {
    let backend = Arc::new(ScriptedBackend::new(Behavior::RateLimit));
    let pipeline = pipeline(backend, 1);

    let outcome = pipeline
        .run("short text", "Casual", &["LinkedIn", "Instagram"], &NoProgress)
        .await
        .unwrap();
    let output = outcome.into_output().expect("completed batch");

    assert_eq!(output.failures(), 2);
    for platform in [Platform::LinkedIn, Platform::Instagram] {
        let combined = &output.platforms[&platform].combined;
        assert!(combined.starts_with("Error generating content:"));
        assert!(combined.contains("Rate limit"));
    }
}

#[tokio::test]
async fn outputs_keep_segment_order_and_skip_empty_results() {
    let backend = Arc::new(ScriptedBackend::new(Behavior::Echo));
    let pipeline = pipeline(backend, 4);

    let text = [words(120, "a"), words(130, "b"), words(110, "c")].join("\n\n");
    let output = pipeline
        .run(&text, "Promotional", &["YouTube", "LinkedIn"], &NoProgress)
        .await
        .unwrap()
        .into_output()
        .expect("completed batch");

    assert_eq!(output.segment_count(), 3);
    let keys: Vec<String> = output.outputs().keys().cloned().collect();
    assert_eq!(keys, vec!["youtube", "linkedin"]);

    let youtube = &output.platforms[&Platform::YouTube];
    let indices: Vec<usize> = youtube.results.iter().map(|r| r.segment_index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
    let paragraphs: Vec<&str> = youtube.combined.split("\n\n").collect();
    assert_eq!(paragraphs.len(), 3);
    assert!(paragraphs[0].starts_with("model-a: a0 "));
    assert!(paragraphs[1].starts_with("model-a: b0 "));
    assert!(paragraphs[2].starts_with("model-a: c0 "));
}

#[tokio::test]
async fn concurrent_calls_finishing_out_of_order_keep_segment_order() {
    let delays = vec![
        ("slow0 ".to_string(), 80),
        ("mid0 ".to_string(), 40),
        ("fast0 ".to_string(), 0),
    ];
    let backend = Arc::new(ScriptedBackend::new(Behavior::DelayedEcho(delays)));
    let pipeline = pipeline(backend.clone(), 4);

    let text = [words(120, "slow"), words(120, "mid"), words(120, "fast")].join("\n\n");
    let output = pipeline
        .run(&text, "Casual", &["LinkedIn", "Instagram"], &NoProgress)
        .await
        .unwrap()
        .into_output()
        .expect("completed batch");

    let finished = backend.finished();
    assert_eq!(finished.len(), 6);
    assert!(finished[0].starts_with("model-a: fast0 "));

    for platform in [Platform::LinkedIn, Platform::Instagram] {
        let results = &output.platforms[&platform].results;
        let indices: Vec<usize> = results.iter().map(|r| r.segment_index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert!(results[0].text.starts_with("model-a: slow0 "));
        assert!(results[1].text.starts_with("model-a: mid0 "));
        assert!(results[2].text.starts_with("model-a: fast0 "));
    }
}

#[tokio::test]
async fn progress_is_floored_monotonic_and_ends_at_100() {
    let backend = Arc::new(ScriptedBackend::new(Behavior::Echo));
    let pipeline = pipeline(backend, 2);

    let seen: Mutex<Vec<Progress>> = Mutex::new(Vec::new());
    let observer = |progress: Progress| seen.lock().unwrap().push(progress);

    let text = [words(100, "a"), words(100, "b"), words(100, "c")].join("\n\n");
    pipeline
        .run(&text, "Casual", &["LinkedIn", "Instagram", "YouTube"], &observer)
        .await
        .unwrap();

    let seen = seen.into_inner().unwrap();
    let completed: Vec<usize> = seen.iter().map(|p| p.completed).collect();
    assert_eq!(completed, (0..=9).collect::<Vec<_>>());
    for progress in &seen {
        assert_eq!(progress.total, 9);
        assert_eq!(progress.percent() as usize, 100 * progress.completed / 9);
    }
    assert_eq!(seen.last().map(|p| p.percent()), Some(100));
}

#[tokio::test]
async fn empty_inputs_are_nothing_to_do() {
    let backend = Arc::new(ScriptedBackend::new(Behavior::Echo));
    let pipeline = pipeline(backend.clone(), 1);

    let outcome = pipeline
        .run("  \n\n ", "Casual", &["LinkedIn"], &NoProgress)
        .await
        .unwrap();
    assert!(matches!(
        outcome,
        PipelineOutcome::NothingToDo {
            reason: EmptyInput::NoText
        }
    ));

    let outcome = pipeline
        .run_segments(Vec::new(), "Casual", &["LinkedIn"], &NoProgress)
        .await
        .unwrap();
    assert!(matches!(
        outcome,
        PipelineOutcome::NothingToDo {
            reason: EmptyInput::NoSegments
        }
    ));

    let outcome = pipeline
        .run_segments(
            vec![repurpose_core::Segment::new("   ")],
            "Casual",
            &["LinkedIn"],
            &NoProgress,
        )
        .await
        .unwrap();
    assert!(matches!(
        outcome,
        PipelineOutcome::NothingToDo {
            reason: EmptyInput::NoPrompts
        }
    ));
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn unknown_labels_fail_before_generation() {
    let backend = Arc::new(ScriptedBackend::new(Behavior::Echo));
    let pipeline = pipeline(backend.clone(), 1);

    let err = pipeline
        .run("text", "Whimsical", &["LinkedIn"], &NoProgress)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Prompt(PromptError::UnsupportedTone { .. })
    ));

    let err = pipeline
        .run("text", "Casual", &["Vine"], &NoProgress)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Vine"));
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn unknown_labels_are_reported_even_for_blank_text() {
    let backend = Arc::new(ScriptedBackend::new(Behavior::Echo));
    let pipeline = pipeline(backend.clone(), 1);

    let err = pipeline
        .run("   ", "Bogus", &["LinkedIn"], &NoProgress)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Prompt(PromptError::UnsupportedTone { .. })
    ));

    let err = pipeline
        .run("", "Casual", &["Nope"], &NoProgress)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Prompt(PromptError::UnsupportedPlatform { .. })
    ));
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn prebuilt_client_is_used_without_connecting() {
    let backend = Arc::new(ScriptedBackend::new(Behavior::Echo));
    let client = Arc::new(GenerationClient::with_models(backend, ["model-a"]));
    let pipeline = RepurposePipeline::with_client(
        Arc::new(TemplateRegistry::builtin()),
        client.clone(),
        settings(1),
    );

    let connected = pipeline.client().await.unwrap();
    assert!(Arc::ptr_eq(&connected, &client));
}

struct FailingConnector;

#[async_trait::async_trait]
impl ClientConnector for FailingConnector {
    async fn connect(&self) -> Result<GenerationClient, LLMError> {
        Err(LLMError::Authentication("No API key found for Gemini".to_string()))
    }
}

#[tokio::test]
async fn missing_credentials_surface_as_backend_unavailable() {
    let pipeline = RepurposePipeline::new(
        Arc::new(TemplateRegistry::builtin()),
        Arc::new(FailingConnector),
        settings(1),
    );

    let err = pipeline
        .run("some text", "Casual", &["LinkedIn"], &NoProgress)
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::BackendUnavailable(_)));

    // Nothing to do never needs a backend
    let outcome = pipeline
        .run("", "Casual", &["LinkedIn"], &NoProgress)
        .await
        .unwrap();
    assert!(matches!(outcome, PipelineOutcome::NothingToDo { .. }));
}

#[tokio::test]
async fn service_saves_outputs_and_reports_failures_without_saving() {
    let workspace = tempfile::tempdir().unwrap();
    let config = RepurposeConfig::default();

    let backend = Arc::new(ScriptedBackend::new(Behavior::Echo));
    let connector = Arc::new(BackendConnector::new(
        backend,
        GenerationConfig {
            discover_models: false,
            preferred_models: vec!["model-a".to_string()],
            ..GenerationConfig::default()
        },
    ));
    let service = RepurposeService::with_connector(&config, workspace.path(), connector).unwrap();

    let request = GenerateRequest {
        text: Some(words(40, "x")),
        tone: "Professional".into(),
        platforms: vec!["LinkedIn".into(), "YouTube".into()],
        project_title: Some("Quarterly update".into()),
        save: true,
        user_id: Some(3),
        ..GenerateRequest::default()
    };
    let response = service.handle_generate(&request, &NoProgress).await.unwrap();
    assert!(response.saved);
    assert_eq!(response.segment_count, 1);
    assert_eq!(response.outputs.len(), 2);

    let store = MarkdownPostStore::new(workspace.path().join(".repurpose/posts"));
    let posts = store
        .list(&PostQuery {
            user_id: Some(3),
            limit: 10,
            include_content: true,
        })
        .unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].platform, "youtube");
    assert_eq!(posts[0].title, "Quarterly update");

    let failing = Arc::new(BackendConnector::new(
        Arc::new(ScriptedBackend::new(Behavior::RateLimit)),
        GenerationConfig {
            discover_models: false,
            ..GenerationConfig::default()
        },
    ));
    let service = RepurposeService::with_connector(&config, workspace.path(), failing).unwrap();
    let request = GenerateRequest {
        save: false,
        project_title: None,
        ..request
    };
    let response = service.handle_generate(&request, &NoProgress).await.unwrap();
    assert!(!response.saved);
    assert!(
        response
            .outputs
            .values()
            .all(|copy| copy.starts_with("Error generating content:"))
    );
}

#[tokio::test]
async fn presegmented_requests_skip_segmentation() {
    let workspace = tempfile::tempdir().unwrap();
    let backend = Arc::new(ScriptedBackend::new(Behavior::Echo));
    let connector = Arc::new(BackendConnector::new(
        backend.clone(),
        GenerationConfig {
            discover_models: false,
            preferred_models: vec!["m".to_string()],
            ..GenerationConfig::default()
        },
    ));
    let service =
        RepurposeService::with_connector(&RepurposeConfig::default(), workspace.path(), connector)
            .unwrap();

    let request = GenerateRequest {
        segments: Some(vec![" one ".into(), "two".into()]),
        tone: "casual".into(),
        platforms: vec!["instagram".into()],
        ..GenerateRequest::default()
    };
    let response = service.handle_generate(&request, &NoProgress).await.unwrap();
    assert_eq!(response.segment_count, 2);
    assert_eq!(response.outputs["instagram"], "m: one\n\nm: two");
    assert_eq!(backend.calls().len(), 2);

    let answer = service.ask("What is a segment?").await.unwrap();
    assert_eq!(answer.response, "m: What is a segment?");
    assert!(service.ask("   ").await.is_err());
}
