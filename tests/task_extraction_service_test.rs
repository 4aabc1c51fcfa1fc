use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use voicetasks::application::ports::{TaskExtractionError, TaskExtractionProvider};
use voicetasks::application::services::{TaskExtractionService, split_into_tasks};
use voicetasks::domain::Transcript;

const TRANSCRIPT: &str = "I need to buy milk and walk the dog, then email the report";

struct ScriptedExtractor {
    calls: Arc<AtomicUsize>,
    response: Result<Vec<&'static str>, &'static str>,
}

impl ScriptedExtractor {
    fn returning(tasks: Vec<&'static str>) -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            response: Ok(tasks),
        }
    }

    fn failing(message: &'static str) -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            response: Err(message),
        }
    }
}

#[async_trait::async_trait]
impl TaskExtractionProvider for ScriptedExtractor {
    async fn extract(
        &self,
        _transcript: &Transcript,
    ) -> Result<Vec<String>, TaskExtractionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            Ok(tasks) => Ok(tasks.iter().map(|t| t.to_string()).collect()),
            Err(message) => Err(TaskExtractionError::Provider(message.to_string())),
        }
    }
}

#[tokio::test]
async fn given_blank_transcript_when_extracting_then_returns_empty_without_remote_call() {
    let extractor = Arc::new(ScriptedExtractor::returning(vec!["unused"]));
    let calls = Arc::clone(&extractor.calls);
    let service = TaskExtractionService::new(extractor);

    let tasks = service.extract_tasks("   ").await;

    assert!(tasks.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn given_provider_returns_tasks_when_extracting_then_passes_them_through_in_order() {
    let extractor = Arc::new(ScriptedExtractor::returning(vec![
        "Buy milk",
        "Walk the dog",
        "Email the report",
    ]));
    let service = TaskExtractionService::new(extractor);

    let tasks = service.extract_tasks(TRANSCRIPT).await;

    assert_eq!(
        tasks.as_slice(),
        ["Buy milk", "Walk the dog", "Email the report"]
    );
}

#[tokio::test]
async fn given_provider_repeats_tasks_when_extracting_then_deduplicates_preserving_order() {
    let extractor = Arc::new(ScriptedExtractor::returning(vec![
        "Buy milk",
        "Buy milk",
        "Email the report",
    ]));
    let service = TaskExtractionService::new(extractor);

    let tasks = service.extract_tasks(TRANSCRIPT).await;

    assert_eq!(tasks.as_slice(), ["Buy milk", "Email the report"]);
}

#[tokio::test]
async fn given_provider_returns_nothing_when_extracting_then_output_equals_fallback_split() {
    let extractor = Arc::new(ScriptedExtractor::returning(Vec::new()));
    let service = TaskExtractionService::new(extractor);

    let tasks = service.extract_tasks(TRANSCRIPT).await;

    assert_eq!(tasks, split_into_tasks(TRANSCRIPT));
    assert!(!tasks.is_empty());
}

#[tokio::test]
async fn given_provider_fails_when_extracting_then_error_is_absorbed_into_fallback_split() {
    let extractor = Arc::new(ScriptedExtractor::failing("enrichment backend down"));
    let service = TaskExtractionService::new(extractor);

    let tasks = service.extract_tasks(TRANSCRIPT).await;

    assert_eq!(tasks, split_into_tasks(TRANSCRIPT));
    assert!(!tasks.is_empty());
}
