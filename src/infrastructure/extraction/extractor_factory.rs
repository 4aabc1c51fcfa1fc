use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::application::ports::{TaskExtractionError, TaskExtractionProvider};
use crate::infrastructure::jobs::JobPoller;

use super::assemblyai_task_extractor::AssemblyAiTaskExtractor;
use super::openai_task_extractor::OpenAiTaskExtractor;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExtractorKind {
    OpenAi,
    AssemblyAi,
}

pub struct ExtractorFactory;

impl ExtractorFactory {
    pub fn create(
        kind: ExtractorKind,
        api_key: &str,
        base_url: Option<String>,
        model: Option<String>,
        poller: JobPoller,
        shutdown: CancellationToken,
    ) -> Result<Arc<dyn TaskExtractionProvider>, TaskExtractionError> {
        if api_key.is_empty() {
            return Err(TaskExtractionError::Provider(
                "API key required for extraction provider".to_string(),
            ));
        }

        match kind {
            ExtractorKind::OpenAi => Ok(Arc::new(OpenAiTaskExtractor::new(
                api_key.to_string(),
                base_url,
                model,
            ))),
            ExtractorKind::AssemblyAi => Ok(Arc::new(AssemblyAiTaskExtractor::new(
                api_key.to_string(),
                base_url,
                poller,
                shutdown,
            ))),
        }
    }
}
