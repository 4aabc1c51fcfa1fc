use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::application::ports::{TranscriptionError, TranscriptionProvider};
use crate::infrastructure::jobs::JobPoller;

use super::assemblyai_transcriber::AssemblyAiTranscriber;
use super::openai_transcriber::OpenAiTranscriber;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TranscriberKind {
    OpenAi,
    AssemblyAi,
}

pub struct TranscriberFactory;

impl TranscriberFactory {
    pub fn create(
        kind: TranscriberKind,
        api_key: &str,
        base_url: Option<String>,
        model: Option<String>,
        language: Option<String>,
        poller: JobPoller,
        shutdown: CancellationToken,
    ) -> Result<Arc<dyn TranscriptionProvider>, TranscriptionError> {
        if api_key.is_empty() {
            return Err(TranscriptionError::Provider(
                "API key required for transcription provider".to_string(),
            ));
        }

        match kind {
            TranscriberKind::OpenAi => Ok(Arc::new(OpenAiTranscriber::new(
                api_key.to_string(),
                base_url,
                model,
                language,
            ))),
            TranscriberKind::AssemblyAi => Ok(Arc::new(AssemblyAiTranscriber::new(
                api_key.to_string(),
                base_url,
                language,
                poller,
                shutdown,
            ))),
        }
    }
}
