use async_trait::async_trait;

use crate::domain::{AudioPayload, Transcript};

/// Converts an audio clip into text. Implementations may answer in a single
/// call or drive a provider-side job to completion; callers cannot tell the
/// difference.
#[async_trait]
pub trait TranscriptionProvider: Send + Sync {
    async fn transcribe(&self, audio: &AudioPayload) -> Result<Transcript, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("no audio payload supplied")]
    MissingInput,
    #[error("provider returned no usable text")]
    EmptyTranscript,
    #[error("transcription provider failed: {0}")]
    Provider(String),
}
