use std::sync::Arc;

use crate::application::ports::{TranscriptionError, TranscriptionProvider};
use crate::domain::{AudioPayload, Transcript};

/// Turns an audio payload into a transcript via the configured provider.
/// Transcription failures are terminal: text cannot be fabricated locally.
pub struct TranscriptionService<P: ?Sized>
where
    P: TranscriptionProvider,
{
    provider: Arc<P>,
}

impl<P: ?Sized> TranscriptionService<P>
where
    P: TranscriptionProvider,
{
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    #[tracing::instrument(skip(self, audio), fields(bytes = audio.data().len()))]
    pub async fn transcribe(&self, audio: &AudioPayload) -> Result<Transcript, TranscriptionError> {
        if audio.is_empty() {
            return Err(TranscriptionError::MissingInput);
        }

        let transcript = self.provider.transcribe(audio).await?;

        tracing::info!(chars = transcript.as_str().len(), "Transcription completed");

        Ok(transcript)
    }
}
