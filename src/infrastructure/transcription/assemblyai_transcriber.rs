use async_trait::async_trait;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use crate::application::ports::{TranscriptionError, TranscriptionProvider};
use crate::domain::{AudioPayload, JobId, JobState, Transcript};
use crate::infrastructure::jobs::{JobPoller, PollError};

/// Job-based transcription: upload the audio, submit a transcription job,
/// then drive the job to a terminal state through the poller.
pub struct AssemblyAiTranscriber {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    language: String,
    poller: JobPoller,
    shutdown: CancellationToken,
}

impl AssemblyAiTranscriber {
    pub fn new(
        api_key: String,
        base_url: Option<String>,
        language: Option<String>,
        poller: JobPoller,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| "https://api.assemblyai.com".to_string()),
            language: language.unwrap_or_else(|| "en".to_string()),
            poller,
            shutdown,
        }
    }

    async fn upload(&self, data: &[u8]) -> Result<String, TranscriptionError> {
        let url = format!("{}/v2/upload", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("authorization", &self.api_key)
            .header("content-type", "application/octet-stream")
            .body(data.to_vec())
            .send()
            .await
            .map_err(|e| TranscriptionError::Provider(format!("upload request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TranscriptionError::Provider(format!(
                "upload returned {}: {}",
                status, body
            )));
        }

        let result: UploadResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::Provider(format!("parse upload response: {}", e)))?;

        Ok(result.upload_url)
    }

    async fn submit(&self, audio_url: &str) -> Result<JobId, TranscriptionError> {
        let url = format!("{}/v2/transcript", self.base_url);
        let body = serde_json::json!({
            "audio_url": audio_url,
            "language_code": self.language,
        });

        let response = self
            .client
            .post(&url)
            .header("authorization", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| TranscriptionError::Provider(format!("submit request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TranscriptionError::Provider(format!(
                "submit returned {}: {}",
                status, body
            )));
        }

        let result: SubmitResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::Provider(format!("parse submit response: {}", e)))?;

        Ok(JobId::new(result.id))
    }

    async fn fetch_job_state(&self, job_id: &JobId) -> Result<JobState<String>, TranscriptionError> {
        let url = format!("{}/v2/transcript/{}", self.base_url, job_id);

        let response = self
            .client
            .get(&url)
            .header("authorization", &self.api_key)
            .send()
            .await
            .map_err(|e| TranscriptionError::Provider(format!("poll request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TranscriptionError::Provider(format!(
                "poll returned {}: {}",
                status, body
            )));
        }

        let result: TranscriptJobResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::Provider(format!("parse poll response: {}", e)))?;

        match result.status.as_str() {
            "queued" => Ok(JobState::Queued),
            "processing" => Ok(JobState::Processing),
            "completed" => Ok(JobState::Completed(result.text.unwrap_or_default())),
            "error" => Ok(JobState::Error(
                result
                    .error
                    .unwrap_or_else(|| "unknown provider error".to_string()),
            )),
            other => Err(TranscriptionError::Provider(format!(
                "unexpected job status: {}",
                other
            ))),
        }
    }
}

#[derive(Deserialize)]
struct UploadResponse {
    upload_url: String,
}

#[derive(Deserialize)]
struct SubmitResponse {
    id: String,
}

#[derive(Deserialize)]
struct TranscriptJobResponse {
    status: String,
    text: Option<String>,
    error: Option<String>,
}

#[async_trait]
impl TranscriptionProvider for AssemblyAiTranscriber {
    async fn transcribe(&self, audio: &AudioPayload) -> Result<Transcript, TranscriptionError> {
        let upload_url = self.upload(audio.data()).await?;
        let job_id = self.submit(&upload_url).await?;

        tracing::debug!(job_id = %job_id, "Transcription job submitted");

        let text = self
            .poller
            .poll_until_terminal(&self.shutdown, || self.fetch_job_state(&job_id))
            .await
            .map_err(|e| match e {
                PollError::Transport(inner) => inner,
                other => TranscriptionError::Provider(other.to_string()),
            })?;

        tracing::info!(
            job_id = %job_id,
            chars = text.len(),
            "Asynchronous transcription completed"
        );

        Transcript::new(text).ok_or(TranscriptionError::EmptyTranscript)
    }
}
