use async_trait::async_trait;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use crate::application::ports::{TaskExtractionError, TaskExtractionProvider};
use crate::domain::{JobId, JobState, Transcript};
use crate::infrastructure::jobs::{JobPoller, PollError};

const MAX_DERIVED_TASKS: usize = 15;
const MIN_TASK_CHARS: usize = 2;

/// Entity-derived extraction: submit the transcript for enrichment (entity
/// detection plus chapter summarization), poll the job to completion, then
/// derive candidate tasks from the detected entities and chapter summaries.
pub struct AssemblyAiTaskExtractor {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    poller: JobPoller,
    shutdown: CancellationToken,
}

impl AssemblyAiTaskExtractor {
    pub fn new(
        api_key: String,
        base_url: Option<String>,
        poller: JobPoller,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| "https://api.assemblyai.com".to_string()),
            poller,
            shutdown,
        }
    }

    async fn submit(&self, transcript: &Transcript) -> Result<JobId, TaskExtractionError> {
        let url = format!("{}/v2/analysis", self.base_url);
        let body = serde_json::json!({
            "text": transcript.as_str(),
            "entity_detection": true,
            "auto_chapters": true,
        });

        let response = self
            .client
            .post(&url)
            .header("authorization", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| TaskExtractionError::Provider(format!("submit request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TaskExtractionError::Provider(format!(
                "submit returned {}: {}",
                status, body
            )));
        }

        let result: SubmitResponse = response
            .json()
            .await
            .map_err(|e| TaskExtractionError::InvalidResponse(format!("parse submit: {}", e)))?;

        Ok(JobId::new(result.id))
    }

    async fn fetch_job_state(
        &self,
        job_id: &JobId,
    ) -> Result<JobState<AnalysisResult>, TaskExtractionError> {
        let url = format!("{}/v2/analysis/{}", self.base_url, job_id);

        let response = self
            .client
            .get(&url)
            .header("authorization", &self.api_key)
            .send()
            .await
            .map_err(|e| TaskExtractionError::Provider(format!("poll request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TaskExtractionError::Provider(format!(
                "poll returned {}: {}",
                status, body
            )));
        }

        let result: AnalysisJobResponse = response
            .json()
            .await
            .map_err(|e| TaskExtractionError::InvalidResponse(format!("parse poll: {}", e)))?;

        match result.status.as_str() {
            "queued" => Ok(JobState::Queued),
            "processing" => Ok(JobState::Processing),
            "completed" => Ok(JobState::Completed(AnalysisResult {
                entities: result.entities,
                chapters: result.chapters,
            })),
            "error" => Ok(JobState::Error(
                result
                    .error
                    .unwrap_or_else(|| "unknown provider error".to_string()),
            )),
            other => Err(TaskExtractionError::Provider(format!(
                "unexpected job status: {}",
                other
            ))),
        }
    }

    /// Union of entity texts that start uppercase and chapter summaries,
    /// first-seen order, short entries dropped.
    fn derive_tasks(result: AnalysisResult) -> Vec<String> {
        let entity_candidates = result
            .entities
            .into_iter()
            .map(|e| e.text)
            .filter(|text| text.chars().next().is_some_and(char::is_uppercase));
        let chapter_candidates = result.chapters.into_iter().map(|c| c.summary);

        let mut tasks: Vec<String> = Vec::new();
        for candidate in entity_candidates.chain(chapter_candidates) {
            let candidate = candidate.trim().to_string();
            if candidate.chars().count() <= MIN_TASK_CHARS {
                continue;
            }
            if !tasks.contains(&candidate) {
                tasks.push(candidate);
            }
            if tasks.len() >= MAX_DERIVED_TASKS {
                break;
            }
        }
        tasks
    }
}

struct AnalysisResult {
    entities: Vec<Entity>,
    chapters: Vec<Chapter>,
}

#[derive(Deserialize)]
struct SubmitResponse {
    id: String,
}

#[derive(Deserialize)]
struct AnalysisJobResponse {
    status: String,
    #[serde(default)]
    entities: Vec<Entity>,
    #[serde(default)]
    chapters: Vec<Chapter>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct Entity {
    text: String,
}

#[derive(Deserialize)]
struct Chapter {
    summary: String,
}

#[async_trait]
impl TaskExtractionProvider for AssemblyAiTaskExtractor {
    async fn extract(
        &self,
        transcript: &Transcript,
    ) -> Result<Vec<String>, TaskExtractionError> {
        let job_id = self.submit(transcript).await?;

        tracing::debug!(job_id = %job_id, "Enrichment job submitted");

        let result = self
            .poller
            .poll_until_terminal(&self.shutdown, || self.fetch_job_state(&job_id))
            .await
            .map_err(|e| match e {
                PollError::Transport(inner) => inner,
                other => TaskExtractionError::Provider(other.to_string()),
            })?;

        let tasks = Self::derive_tasks(result);

        tracing::info!(
            job_id = %job_id,
            count = tasks.len(),
            "Entity-derived task extraction completed"
        );

        Ok(tasks)
    }
}
