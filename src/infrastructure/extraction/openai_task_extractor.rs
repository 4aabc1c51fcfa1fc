use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;

use crate::application::ports::{TaskExtractionError, TaskExtractionProvider};
use crate::domain::Transcript;

const SYSTEM_PROMPT: &str =
    "You are a task extraction assistant. Return only a JSON array of strings with actionable tasks.";

// Models wrap the array in a fenced code block often enough to strip it here.
static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```json\n?|\n?```").expect("code fence pattern is valid"));

/// Direct extraction: one chat-completions call, the task list comes back as
/// JSON in the message content.
pub struct OpenAiTaskExtractor {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiTaskExtractor {
    pub fn new(api_key: String, base_url: Option<String>, model: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url.unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            model: model.unwrap_or_else(|| "gpt-4o-mini".to_string()),
        }
    }

    fn parse_tasks(content: &str) -> Result<Vec<String>, TaskExtractionError> {
        let cleaned = CODE_FENCE.replace_all(content.trim(), "");

        let value: serde_json::Value = serde_json::from_str(cleaned.trim())
            .map_err(|e| TaskExtractionError::InvalidResponse(format!("parse tasks: {}", e)))?;

        // Accept a bare array or an object nesting the array under "tasks".
        let items = match &value {
            serde_json::Value::Array(items) => items.as_slice(),
            serde_json::Value::Object(map) => map
                .get("tasks")
                .and_then(|v| v.as_array())
                .map(|a| a.as_slice())
                .unwrap_or_default(),
            _ => {
                return Err(TaskExtractionError::InvalidResponse(format!(
                    "expected a JSON array of tasks, got: {}",
                    value
                )));
            }
        };

        Ok(items
            .iter()
            .filter_map(|v| v.as_str())
            .map(str::to_string)
            .collect())
    }
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[async_trait]
impl TaskExtractionProvider for OpenAiTaskExtractor {
    async fn extract(
        &self,
        transcript: &Transcript,
    ) -> Result<Vec<String>, TaskExtractionError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": transcript.as_str() },
            ],
            "temperature": 0.3,
            "max_tokens": 500,
        });

        tracing::debug!(model = %self.model, "Requesting direct task extraction");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| TaskExtractionError::Provider(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TaskExtractionError::Provider(format!(
                "status {}: {}",
                status, body
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| TaskExtractionError::InvalidResponse(format!("parse response: {}", e)))?;

        let content = completion
            .choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .ok_or_else(|| {
                TaskExtractionError::InvalidResponse("completion carried no content".to_string())
            })?;

        let tasks = Self::parse_tasks(content)?;

        tracing::info!(count = tasks.len(), "Direct task extraction completed");

        Ok(tasks)
    }
}
