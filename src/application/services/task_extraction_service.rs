use std::sync::Arc;

use crate::application::ports::TaskExtractionProvider;
use crate::application::services::fallback_splitter::split_into_tasks;
use crate::domain::{TaskList, Transcript};

const MAX_REMOTE_TASKS: usize = 15;

/// Splits a transcript into actionable tasks. Never fails outward: a provider
/// error or an empty provider result degrades to the local splitter, so the
/// caller always receives a list.
pub struct TaskExtractionService<P: ?Sized>
where
    P: TaskExtractionProvider,
{
    provider: Arc<P>,
}

impl<P: ?Sized> TaskExtractionService<P>
where
    P: TaskExtractionProvider,
{
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    #[tracing::instrument(skip(self, transcript))]
    pub async fn extract_tasks(&self, transcript: &str) -> TaskList {
        let Some(transcript) = Transcript::new(transcript) else {
            return TaskList::default();
        };

        match self.provider.extract(&transcript).await {
            Ok(tasks) if !tasks.is_empty() => {
                let tasks = TaskList::from_candidates(tasks, MAX_REMOTE_TASKS);
                tracing::info!(count = tasks.len(), "Remote task extraction completed");
                tasks
            }
            Ok(_) => {
                tracing::warn!("Extraction provider returned no tasks, degrading to local splitter");
                split_into_tasks(transcript.as_str())
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Extraction provider failed, degrading to local splitter"
                );
                split_into_tasks(transcript.as_str())
            }
        }
    }
}
