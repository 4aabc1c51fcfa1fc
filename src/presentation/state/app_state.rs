use std::sync::Arc;

use crate::application::ports::{TaskExtractionProvider, TranscriptionProvider};
use crate::application::services::{TaskExtractionService, TranscriptionService};

pub struct AppState<T: ?Sized, X: ?Sized>
where
    T: TranscriptionProvider,
    X: TaskExtractionProvider,
{
    pub transcription_service: Arc<TranscriptionService<T>>,
    pub task_extraction_service: Arc<TaskExtractionService<X>>,
}

impl<T: ?Sized, X: ?Sized> Clone for AppState<T, X>
where
    T: TranscriptionProvider,
    X: TaskExtractionProvider,
{
    fn clone(&self) -> Self {
        Self {
            transcription_service: Arc::clone(&self.transcription_service),
            task_extraction_service: Arc::clone(&self.task_extraction_service),
        }
    }
}
