mod fallback_splitter;
mod task_extraction_service;
mod transcription_service;

pub use fallback_splitter::{MAX_FALLBACK_TASKS, split_into_tasks};
pub use task_extraction_service::TaskExtractionService;
pub use transcription_service::TranscriptionService;
