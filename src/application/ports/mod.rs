mod task_extraction_provider;
mod transcription_provider;

pub use task_extraction_provider::{TaskExtractionError, TaskExtractionProvider};
pub use transcription_provider::{TranscriptionError, TranscriptionProvider};
