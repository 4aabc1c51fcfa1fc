pub mod extraction;
pub mod jobs;
pub mod observability;
pub mod transcription;
