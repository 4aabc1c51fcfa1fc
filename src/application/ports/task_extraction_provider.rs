use async_trait::async_trait;

use crate::domain::Transcript;

/// Extracts candidate task strings from a transcript. Best-effort by design;
/// callers degrade to the local splitter on any error or empty result.
#[async_trait]
pub trait TaskExtractionProvider: Send + Sync {
    async fn extract(&self, transcript: &Transcript) -> Result<Vec<String>, TaskExtractionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TaskExtractionError {
    #[error("extraction provider failed: {0}")]
    Provider(String),
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),
}
