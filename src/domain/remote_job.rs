use std::fmt;

/// Provider-side identifier of an asynchronous job. Opaque; the only nonce
/// distinguishing overlapping submissions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Observed state of a remote job. The result payload only exists in the
/// terminal `Completed` state; `Error` carries the provider's message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobState<T> {
    Queued,
    Processing,
    Completed(T),
    Error(String),
}
