use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::domain::JobState;

/// Drives a provider-side asynchronous job to a terminal state by calling a
/// status source at a fixed interval. The remote provider gives no upper
/// bound on how long a job may sit in `queued`/`processing`, so every poll
/// loop runs under the `max_wait` deadline and honors the cancellation token.
#[derive(Debug, Clone, Copy)]
pub struct JobPoller {
    interval: Duration,
    max_wait: Duration,
}

impl JobPoller {
    pub fn new(interval: Duration, max_wait: Duration) -> Self {
        Self { interval, max_wait }
    }

    /// Polls `fetch_status` until `Completed` or `Error`. Sleeps for exactly
    /// the configured interval between polls; a provider-reported `error`
    /// status ends polling after that single poll. Transport failures are
    /// never retried here — they propagate as `PollError::Transport`,
    /// distinguishable from a job that failed remotely.
    pub async fn poll_until_terminal<T, E, F, Fut>(
        &self,
        cancel: &CancellationToken,
        mut fetch_status: F,
    ) -> Result<T, PollError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<JobState<T>, E>>,
    {
        let poll_loop = async {
            loop {
                let state = fetch_status().await.map_err(PollError::Transport)?;

                match state {
                    JobState::Completed(result) => return Ok(result),
                    JobState::Error(message) => return Err(PollError::Job(message)),
                    JobState::Queued | JobState::Processing => {
                        tokio::time::sleep(self.interval).await;
                    }
                }
            }
        };

        tokio::select! {
            _ = cancel.cancelled() => Err(PollError::Cancelled),
            outcome = tokio::time::timeout(self.max_wait, poll_loop) => match outcome {
                Ok(result) => result,
                Err(_) => Err(PollError::TimedOut(self.max_wait)),
            },
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PollError<E> {
    #[error("job failed: {0}")]
    Job(String),
    #[error("poll transport failed: {0}")]
    Transport(E),
    #[error("job did not reach a terminal state within {0:?}")]
    TimedOut(Duration),
    #[error("polling cancelled")]
    Cancelled,
}
