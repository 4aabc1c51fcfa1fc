mod audio_payload;
mod remote_job;
mod task_list;
mod transcript;

pub use audio_payload::AudioPayload;
pub use remote_job::{JobId, JobState};
pub use task_list::TaskList;
pub use transcript::Transcript;
