//! Transcription job port - Interface to the asynchronous transcription provider

use async_trait::async_trait;
use domain::{JobName, JobStatus};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for managing asynchronous transcription jobs
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TranscriptionJobPort: Send + Sync {
    /// Start a transcription job for the audio at `media_uri`.
    ///
    /// The provider generates and returns the job name.
    async fn start_job(&self, media_uri: &str) -> Result<JobName, ApplicationError>;

    /// Fetch the current status of a job
    async fn job_status(&self, job: &JobName) -> Result<JobStatus, ApplicationError>;

    /// Fetch the transcript of a completed job
    async fn fetch_transcript(&self, job: &JobName) -> Result<String, ApplicationError>;

    /// Delete a finished job from the provider
    async fn delete_job(&self, job: &JobName) -> Result<(), ApplicationError>;
}
