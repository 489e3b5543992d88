//! Speech-to-text service - Asynchronous transcription workflow
//!
//! Starting a job uploads the audio, kicks off a transcription job at the
//! provider and records the pair in the pending-cleanup registry. Clients
//! poll the job by name; a periodic sweep deletes the remote job and the
//! uploaded blob once the job reaches a terminal state.

use std::{fmt, sync::Arc};

use domain::{BlobKey, DomainError, JobName, JobStatus};
use tracing::{debug, info, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::{BlobStorePort, TranscriptionJobPort},
    registry::PendingCleanupRegistry,
};

/// Point-in-time view of a transcription job
#[derive(Debug, Clone)]
pub struct TranscriptionJobSnapshot {
    /// Provider-assigned job name
    pub job_name: JobName,
    /// Current job status
    pub status: JobStatus,
    /// Transcript text, present only once the job has completed
    pub transcript: Option<String>,
}

/// Service orchestrating asynchronous speech-to-text jobs
pub struct SpeechToTextService {
    blob_store: Arc<dyn BlobStorePort>,
    transcription: Arc<dyn TranscriptionJobPort>,
    registry: Arc<PendingCleanupRegistry>,
}

impl fmt::Debug for SpeechToTextService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpeechToTextService")
            .field("pending_cleanup", &self.registry.len())
            .finish_non_exhaustive()
    }
}

impl SpeechToTextService {
    /// Create a new speech-to-text service
    pub fn new(
        blob_store: Arc<dyn BlobStorePort>,
        transcription: Arc<dyn TranscriptionJobPort>,
        registry: Arc<PendingCleanupRegistry>,
    ) -> Self {
        Self {
            blob_store,
            transcription,
            registry,
        }
    }

    /// Upload audio and start a transcription job.
    ///
    /// Returns immediately with the job in `InProgress`; the transcript is
    /// never available at this point. If the provider rejects the job after
    /// the upload succeeded, the uploaded blob is deleted best-effort before
    /// the error is returned.
    #[instrument(skip(self, audio), fields(audio_size = audio.len()))]
    pub async fn start_job(
        &self,
        audio: Vec<u8>,
    ) -> Result<TranscriptionJobSnapshot, ApplicationError> {
        if audio.is_empty() {
            return Err(DomainError::EmptyAudioPayload.into());
        }

        let blob_key = BlobKey::generate();
        self.blob_store.upload(&blob_key, audio).await?;

        let media_uri = self.blob_store.media_uri(&blob_key);
        let job_name = match self.transcription.start_job(&media_uri).await {
            Ok(name) => name,
            Err(err) => {
                // The blob would otherwise leak; the sweep only knows about
                // jobs that actually started.
                if let Err(cleanup_err) = self.blob_store.delete(&blob_key).await {
                    warn!(
                        blob_key = %blob_key,
                        error = %cleanup_err,
                        "Failed to delete blob after job start failure"
                    );
                }
                return Err(err);
            },
        };

        self.registry.insert(job_name.clone(), blob_key);
        info!(job_name = %job_name, "Transcription job started");

        Ok(TranscriptionJobSnapshot {
            job_name,
            status: JobStatus::InProgress,
            transcript: None,
        })
    }

    /// Fetch the current status of a job, with the transcript once complete
    #[instrument(skip(self), fields(job_name = %job))]
    pub async fn check_status(
        &self,
        job: &JobName,
    ) -> Result<TranscriptionJobSnapshot, ApplicationError> {
        let status = self.transcription.job_status(job).await?;

        let transcript = if status == JobStatus::Completed {
            Some(self.transcription.fetch_transcript(job).await?)
        } else {
            None
        };

        debug!(status = %status, has_transcript = transcript.is_some(), "Job status checked");

        Ok(TranscriptionJobSnapshot {
            job_name: job.clone(),
            status,
            transcript,
        })
    }

    /// Delete finished jobs and their uploaded blobs.
    ///
    /// Iterates a snapshot of the registry; a failure on one entry is
    /// logged and never stops the others. In-progress jobs are left for the
    /// next sweep. Returns the number of entries cleaned up.
    #[instrument(skip(self), fields(pending = self.registry.len()))]
    pub async fn run_cleanup_sweep(&self) -> usize {
        let mut removed = 0usize;

        for (job, blob) in self.registry.snapshot() {
            let status = match self.transcription.job_status(&job).await {
                Ok(status) => status,
                Err(err) => {
                    warn!(job_name = %job, error = %err, "Cleanup: status check failed, skipping");
                    continue;
                },
            };

            if !status.is_terminal() {
                continue;
            }

            if let Err(err) = self.transcription.delete_job(&job).await {
                warn!(job_name = %job, error = %err, "Cleanup: job deletion failed, skipping");
                continue;
            }

            if let Err(err) = self.blob_store.delete(&blob).await {
                warn!(job_name = %job, blob_key = %blob, error = %err, "Cleanup: blob deletion failed, skipping");
                continue;
            }

            self.registry.remove(&job);
            removed += 1;
            debug!(job_name = %job, status = %status, "Cleanup: job and blob deleted");
        }

        if removed > 0 {
            info!(removed = removed, "Cleanup sweep finished");
        }
        removed
    }
}
