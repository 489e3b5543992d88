//! In-memory registry of jobs awaiting cleanup

use std::collections::HashMap;

use domain::{BlobKey, JobName};
use parking_lot::RwLock;

/// Tracks transcription jobs whose remote job record and uploaded audio
/// blob still need to be deleted.
///
/// Entries are added when a job is started and removed once the cleanup
/// sweep has deleted both resources. The registry lives in process memory
/// only; entries are lost on restart and the corresponding remote
/// resources are then never reclaimed by this instance.
#[derive(Debug, Default)]
pub struct PendingCleanupRegistry {
    entries: RwLock<HashMap<JobName, BlobKey>>,
}

impl PendingCleanupRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a job and the blob key it was started from
    pub fn insert(&self, job: JobName, blob: BlobKey) {
        self.entries.write().insert(job, blob);
    }

    /// Remove a job once its resources have been deleted
    pub fn remove(&self, job: &JobName) -> Option<BlobKey> {
        self.entries.write().remove(job)
    }

    /// Snapshot of all pending entries.
    ///
    /// The sweep iterates this copy so it never holds the lock across
    /// provider calls.
    pub fn snapshot(&self) -> Vec<(JobName, BlobKey)> {
        self.entries
            .read()
            .iter()
            .map(|(job, blob)| (job.clone(), blob.clone()))
            .collect()
    }

    /// Number of jobs currently awaiting cleanup
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether no jobs are pending
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
