//! Transcription job cleanup task
//!
//! Periodically sweeps the pending-cleanup registry, deleting finished
//! jobs and their uploaded audio blobs.

use std::sync::Arc;
use std::time::Duration;

use application::SpeechToTextService;
use tracing::{debug, info};

/// Default sweep interval: once per hour
const DEFAULT_CLEANUP_INTERVAL_SECS: u64 = 3600;

/// Spawn a background task that periodically runs the cleanup sweep.
///
/// Returns a `JoinHandle` that can be used to abort the task when
/// shutting down. The first sweep runs one full interval after startup,
/// not immediately.
pub fn spawn_job_cleanup_task(
    speech_to_text: Arc<SpeechToTextService>,
    cleanup_interval: Option<Duration>,
) -> tokio::task::JoinHandle<()> {
    let interval = cleanup_interval.unwrap_or(Duration::from_secs(DEFAULT_CLEANUP_INTERVAL_SECS));

    info!(
        interval_secs = interval.as_secs(),
        "Starting transcription job cleanup task"
    );

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // Don't run immediately on startup
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let removed = speech_to_text.run_cleanup_sweep().await;
            if removed == 0 {
                debug!("No finished jobs to clean up");
            }
        }
    })
}
