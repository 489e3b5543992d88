//! Speech-to-text handlers

use application::TranscriptionJobSnapshot;
use axum::{
    Json,
    extract::{Multipart, OriginalUri, Path, State},
    http::header,
    response::IntoResponse,
};
use domain::{JobName, JobStatus};
use serde::Serialize;
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

/// Multipart field that carries the uploaded audio
const AUDIO_FIELD: &str = "audioFile";

/// View of a transcription job returned to clients
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptionJobResponse {
    /// Provider-assigned job name, used for polling
    pub job_name: JobName,
    /// Current job status
    pub job_status: JobStatus,
    /// Transcript text; null until the job completes
    pub transcript: Option<String>,
}

impl From<TranscriptionJobSnapshot> for TranscriptionJobResponse {
    fn from(snapshot: TranscriptionJobSnapshot) -> Self {
        Self {
            job_name: snapshot.job_name,
            job_status: snapshot.status,
            transcript: snapshot.transcript,
        }
    }
}

/// Accept an audio upload and start an asynchronous transcription job
#[instrument(skip_all)]
pub async fn start_transcription(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    mut multipart: Multipart,
) -> Result<Json<TranscriptionJobResponse>, ApiError> {
    let path = uri.path().to_string();

    let mut audio: Option<Vec<u8>> = None;
    while let Some(field) = multipart.next_field().await.map_err(|e| ApiError::BadRequest {
        message: format!("Invalid multipart payload: {e}"),
        path: path.clone(),
    })? {
        if field.name() == Some(AUDIO_FIELD) {
            let bytes = field.bytes().await.map_err(|e| ApiError::BadRequest {
                message: format!("Failed to read {AUDIO_FIELD}: {e}"),
                path: path.clone(),
            })?;
            audio = Some(bytes.to_vec());
        }
    }

    let audio = audio.ok_or_else(|| ApiError::BadRequest {
        message: format!("Missing multipart field '{AUDIO_FIELD}'"),
        path: path.clone(),
    })?;

    let snapshot = state
        .speech_to_text
        .start_job(audio)
        .await
        .map_err(|e| ApiError::from_application(e, &path))?;

    Ok(Json(snapshot.into()))
}

/// Poll the status of a transcription job.
///
/// The response must never be cached: the status changes server-side
/// while clients poll the same URL.
#[instrument(skip(state, uri))]
pub async fn transcription_status(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(job_name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let path = uri.path().to_string();

    let job = JobName::parse(&job_name).map_err(|e| ApiError::BadRequest {
        message: e.to_string(),
        path: path.clone(),
    })?;

    let snapshot = state
        .speech_to_text
        .check_status(&job)
        .await
        .map_err(|e| ApiError::from_application(e, &path))?;

    Ok((
        [(header::CACHE_CONTROL, "no-store, must-revalidate")],
        Json(TranscriptionJobResponse::from(snapshot)),
    ))
}
