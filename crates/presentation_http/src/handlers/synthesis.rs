//! Text-to-speech handler

use axum::{
    Json,
    extract::{OriginalUri, State},
    http::header,
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

/// Text-to-speech request body
#[derive(Debug, Deserialize)]
pub struct SynthesizeRequest {
    /// Text to convert to speech
    pub text: String,
}

/// Convert text to MP3 audio, returned as a binary body
#[instrument(skip_all, fields(text_len = request.text.len()))]
pub async fn synthesize_speech(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Json(request): Json<SynthesizeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let path = uri.path().to_string();

    let audio = state
        .text_to_speech
        .synthesize(&request.text)
        .await
        .map_err(|e| ApiError::from_application(e, &path))?;

    Ok((
        [(header::CONTENT_TYPE, "application/octet-stream")],
        audio,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_deserializes_text_field() {
        let request: SynthesizeRequest = serde_json::from_str(r#"{"text":"Hello"}"#).unwrap();
        assert_eq!(request.text, "Hello");
    }

    #[test]
    fn request_rejects_missing_text() {
        let result = serde_json::from_str::<SynthesizeRequest>("{}");
        assert!(result.is_err());
    }
}
