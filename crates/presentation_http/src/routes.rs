//! Route definitions

use axum::{
    Router,
    routing::{get, post},
};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoint (excluded from rate limiting)
        .route("/health", get(handlers::health::health_check))
        // Speech-to-text API
        .route(
            "/api/speech-to-text",
            post(handlers::speech::start_transcription),
        )
        .route(
            "/api/speech-to-text/status/{job_name}",
            get(handlers::speech::transcription_status),
        )
        // Text-to-speech API
        .route(
            "/api/text-to-speech",
            post(handlers::synthesis::synthesize_speech),
        )
        // Supported languages
        .route("/api/languages", get(handlers::languages::list_languages))
        .with_state(state)
}
