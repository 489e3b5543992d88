//! Shared application state

use std::sync::Arc;

use application::{SpeechToTextService, TextToSpeechService};

/// State shared across all HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Speech-to-text orchestration
    pub speech_to_text: Arc<SpeechToTextService>,
    /// Text-to-speech orchestration
    pub text_to_speech: Arc<TextToSpeechService>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
