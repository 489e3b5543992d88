//! Text-to-speech service - Detect language, pick a voice, synthesize

use std::{fmt, sync::Arc};

use bytes::Bytes;
use domain::{DomainError, select_voice};
use tracing::{debug, instrument};

use crate::{
    error::ApplicationError,
    ports::{LanguageDetectorPort, SpeechSynthesizerPort},
    retry::RetryPolicy,
};

/// Language assumed when detection yields nothing
const FALLBACK_LANGUAGE: &str = "en";

/// Service orchestrating the text-to-speech pipeline
pub struct TextToSpeechService {
    detector: Arc<dyn LanguageDetectorPort>,
    synthesizer: Arc<dyn SpeechSynthesizerPort>,
    retry: RetryPolicy,
}

impl fmt::Debug for TextToSpeechService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextToSpeechService")
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl TextToSpeechService {
    /// Create a new text-to-speech service with the default retry policy
    pub fn new(
        detector: Arc<dyn LanguageDetectorPort>,
        synthesizer: Arc<dyn SpeechSynthesizerPort>,
    ) -> Self {
        Self::with_retry(detector, synthesizer, RetryPolicy::default())
    }

    /// Create a text-to-speech service with a custom retry policy
    pub fn with_retry(
        detector: Arc<dyn LanguageDetectorPort>,
        synthesizer: Arc<dyn SpeechSynthesizerPort>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            detector,
            synthesizer,
            retry,
        }
    }

    /// Convert text to MP3 audio.
    ///
    /// The voice is chosen from the detected language; detection misses
    /// fall back to English. The whole pipeline runs under the retry
    /// policy, so a transient provider failure is attempted again from the
    /// top.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn synthesize(&self, text: &str) -> Result<Bytes, ApplicationError> {
        if text.trim().is_empty() {
            return Err(DomainError::BlankText.into());
        }

        self.retry
            .run(|| {
                let detector = Arc::clone(&self.detector);
                let synthesizer = Arc::clone(&self.synthesizer);
                async move {
                    let language = detector
                        .detect_language(text)
                        .await?
                        .unwrap_or_else(|| FALLBACK_LANGUAGE.to_string());

                    let voice = select_voice(&language);
                    debug!(language = %language, voice = voice.voice_id, "Voice selected");

                    synthesizer.synthesize(text, voice).await
                }
            })
            .await
    }
}
