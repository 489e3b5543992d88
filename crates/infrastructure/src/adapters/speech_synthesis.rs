//! Speech synthesis adapter - REST client for the speech provider's
//! text-to-speech endpoint

use std::time::Duration;

use application::{error::ApplicationError, ports::SpeechSynthesizerPort};
use async_trait::async_trait;
use bytes::Bytes;
use domain::VoiceSelection;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::config::SpeechProviderConfig;

/// Synthesizes MP3 audio via the speech provider API
#[derive(Debug, Clone)]
pub struct SpeechSynthesisAdapter {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Serialize)]
struct SynthesizeRequest<'a> {
    text: &'a str,
    voice_id: &'a str,
    locale: &'a str,
    engine: &'a str,
    output_format: &'a str,
}

impl SpeechSynthesisAdapter {
    /// Create a new adapter from provider configuration.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` if the HTTP client cannot
    /// be built.
    pub fn new(config: &SpeechProviderConfig) -> Result<Self, ApplicationError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| {
                ApplicationError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn synthesize_url(&self) -> String {
        format!("{}/v1/speech/synthesize", self.base_url)
    }
}

#[async_trait]
impl SpeechSynthesizerPort for SpeechSynthesisAdapter {
    #[instrument(skip(self, text), fields(text_len = text.len(), voice = voice.voice_id))]
    async fn synthesize(
        &self,
        text: &str,
        voice: VoiceSelection,
    ) -> Result<Bytes, ApplicationError> {
        let body = SynthesizeRequest {
            text,
            voice_id: voice.voice_id,
            locale: voice.locale,
            engine: "neural",
            output_format: "mp3",
        };

        let mut request = self.client.post(self.synthesize_url()).json(&body);
        if let Some(ref key) = self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApplicationError::Synthesis(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApplicationError::Synthesis(format!(
                "Provider returned {status}: {body}"
            )));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| ApplicationError::Synthesis(format!("Failed to read audio: {e}")))?;

        debug!(audio_size = audio.len(), "Speech synthesized");
        Ok(audio)
    }
}
