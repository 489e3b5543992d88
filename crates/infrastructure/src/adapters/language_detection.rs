//! Language detection adapter - REST client for the speech provider's
//! dominant-language endpoint

use std::time::Duration;

use application::{error::ApplicationError, ports::LanguageDetectorPort};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::SpeechProviderConfig;

/// Detects the dominant language of text via the speech provider API
#[derive(Debug, Clone)]
pub struct LanguageDetectionAdapter {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Serialize)]
struct DetectRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct DetectResponse {
    #[serde(default)]
    languages: Vec<DetectedLanguage>,
}

#[derive(Debug, Deserialize)]
struct DetectedLanguage {
    code: String,
    score: f64,
}

impl LanguageDetectionAdapter {
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

    fn detect_url(&self) -> String {
        format!("{}/v1/language/detect", self.base_url)
    }
}

#[async_trait]
impl LanguageDetectorPort for LanguageDetectionAdapter {
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn detect_language(&self, text: &str) -> Result<Option<String>, ApplicationError> {
        let mut request = self
            .client
            .post(self.detect_url())
            .json(&DetectRequest { text });
        if let Some(ref key) = self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApplicationError::LanguageDetection(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApplicationError::LanguageDetection(format!(
                "Provider returned {status}: {body}"
            )));
        }

        let detected: DetectResponse = response
            .json()
            .await
            .map_err(|e| ApplicationError::LanguageDetection(format!("Invalid response: {e}")))?;

        let best = detected
            .languages
            .into_iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
            .map(|lang| lang.code);

        debug!(language = ?best, "Language detection finished");
        Ok(best)
    }
}
