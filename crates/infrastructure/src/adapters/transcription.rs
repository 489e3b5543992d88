//! Transcription adapter - REST client for the speech provider's
//! asynchronous transcription jobs

use std::time::Duration;

use application::{error::ApplicationError, ports::TranscriptionJobPort};
use async_trait::async_trait;
use domain::{JobName, JobStatus, TRANSCRIPTION_LANGUAGE_OPTIONS};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::SpeechProviderConfig;

/// Manages transcription jobs via the speech provider API.
///
/// Jobs are started against audio already sitting in object storage; the
/// provider identifies the spoken language from a fixed allow-list and
/// publishes the transcript at a separate URI once the job completes.
#[derive(Debug, Clone)]
pub struct TranscriptionAdapter {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Serialize)]
struct StartJobRequest<'a> {
    job_name: &'a str,
    media_uri: &'a str,
    media_format: &'a str,
    identify_language: bool,
    language_options: &'a [&'a str],
}

#[derive(Debug, Deserialize)]
struct JobResponse {
    status: String,
    #[serde(default)]
    transcript_uri: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TranscriptDocument {
    results: TranscriptResults,
}

#[derive(Debug, Deserialize)]
struct TranscriptResults {
    transcripts: Vec<TranscriptEntry>,
}

#[derive(Debug, Deserialize)]
struct TranscriptEntry {
    transcript: String,
}

impl TranscriptionAdapter {
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

    fn jobs_url(&self) -> String {
        format!("{}/v1/transcription/jobs", self.base_url)
    }

    fn job_url(&self, job: &JobName) -> String {
        format!("{}/v1/transcription/jobs/{}", self.base_url, job)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.api_key {
            Some(ref key) => request.bearer_auth(key),
            None => request,
        }
    }

    async fn fetch_job(&self, job: &JobName) -> Result<JobResponse, ApplicationError> {
        let response = self
            .authorize(self.client.get(self.job_url(job)))
            .send()
            .await
            .map_err(|e| ApplicationError::Transcription(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApplicationError::Transcription(format!(
                "Provider returned {status}: {body}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ApplicationError::Transcription(format!("Invalid response: {e}")))
    }
}

#[async_trait]
impl TranscriptionJobPort for TranscriptionAdapter {
    #[instrument(skip(self))]
    async fn start_job(&self, media_uri: &str) -> Result<JobName, ApplicationError> {
        let job_name = JobName::generate();
        let body = StartJobRequest {
            job_name: job_name.as_str(),
            media_uri,
            media_format: "mp3",
            identify_language: true,
            language_options: TRANSCRIPTION_LANGUAGE_OPTIONS,
        };

        let response = self
            .authorize(self.client.post(self.jobs_url()).json(&body))
            .send()
            .await
            .map_err(|e| ApplicationError::Transcription(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApplicationError::Transcription(format!(
                "Provider returned {status}: {body}"
            )));
        }

        debug!(job_name = %job_name, "Transcription job submitted");
        Ok(job_name)
    }

    #[instrument(skip(self), fields(job_name = %job))]
    async fn job_status(&self, job: &JobName) -> Result<JobStatus, ApplicationError> {
        let response = self.fetch_job(job).await?;
        let status: JobStatus = response.status.parse().map_err(ApplicationError::from)?;
        Ok(status)
    }

    #[instrument(skip(self), fields(job_name = %job))]
    async fn fetch_transcript(&self, job: &JobName) -> Result<String, ApplicationError> {
        let job_response = self.fetch_job(job).await?;
        let transcript_uri = job_response.transcript_uri.ok_or_else(|| {
            ApplicationError::Transcription(format!("Job {job} has no transcript URI"))
        })?;

        let response = self
            .authorize(self.client.get(&transcript_uri))
            .send()
            .await
            .map_err(|e| ApplicationError::Transcription(format!("Transcript fetch failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ApplicationError::Transcription(format!(
                "Transcript fetch returned {}",
                response.status()
            )));
        }

        let document: TranscriptDocument = response
            .json()
            .await
            .map_err(|e| ApplicationError::Transcription(format!("Invalid transcript: {e}")))?;

        document
            .results
            .transcripts
            .into_iter()
            .next()
            .map(|entry| entry.transcript)
            .ok_or_else(|| {
                ApplicationError::Transcription(format!("Job {job} transcript is empty"))
            })
    }

    #[instrument(skip(self), fields(job_name = %job))]
    async fn delete_job(&self, job: &JobName) -> Result<(), ApplicationError> {
        let response = self
            .authorize(self.client.delete(self.job_url(job)))
            .send()
            .await
            .map_err(|e| ApplicationError::Transcription(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ApplicationError::Transcription(format!(
                "Job deletion returned {}",
                response.status()
            )));
        }

        debug!("Transcription job deleted");
        Ok(())
    }
}
