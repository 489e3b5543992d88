//! Integration tests for the speech provider adapters against a mock server

use application::ports::{LanguageDetectorPort, SpeechSynthesizerPort, TranscriptionJobPort};
use application::error::ApplicationError;
use domain::{JobName, JobStatus, select_voice};
use infrastructure::adapters::{
    LanguageDetectionAdapter, SpeechSynthesisAdapter, TranscriptionAdapter,
};
use infrastructure::config::SpeechProviderConfig;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider_config(server: &MockServer) -> SpeechProviderConfig {
    SpeechProviderConfig {
        base_url: server.uri(),
        api_key: Some("test-key".to_string()),
        timeout_ms: 5000,
    }
}

#[tokio::test]
async fn detect_language_picks_highest_scoring_candidate() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/language/detect"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({"text": "Bonjour tout le monde"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "languages": [
                {"code": "en", "score": 0.12},
                {"code": "fr", "score": 0.97}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let adapter = LanguageDetectionAdapter::new(&provider_config(&server)).unwrap();
    let detected = adapter
        .detect_language("Bonjour tout le monde")
        .await
        .unwrap();
    assert_eq!(detected.as_deref(), Some("fr"));
}

#[tokio::test]
async fn detect_language_with_no_candidates_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/language/detect"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"languages": []})))
        .mount(&server)
        .await;

    let adapter = LanguageDetectionAdapter::new(&provider_config(&server)).unwrap();
    let detected = adapter.detect_language("zzzz").await.unwrap();
    assert!(detected.is_none());
}

#[tokio::test]
async fn detect_language_maps_provider_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/language/detect"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let adapter = LanguageDetectionAdapter::new(&provider_config(&server)).unwrap();
    let err = adapter.detect_language("hello").await.unwrap_err();
    assert!(matches!(err, ApplicationError::LanguageDetection(_)));
}

#[tokio::test]
async fn synthesize_sends_voice_and_returns_audio() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/speech/synthesize"))
        .and(body_partial_json(json!({
            "voice_id": "Lea",
            "locale": "fr-FR",
            "engine": "neural",
            "output_format": "mp3"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xff, 0xfb, 0x90]))
        .expect(1)
        .mount(&server)
        .await;

    let adapter = SpeechSynthesisAdapter::new(&provider_config(&server)).unwrap();
    let audio = adapter
        .synthesize("Bonjour", select_voice("fr"))
        .await
        .unwrap();
    assert_eq!(audio.len(), 3);
}

#[tokio::test]
async fn synthesize_maps_provider_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/speech/synthesize"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let adapter = SpeechSynthesisAdapter::new(&provider_config(&server)).unwrap();
    let err = adapter
        .synthesize("Hello", select_voice("en"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Synthesis(_)));
}

#[tokio::test]
async fn start_job_submits_language_options_and_returns_generated_name() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/transcription/jobs"))
        .and(body_partial_json(json!({
            "media_uri": "s3://talkscribe-audio/audio-x.mp3",
            "media_format": "mp3",
            "identify_language": true,
            "language_options": ["en-US", "de-DE", "fr-FR", "es-ES", "sv-SE", "pt-PT"]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "status": "IN_PROGRESS"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let adapter = TranscriptionAdapter::new(&provider_config(&server)).unwrap();
    let job = adapter
        .start_job("s3://talkscribe-audio/audio-x.mp3")
        .await
        .unwrap();
    assert!(job.as_str().starts_with("job-"));
}

#[tokio::test]
async fn job_status_parses_provider_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/transcription/jobs/job-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "COMPLETED",
            "transcript_uri": "http://example.invalid/transcript"
        })))
        .mount(&server)
        .await;

    let adapter = TranscriptionAdapter::new(&provider_config(&server)).unwrap();
    let job = JobName::parse("job-abc").unwrap();
    assert_eq!(adapter.job_status(&job).await.unwrap(), JobStatus::Completed);
}

#[tokio::test]
async fn job_status_rejects_unknown_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/transcription/jobs/job-weird"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "EXPLODED"})))
        .mount(&server)
        .await;

    let adapter = TranscriptionAdapter::new(&provider_config(&server)).unwrap();
    let job = JobName::parse("job-weird").unwrap();
    let err = adapter.job_status(&job).await.unwrap_err();
    assert!(matches!(err, ApplicationError::Domain(_)));
}

#[tokio::test]
async fn fetch_transcript_follows_transcript_uri() {
    let server = MockServer::start().await;
    let transcript_uri = format!("{}/transcripts/job-done.json", server.uri());

    Mock::given(method("GET"))
        .and(path("/v1/transcription/jobs/job-done"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "COMPLETED",
            "transcript_uri": transcript_uri
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/transcripts/job-done.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": {
                "transcripts": [{"transcript": "hello from the other side"}]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let adapter = TranscriptionAdapter::new(&provider_config(&server)).unwrap();
    let job = JobName::parse("job-done").unwrap();
    let transcript = adapter.fetch_transcript(&job).await.unwrap();
    assert_eq!(transcript, "hello from the other side");
}

#[tokio::test]
async fn fetch_transcript_without_uri_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/transcription/jobs/job-early"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "IN_PROGRESS"})))
        .mount(&server)
        .await;

    let adapter = TranscriptionAdapter::new(&provider_config(&server)).unwrap();
    let job = JobName::parse("job-early").unwrap();
    let err = adapter.fetch_transcript(&job).await.unwrap_err();
    assert!(matches!(err, ApplicationError::Transcription(_)));
}

#[tokio::test]
async fn delete_job_accepts_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/transcription/jobs/job-gone"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let adapter = TranscriptionAdapter::new(&provider_config(&server)).unwrap();
    let job = JobName::parse("job-gone").unwrap();
    adapter.delete_job(&job).await.unwrap();
}
