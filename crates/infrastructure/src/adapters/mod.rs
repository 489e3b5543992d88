//! Adapters - Port implementations backed by external services

mod blob_store;
mod language_detection;
mod speech_synthesis;
mod transcription;

pub use blob_store::S3BlobStore;
pub use language_detection::LanguageDetectionAdapter;
pub use speech_synthesis::SpeechSynthesisAdapter;
pub use transcription::TranscriptionAdapter;
