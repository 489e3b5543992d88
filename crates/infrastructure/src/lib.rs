//! Infrastructure layer for Talkscribe
//!
//! Concrete adapters for the application ports: S3-compatible blob
//! storage and the REST speech provider (language detection, speech
//! synthesis, asynchronous transcription jobs). Also owns configuration
//! loading.

pub mod adapters;
pub mod config;

pub use adapters::{LanguageDetectionAdapter, S3BlobStore, SpeechSynthesisAdapter, TranscriptionAdapter};
pub use config::AppConfig;
