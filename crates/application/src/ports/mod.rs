//! Ports - Interfaces to external providers
//!
//! Adapters in the infrastructure crate implement these traits; services
//! in this crate depend only on the traits.

mod blob_store;
mod language_detector;
mod speech_synthesizer;
mod transcription_job;

pub use blob_store::BlobStorePort;
pub use language_detector::LanguageDetectorPort;
pub use speech_synthesizer::SpeechSynthesizerPort;
pub use transcription_job::TranscriptionJobPort;

#[cfg(test)]
pub use blob_store::MockBlobStorePort;
#[cfg(test)]
pub use language_detector::MockLanguageDetectorPort;
#[cfg(test)]
pub use speech_synthesizer::MockSpeechSynthesizerPort;
#[cfg(test)]
pub use transcription_job::MockTranscriptionJobPort;
