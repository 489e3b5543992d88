//! Application layer for Talkscribe
//!
//! Orchestrates the speech-to-text and text-to-speech workflows over
//! abstract ports; adapters to concrete providers live in the
//! infrastructure crate.

pub mod error;
pub mod ports;
pub mod registry;
pub mod retry;
pub mod services;

pub use error::ApplicationError;
pub use registry::PendingCleanupRegistry;
pub use retry::RetryPolicy;
pub use services::{SpeechToTextService, TextToSpeechService, TranscriptionJobSnapshot};
