//! Domain layer for Talkscribe
//!
//! Contains value objects, the voice selection tables, and domain errors.
//! This layer has no I/O and no external service dependencies.

pub mod errors;
pub mod value_objects;
pub mod voices;

pub use errors::DomainError;
pub use value_objects::*;
pub use voices::{
    SupportedLanguage, TRANSCRIPTION_LANGUAGE_OPTIONS, VoiceSelection, select_voice,
    supported_languages,
};
