//! Application services

mod speech_to_text;
mod text_to_speech;

pub use speech_to_text::{SpeechToTextService, TranscriptionJobSnapshot};
pub use text_to_speech::TextToSpeechService;
