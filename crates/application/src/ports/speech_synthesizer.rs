//! Speech synthesizer port - Interface for text-to-speech synthesis

use async_trait::async_trait;
use bytes::Bytes;
use domain::VoiceSelection;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for synthesizing speech audio from text
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SpeechSynthesizerPort: Send + Sync {
    /// Synthesize `text` with the given voice.
    ///
    /// Returns the encoded MP3 audio.
    async fn synthesize(
        &self,
        text: &str,
        voice: VoiceSelection,
    ) -> Result<Bytes, ApplicationError>;
}
