//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Object storage operation failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Language detection provider failed
    #[error("Language detection error: {0}")]
    LanguageDetection(String),

    /// Speech synthesis provider failed
    #[error("Speech synthesis error: {0}")]
    Synthesis(String),

    /// Transcription provider failed
    #[error("Transcription error: {0}")]
    Transcription(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if this error is worth retrying.
    ///
    /// Provider and storage failures are usually transient; anything the
    /// caller did wrong is not.
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Storage(_) | Self::LanguageDetection(_) | Self::Synthesis(_) | Self::Transcription(_)
        )
    }
}
