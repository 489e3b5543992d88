//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Uploaded audio payload contained no data
    #[error("Audio payload is empty")]
    EmptyAudioPayload,

    /// Text submitted for synthesis was blank
    #[error("Text must not be blank")]
    BlankText,

    /// A job name failed validation
    #[error("Invalid job name: {0}")]
    InvalidJobName(String),

    /// A storage key failed validation
    #[error("Invalid blob key: {0}")]
    InvalidBlobKey(String),

    /// An unrecognized job status string was received from the provider
    #[error("Unknown job status: {0}")]
    UnknownJobStatus(String),
}
