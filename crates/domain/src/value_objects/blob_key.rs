//! Object storage key for uploaded audio

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::DomainError;

/// Storage key of an uploaded audio payload (`audio-<uuid>.mp3`).
///
/// Set once when the payload is uploaded; the pending-cleanup registry maps
/// job names to these keys so the sweep can delete the blob later.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlobKey(String);

impl BlobKey {
    /// Generate a fresh storage key for an audio upload
    pub fn generate() -> Self {
        Self(format!("audio-{}.mp3", Uuid::new_v4()))
    }

    /// Create a blob key from a known string
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        if s.trim().is_empty() {
            return Err(DomainError::InvalidBlobKey(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }

    /// Get the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlobKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
