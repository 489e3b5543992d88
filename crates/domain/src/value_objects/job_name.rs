//! Transcription job identifier

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::DomainError;

/// Unique name of a transcription job at the external service.
///
/// Generated once when a job is started and never changed; this is the
/// primary identifier clients poll with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobName(String);

impl JobName {
    /// Generate a fresh job name (`job-<uuid>`)
    pub fn generate() -> Self {
        Self(format!("job-{}", Uuid::new_v4()))
    }

    /// Parse a job name supplied by a client
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidJobName(s.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the job name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
