//! Transcription job status

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Status of a transcription job as reported by the external service.
///
/// This system never advances a job's lifecycle itself; the status is
/// fetched on demand and mirrored to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    /// Job accepted and still being processed
    InProgress,
    /// Job finished successfully; a transcript is available
    Completed,
    /// Job finished unsuccessfully; no transcript
    Failed,
}

impl JobStatus {
    /// Whether the job has reached a terminal state.
    ///
    /// Only terminal jobs may be deleted from the remote service.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// The provider's wire representation of this status
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Failed => "FAILED",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IN_PROGRESS" | "QUEUED" => Ok(Self::InProgress),
            "COMPLETED" => Ok(Self::Completed),
            "FAILED" => Ok(Self::Failed),
            other => Err(DomainError::UnknownJobStatus(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states() {
        assert!(!JobStatus::InProgress.is_terminal());
        assert!(JobStatus::Completed.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
    }

    #[test]
    fn wire_strings_roundtrip() {
        for status in [
            JobStatus::InProgress,
            JobStatus::Completed,
            JobStatus::Failed,
        ] {
            assert_eq!(status.as_str().parse::<JobStatus>().unwrap(), status);
        }
    }

    #[test]
    fn queued_maps_to_in_progress() {
        assert_eq!("QUEUED".parse::<JobStatus>().unwrap(), JobStatus::InProgress);
    }

    #[test]
    fn unknown_status_is_rejected() {
        let err = "BANANAS".parse::<JobStatus>().unwrap_err();
        assert!(matches!(err, DomainError::UnknownJobStatus(_)));
    }

    #[test]
    fn serializes_as_screaming_snake_case() {
        let json = serde_json::to_string(&JobStatus::InProgress).unwrap();
        assert_eq!(json, "\"IN_PROGRESS\"");
    }
}
