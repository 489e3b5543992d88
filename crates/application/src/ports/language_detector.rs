//! Language detector port - Interface for text language identification

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for detecting the dominant language of a piece of text
#[cfg_attr(test, automock)]
#[async_trait]
pub trait LanguageDetectorPort: Send + Sync {
    /// Detect the dominant language of `text`.
    ///
    /// Returns the ISO 639-1 code (e.g. "fr") of the most likely language,
    /// or `None` when the provider could not identify one.
    async fn detect_language(&self, text: &str) -> Result<Option<String>, ApplicationError>;
}
