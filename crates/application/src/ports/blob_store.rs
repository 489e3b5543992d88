//! Blob store port - Interface for audio object storage

use async_trait::async_trait;
use domain::BlobKey;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for storing and deleting uploaded audio payloads
#[cfg_attr(test, automock)]
#[async_trait]
pub trait BlobStorePort: Send + Sync {
    /// Upload an audio payload under the given key
    async fn upload(&self, key: &BlobKey, payload: Vec<u8>) -> Result<(), ApplicationError>;

    /// Delete the payload stored under the given key
    async fn delete(&self, key: &BlobKey) -> Result<(), ApplicationError>;

    /// The URI the transcription provider should read the payload from
    /// (e.g. `s3://bucket/audio-....mp3`)
    fn media_uri(&self, key: &BlobKey) -> String;
}
