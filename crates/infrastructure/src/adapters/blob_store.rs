//! S3 blob store adapter - Implements `BlobStorePort` over any S3-compatible service

use application::{error::ApplicationError, ports::BlobStorePort};
use async_trait::async_trait;
use domain::BlobKey;
use s3::creds::Credentials;
use s3::{Bucket, Region};
use tracing::{debug, instrument};

use crate::config::StorageConfig;

/// Blob store backed by an S3 bucket
pub struct S3BlobStore {
    bucket: Box<Bucket>,
    bucket_name: String,
}

impl std::fmt::Debug for S3BlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3BlobStore")
            .field("bucket", &self.bucket_name)
            .finish_non_exhaustive()
    }
}

impl S3BlobStore {
    /// Create a blob store from storage configuration.
    ///
    /// Credentials come from the config when set, otherwise from the
    /// standard `AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY` environment.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` when credentials or the
    /// bucket handle cannot be built.
    pub fn new(config: &StorageConfig) -> Result<Self, ApplicationError> {
        let credentials = if config.access_key.is_some() && config.secret_key.is_some() {
            Credentials::new(
                config.access_key.as_deref(),
                config.secret_key.as_deref(),
                None,
                None,
                None,
            )
            .map_err(|e| ApplicationError::Configuration(format!("Invalid S3 credentials: {e}")))?
        } else {
            Credentials::default().map_err(|e| {
                ApplicationError::Configuration(format!(
                    "No S3 credentials in environment: {e}"
                ))
            })?
        };

        let region = if let Some(ref endpoint) = config.endpoint {
            Region::Custom {
                region: config.region.clone(),
                endpoint: endpoint.clone(),
            }
        } else {
            config
                .region
                .parse()
                .map_err(|e| ApplicationError::Configuration(format!("Invalid S3 region: {e}")))?
        };

        let bucket = Bucket::new(&config.bucket, region, credentials)
            .map_err(|e| {
                ApplicationError::Configuration(format!("Failed to create bucket handle: {e}"))
            })?
            // Required for MinIO and some S3-compatible services
            .with_path_style();

        Ok(Self {
            bucket,
            bucket_name: config.bucket.clone(),
        })
    }
}

#[async_trait]
impl BlobStorePort for S3BlobStore {
    #[instrument(skip(self, payload), fields(key = %key, size = payload.len()))]
    async fn upload(&self, key: &BlobKey, payload: Vec<u8>) -> Result<(), ApplicationError> {
        let response = self
            .bucket
            .put_object(key.as_str(), &payload)
            .await
            .map_err(|e| ApplicationError::Storage(format!("Upload failed: {e}")))?;

        if response.status_code() != 200 {
            return Err(ApplicationError::Storage(format!(
                "Upload returned status {}",
                response.status_code()
            )));
        }

        debug!("Audio payload uploaded");
        Ok(())
    }

    #[instrument(skip(self), fields(key = %key))]
    async fn delete(&self, key: &BlobKey) -> Result<(), ApplicationError> {
        let response = self
            .bucket
            .delete_object(key.as_str())
            .await
            .map_err(|e| ApplicationError::Storage(format!("Delete failed: {e}")))?;

        if !matches!(response.status_code(), 200 | 204) {
            return Err(ApplicationError::Storage(format!(
                "Delete returned status {}",
                response.status_code()
            )));
        }

        debug!("Audio payload deleted");
        Ok(())
    }

    fn media_uri(&self, key: &BlobKey) -> String {
        format!("s3://{}/{}", self.bucket_name, key)
    }
}
