//! MinIO/S3-compatible storage client
//!
//! Photo bytes never pass through this service: clients PUT and GET objects
//! directly against storage using presigned URLs generated here. The server
//! itself only issues signatures, checks object existence, and lists keys.
//!
//! Uses rust-s3 crate for lightweight S3 operations.

use chrono::Utc;
use s3::creds::Credentials;
use s3::{Bucket, BucketConfiguration, Region};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::core::config::MinIOConfig;
use crate::core::error::AppError;

/// Summary of one stored object, as returned by [`MinIOClient::list`]
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub key: String,
    pub size: u64,
    pub last_modified: String,
}

/// One page of a bucket listing plus the continuation token for the next page
#[derive(Debug, Clone)]
pub struct ObjectPage {
    pub objects: Vec<StoredObject>,
    pub next_token: Option<String>,
}

/// MinIO/S3-compatible storage client
pub struct MinIOClient {
    bucket: Box<Bucket>,
    region: Region,
    credentials: Credentials,
    presign_expiry_secs: u32,
    upload_key_prefix: String,
}

impl MinIOClient {
    /// Create a new MinIO client from configuration
    pub fn new(config: MinIOConfig) -> Result<Self, AppError> {
        let credentials = Credentials::new(
            Some(&config.access_key),
            Some(&config.secret_key),
            None,
            None,
            None,
        )
        .map_err(|e| AppError::Internal(format!("Failed to create MinIO credentials: {}", e)))?;

        let region = Region::Custom {
            region: config.region.clone(),
            endpoint: config.endpoint.clone(),
        };

        let mut bucket = Bucket::new(&config.bucket, region.clone(), credentials.clone())
            .map_err(|e| AppError::Internal(format!("Failed to create MinIO bucket: {}", e)))?;

        // Use path-style URLs for MinIO (http://endpoint/bucket instead of http://bucket.endpoint)
        bucket.set_path_style();

        Ok(Self {
            bucket,
            region,
            credentials,
            presign_expiry_secs: config.presign_expiry_secs,
            upload_key_prefix: config.upload_key_prefix,
        })
    }

    /// Ensure the bucket exists, create if not
    pub async fn ensure_bucket_exists(&self) -> Result<(), AppError> {
        // Try to create bucket - if it already exists, MinIO will return an error
        // which we can safely ignore
        match self.create_bucket().await {
            Ok(_) => {
                info!("Bucket '{}' created successfully", self.bucket.name());
                Ok(())
            }
            Err(e) => {
                let error_str = e.to_string();
                // Bucket already exists - this is fine
                if error_str.contains("BucketAlreadyOwnedByYou")
                    || error_str.contains("BucketAlreadyExists")
                    || error_str.contains("already own it")
                {
                    debug!("Bucket '{}' already exists", self.bucket.name());
                    Ok(())
                } else {
                    // Log warning but don't fail - bucket might exist with different error
                    warn!(
                        "Could not create bucket '{}': {}. Assuming it exists.",
                        self.bucket.name(),
                        e
                    );
                    Ok(())
                }
            }
        }
    }

    /// Create the bucket
    async fn create_bucket(&self) -> Result<(), AppError> {
        let bucket_config = BucketConfiguration::default();

        Bucket::create_with_path_style(
            &self.bucket.name(),
            self.region.clone(),
            self.credentials.clone(),
            bucket_config,
        )
        .await
        .map_err(|e| {
            AppError::Internal(format!(
                "Failed to create bucket '{}': {}",
                self.bucket.name(),
                e
            ))
        })?;

        Ok(())
    }

    /// Generate an upload key: `<prefix>/<YYYY-MM-DD>/<uuid>.<extension>`
    ///
    /// The date segment keeps MinIO's browser usable and the UUID makes
    /// collisions a non-concern.
    pub fn generate_upload_key(&self, extension: &str) -> String {
        format!(
            "{}/{}/{}.{}",
            self.upload_key_prefix,
            Utc::now().format("%Y-%m-%d"),
            Uuid::new_v4(),
            extension
        )
    }

    /// Generate a presigned URL for uploading an object (HTTP PUT)
    pub async fn presign_put(&self, key: &str, expiry_secs: u32) -> Result<String, AppError> {
        self.bucket
            .presign_put(key, expiry_secs, None, None)
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!(
                    "Failed to generate upload URL for '{}': {}",
                    key, e
                ))
            })
    }

    /// Generate a presigned URL for reading an object (HTTP GET)
    pub async fn presign_get(&self, key: &str, expiry_secs: u32) -> Result<String, AppError> {
        self.bucket
            .presign_get(key, expiry_secs, None)
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!(
                    "Failed to generate download URL for '{}': {}",
                    key, e
                ))
            })
    }

    /// Check if an object exists in the bucket (HEAD request)
    pub async fn exists(&self, key: &str) -> Result<bool, AppError> {
        match self.bucket.head_object(key).await {
            Ok(_) => Ok(true),
            Err(e) => {
                let error_str = e.to_string();
                if error_str.contains("404") || error_str.contains("NoSuchKey") {
                    Ok(false)
                } else {
                    Err(AppError::ExternalServiceError(format!(
                        "Failed to check if object '{}' exists: {}",
                        key, e
                    )))
                }
            }
        }
    }

    /// List one page of objects under a prefix
    pub async fn list(
        &self,
        prefix: Option<String>,
        token: Option<String>,
        max_keys: Option<usize>,
    ) -> Result<ObjectPage, AppError> {
        let (result, _status) = self
            .bucket
            .list_page(prefix.unwrap_or_default(), None, token, None, max_keys)
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("Failed to list objects: {}", e))
            })?;

        let objects = result
            .contents
            .into_iter()
            .map(|obj| StoredObject {
                key: obj.key,
                size: obj.size,
                last_modified: obj.last_modified,
            })
            .collect();

        let next_token = if result.is_truncated {
            result.next_continuation_token
        } else {
            None
        };

        Ok(ObjectPage {
            objects,
            next_token,
        })
    }

    /// Get the default presigned URL expiry time in seconds
    pub fn default_presign_expiry_secs(&self) -> u32 {
        self.presign_expiry_secs
    }

    /// Get the bucket name
    pub fn bucket_name(&self) -> String {
        self.bucket.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::MinIOConfig;

    fn test_client() -> MinIOClient {
        MinIOClient::new(MinIOConfig {
            endpoint: "http://localhost:9000".to_string(),
            access_key: "minioadmin".to_string(),
            secret_key: "minioadmin".to_string(),
            bucket: "test-bucket".to_string(),
            region: "us-east-1".to_string(),
            upload_key_prefix: "photos".to_string(),
            presign_expiry_secs: 300,
        })
        .unwrap()
    }

    #[test]
    fn test_generate_upload_key_shape() {
        let key = test_client().generate_upload_key("jpg");
        let pattern =
            regex::Regex::new(r"^photos/\d{4}-\d{2}-\d{2}/[0-9a-f]{8}(-[0-9a-f]{4}){3}-[0-9a-f]{12}\.jpg$")
                .unwrap();
        assert!(pattern.is_match(&key), "unexpected key: {}", key);
    }

    #[test]
    fn test_generated_keys_are_unique() {
        let client = test_client();
        assert_ne!(
            client.generate_upload_key("png"),
            client.generate_upload_key("png")
        );
    }
}
