/// Presigned URL issuance for invoice images
///
/// Signing is delegated to the object store. Failures never propagate:
/// callers get `None` and render a null URL.
use async_trait::async_trait;
use s3_utils::S3Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use crate::error::Result;

/// Default presigned URL lifetime (1 hour)
pub const DEFAULT_PRESIGNED_URL_TTL: Duration = Duration::from_secs(3600);

/// Object store capability used to sign GET URLs
#[async_trait]
pub trait ObjectUrlSigner: Send + Sync {
    async fn presign_get(&self, object_key: &str, ttl: Duration) -> Result<String>;
}

#[async_trait]
impl ObjectUrlSigner for S3Client {
    async fn presign_get(&self, object_key: &str, ttl: Duration) -> Result<String> {
        Ok(self.presigned_get_url(object_key, ttl).await?)
    }
}

#[derive(Clone)]
pub struct PresignedUrlIssuer {
    signer: Arc<dyn ObjectUrlSigner>,
    ttl: Duration,
}

impl PresignedUrlIssuer {
    pub fn new(signer: Arc<dyn ObjectUrlSigner>, ttl: Duration) -> Self {
        Self { signer, ttl }
    }

    /// Issue a URL with the configured lifetime
    pub async fn issue_url(&self, object_key: &str) -> Option<String> {
        self.issue_url_with_ttl(object_key, self.ttl).await
    }

    pub async fn issue_url_with_ttl(&self, object_key: &str, ttl: Duration) -> Option<String> {
        match self.signer.presign_get(object_key, ttl).await {
            Ok(url) => Some(url),
            Err(e) => {
                warn!(object_key, error = %e, "Failed to generate presigned URL");
                None
            }
        }
    }
}
