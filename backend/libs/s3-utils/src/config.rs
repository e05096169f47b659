/// S3 configuration shared across services
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

#[derive(Clone, Deserialize)]
pub struct S3Config {
    /// S3 bucket name
    pub bucket: String,
    /// AWS region
    pub region: String,
    /// Custom endpoint for S3-compatible storage (MinIO)
    pub endpoint: Option<String>,
    /// Static access key; the default credential chain is used when absent
    pub access_key_id: Option<String>,
    /// Static secret key
    pub secret_access_key: Option<String>,
    /// Use path-style URLs (`endpoint/bucket/key`), required by MinIO
    pub force_path_style: bool,
    /// Presigned URL expiration in seconds
    pub presigned_url_expiration_secs: u64,
}

impl fmt::Debug for S3Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("S3Config")
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .field("access_key_id", &self.access_key_id)
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("force_path_style", &self.force_path_style)
            .field(
                "presigned_url_expiration_secs",
                &self.presigned_url_expiration_secs,
            )
            .finish()
    }
}

impl Default for S3Config {
    fn default() -> Self {
        Self {
            bucket: "redshift-app-bucket".to_string(),
            region: "us-east-1".to_string(),
            endpoint: None,
            access_key_id: None,
            secret_access_key: None,
            force_path_style: false,
            presigned_url_expiration_secs: 3600,
        }
    }
}

impl S3Config {
    /// Lifetime of presigned URLs issued with this configuration
    pub fn presigned_url_ttl(&self) -> Duration {
        Duration::from_secs(self.presigned_url_expiration_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ttl_is_one_hour() {
        let config = S3Config::default();
        assert_eq!(config.presigned_url_ttl(), Duration::from_secs(3600));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = S3Config {
            access_key_id: Some("minio_user".to_string()),
            secret_access_key: Some("minio_password".to_string()),
            ..S3Config::default()
        };

        let rendered = format!("{:?}", config);
        assert!(rendered.contains("minio_user"));
        assert!(!rendered.contains("minio_password"));
    }
}
