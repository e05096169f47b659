/// S3 object operations
use crate::{S3Client, S3Error};
use aws_sdk_s3::presigning::PresigningConfig;
use std::time::Duration;

impl S3Client {
    /// Generate a presigned GET URL for `key` in the configured bucket
    ///
    /// Signing is local; the object is not checked for existence.
    pub async fn presigned_get_url(
        &self,
        key: &str,
        expires_in: Duration,
    ) -> Result<String, S3Error> {
        let presigning_config = PresigningConfig::expires_in(expires_in)
            .map_err(|e| S3Error::PresigningConfig(e.to_string()))?;

        let request = self
            .client()
            .get_object()
            .bucket(&self.config().bucket)
            .key(key)
            .presigned(presigning_config)
            .await
            .map_err(|e| S3Error::Request(e.to_string()))?;

        Ok(request.uri().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::S3Config;

    fn minio_config() -> S3Config {
        S3Config {
            bucket: "redshift-app-bucket".to_string(),
            region: "us-east-1".to_string(),
            endpoint: Some("http://localhost:9000".to_string()),
            access_key_id: Some("minio_user".to_string()),
            secret_access_key: Some("minio_password".to_string()),
            force_path_style: true,
            presigned_url_expiration_secs: 3600,
        }
    }

    #[tokio::test]
    async fn test_presigned_get_url_path_style() {
        let client = S3Client::from_config(minio_config()).await;

        let url = client
            .presigned_get_url("product-images/photo1.webp", Duration::from_secs(3600))
            .await
            .expect("presign");

        assert!(url.starts_with(
            "http://localhost:9000/redshift-app-bucket/product-images/photo1.webp?"
        ));
        assert!(url.contains("X-Amz-Expires=3600"));
        assert!(url.contains("X-Amz-Signature="));
    }

    #[tokio::test]
    async fn test_presigned_get_url_rejects_excessive_ttl() {
        let client = S3Client::from_config(minio_config()).await;

        // SigV4 presigned URLs are capped at seven days
        let result = client
            .presigned_get_url(
                "product-images/photo1.webp",
                Duration::from_secs(8 * 24 * 3600),
            )
            .await;

        assert!(matches!(result, Err(S3Error::PresigningConfig(_))));
    }
}
