/// Shared S3 utilities
///
/// Builds one AWS S3 client per process from explicit configuration
/// (MinIO endpoint, static credentials, path-style addressing) and exposes
/// the object operations the services need.
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::Client;
use std::sync::Arc;
use tracing::debug;

pub mod config;
pub mod operations;

pub use config::S3Config;

/// Errors raised by S3 operations
#[derive(Debug, thiserror::Error)]
pub enum S3Error {
    #[error("Invalid presigning configuration: {0}")]
    PresigningConfig(String),

    #[error("S3 request failed: {0}")]
    Request(String),
}

/// Shared S3 client wrapper
#[derive(Clone)]
pub struct S3Client {
    client: Arc<Client>,
    config: S3Config,
}

impl S3Client {
    /// Create a client from explicit configuration
    ///
    /// Static credentials are used when both keys are set, otherwise the
    /// default AWS credential chain applies.
    pub async fn from_config(config: S3Config) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));

        if let (Some(access_key_id), Some(secret_access_key)) =
            (&config.access_key_id, &config.secret_access_key)
        {
            let credentials = Credentials::new(
                access_key_id,
                secret_access_key,
                None, // No session token
                None, // No expiration
                "s3_utils_static",
            );
            loader = loader.credentials_provider(credentials);
        }

        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.force_path_style)
            .build();

        debug!(
            bucket = %config.bucket,
            endpoint = ?config.endpoint,
            path_style = config.force_path_style,
            "S3 client initialized"
        );

        Self {
            client: Arc::new(Client::from_conf(s3_config)),
            config,
        }
    }

    /// Get reference to underlying AWS S3 client
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Get S3 configuration
    pub fn config(&self) -> &S3Config {
        &self.config
    }
}
