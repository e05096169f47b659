//! Query Service
//!
//! HTTP API over the invoice warehouse: runs caller-supplied SQL, enriches
//! invoice rows with presigned image URLs and stored feature documents, and
//! upserts per-invoice feature documents.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

use actix_web::web;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

pub use crate::config::Config;
pub use crate::error::{AppError, Result};

use crate::db::QueryExecutor;
use crate::services::{EnrichmentPipeline, FeatureStore, ObjectUrlSigner, PresignedUrlIssuer};

/// Shared request-handling state, built once at start-up
#[derive(Clone)]
pub struct AppState {
    pub executor: QueryExecutor,
    pub feature_store: Arc<FeatureStore>,
    pub enrichment: EnrichmentPipeline,
}

impl AppState {
    pub fn new(
        pool: PgPool,
        signer: Arc<dyn ObjectUrlSigner>,
        presigned_url_ttl: Duration,
        enrichment_marker: &str,
    ) -> Self {
        let feature_store = Arc::new(FeatureStore::new(pool.clone()));
        let issuer = PresignedUrlIssuer::new(signer, presigned_url_ttl);
        let enrichment = EnrichmentPipeline::new(issuer, feature_store.clone(), enrichment_marker);

        Self {
            executor: QueryExecutor::new(pool),
            feature_store,
            enrichment,
        }
    }
}

/// JSON extractor config rendering body errors as `{"detail": ...}` (422)
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::Validation(err.to_string()).into())
}

/// Register every route of the service
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/", web::get().to(handlers::root))
        .route("/health", web::get().to(handlers::health_check))
        .route("/ready", web::get().to(handlers::readiness_check))
        .route("/execute-query", web::post().to(handlers::execute_query))
        .route("/update-features", web::post().to(handlers::update_features));
}
