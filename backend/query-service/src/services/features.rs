/// Feature store adapter
///
/// Writes go through `upsert_features`; enrichment reads through the
/// `FeatureSource` trait so it can run without a database in tests.
use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use std::collections::HashMap;
use tracing::info;

use crate::db::feature_repo;
use crate::error::{AppError, Result};
use crate::models::{FeatureMap, FeatureRecord};

/// Batched read path for feature documents
#[async_trait]
pub trait FeatureSource: Send + Sync {
    /// Feature documents for the given ids; ids without a record are absent
    async fn features_for(&self, approvable_ids: &[i64]) -> Result<HashMap<i64, Value>>;
}

#[derive(Clone)]
pub struct FeatureStore {
    pool: PgPool,
}

impl FeatureStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store `features` as the document for `approvable_id`
    ///
    /// Fails with `NotFound` when the approvable does not exist, in which
    /// case no feature record is written.
    pub async fn upsert_features(
        &self,
        approvable_id: i64,
        features: FeatureMap,
    ) -> Result<FeatureRecord> {
        if !feature_repo::approvable_exists(&self.pool, approvable_id).await? {
            return Err(AppError::NotFound(format!(
                "Approvable with ID {} not found",
                approvable_id
            )));
        }

        let record =
            feature_repo::upsert_features(&self.pool, approvable_id, &Value::Object(features))
                .await?;

        info!(
            approvable_id,
            updated_at = %record.updated_at,
            "Features updated"
        );

        Ok(record)
    }
}

#[async_trait]
impl FeatureSource for FeatureStore {
    async fn features_for(&self, approvable_ids: &[i64]) -> Result<HashMap<i64, Value>> {
        let mut ids = approvable_ids.to_vec();
        ids.sort_unstable();
        ids.dedup();

        Ok(feature_repo::features_for_ids(&self.pool, &ids).await?)
    }
}
