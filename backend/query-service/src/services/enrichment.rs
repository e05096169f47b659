/// Result enrichment for invoice queries
///
/// Adds an `image_url` per row when the result has an `image_path` column and
/// a `features` document per row when it has an `id` column. The two steps
/// are independent and neither can fail the request.
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::models::RowSet;
use crate::services::features::FeatureSource;
use crate::services::presign::PresignedUrlIssuer;

pub const ID_COLUMN: &str = "id";
pub const IMAGE_PATH_COLUMN: &str = "image_path";
pub const IMAGE_URL_COLUMN: &str = "image_url";
pub const FEATURES_COLUMN: &str = "features";

#[derive(Clone)]
pub struct EnrichmentPipeline {
    issuer: PresignedUrlIssuer,
    features: Arc<dyn FeatureSource>,
    marker: String,
}

impl EnrichmentPipeline {
    pub fn new(
        issuer: PresignedUrlIssuer,
        features: Arc<dyn FeatureSource>,
        marker: &str,
    ) -> Self {
        Self {
            issuer,
            features,
            marker: marker.to_lowercase(),
        }
    }

    /// Whether the query text mentions the enrichable entity
    ///
    /// Case-insensitive substring match on the raw text, not a schema check.
    pub fn targets(&self, query: &str) -> bool {
        query.to_lowercase().contains(&self.marker)
    }

    pub async fn enrich(&self, mut row_set: RowSet, is_target_entity_type: bool) -> RowSet {
        if !is_target_entity_type {
            return row_set;
        }

        if row_set.has_column(IMAGE_PATH_COLUMN) {
            self.attach_image_urls(&mut row_set).await;
        }

        if row_set.has_column(ID_COLUMN) {
            self.attach_features(&mut row_set).await;
        }

        row_set
    }

    /// One signer call per row; empty or null paths get a null URL
    async fn attach_image_urls(&self, row_set: &mut RowSet) {
        for row in row_set.rows.iter_mut() {
            let url = match row.get(IMAGE_PATH_COLUMN) {
                Some(Value::String(path)) if !path.is_empty() => self.issuer.issue_url(path).await,
                _ => None,
            };
            row.insert(
                IMAGE_URL_COLUMN.to_string(),
                url.map(Value::String).unwrap_or(Value::Null),
            );
        }

        row_set.push_column(IMAGE_URL_COLUMN);
    }

    async fn attach_features(&self, row_set: &mut RowSet) {
        let ids: Vec<i64> = row_set
            .rows
            .iter()
            .filter_map(|row| row.get(ID_COLUMN).and_then(approvable_id))
            .collect();

        let documents = if ids.is_empty() {
            HashMap::new()
        } else {
            match self.features.features_for(&ids).await {
                Ok(documents) => documents,
                Err(e) => {
                    warn!(
                        error = %e,
                        ids = ids.len(),
                        "Failed to fetch features, using empty documents"
                    );
                    HashMap::new()
                }
            }
        };
        debug!(
            requested = ids.len(),
            found = documents.len(),
            "Attached feature documents"
        );

        for row in row_set.rows.iter_mut() {
            let document = row
                .get(ID_COLUMN)
                .and_then(approvable_id)
                .and_then(|id| documents.get(&id).cloned())
                .unwrap_or_else(|| Value::Object(Map::new()));
            row.insert(FEATURES_COLUMN.to_string(), document);
        }

        row_set.push_column(FEATURES_COLUMN);
    }
}

/// Integer id of a row; integral floats (NUMERIC ids) count as well
fn approvable_id(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|id| id.fract() == 0.0 && id.abs() < i64::MAX as f64)
            .map(|id| id as i64)
    })
}
