/// Feature repository - database operations for `invoices_features`
///
/// Id columns are cast to BIGINT and timestamps to TIMESTAMPTZ in SQL so an
/// externally provisioned schema using INT4 / TIMESTAMP still decodes.
use crate::models::FeatureRecord;
use serde_json::Value;
use sqlx::PgPool;
use std::collections::HashMap;

/// Check whether an approvable exists in the primary entity table
pub async fn approvable_exists(pool: &PgPool, approvable_id: i64) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS(SELECT 1 FROM invoices WHERE id = $1)
        "#,
    )
    .bind(approvable_id)
    .fetch_one(pool)
    .await
}

/// Insert the feature document for an approvable, or replace the existing one
///
/// Concurrent writers for the same id resolve last-writer-wins; the unique
/// constraint on `approvable_id` keeps it to one row.
pub async fn upsert_features(
    pool: &PgPool,
    approvable_id: i64,
    features: &Value,
) -> Result<FeatureRecord, sqlx::Error> {
    let record = sqlx::query_as::<_, FeatureRecord>(
        r#"
        INSERT INTO invoices_features (approvable_id, features)
        VALUES ($1, $2)
        ON CONFLICT (approvable_id)
        DO UPDATE SET features = EXCLUDED.features, updated_at = CURRENT_TIMESTAMP
        RETURNING approvable_id::BIGINT AS approvable_id,
                  features,
                  updated_at::TIMESTAMPTZ AS updated_at
        "#,
    )
    .bind(approvable_id)
    .bind(features)
    .fetch_one(pool)
    .await?;

    Ok(record)
}

/// Get the feature record for one approvable
pub async fn find_features(
    pool: &PgPool,
    approvable_id: i64,
) -> Result<Option<FeatureRecord>, sqlx::Error> {
    let record = sqlx::query_as::<_, FeatureRecord>(
        r#"
        SELECT approvable_id::BIGINT AS approvable_id,
               features,
               updated_at::TIMESTAMPTZ AS updated_at
        FROM invoices_features
        WHERE approvable_id = $1
        "#,
    )
    .bind(approvable_id)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

/// Batch-load feature documents keyed by approvable id
pub async fn features_for_ids(
    pool: &PgPool,
    approvable_ids: &[i64],
) -> Result<HashMap<i64, Value>, sqlx::Error> {
    if approvable_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = sqlx::query_as::<_, (i64, Value)>(
        r#"
        SELECT approvable_id::BIGINT, features
        FROM invoices_features
        WHERE approvable_id = ANY($1)
        "#,
    )
    .bind(approvable_ids)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().collect())
}
