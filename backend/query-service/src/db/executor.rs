/// Query executor - runs caller-supplied SQL against the warehouse
///
/// Statement text is passed through verbatim; the caller owns its
/// correctness and safety.
use sqlx::{Column, Executor, PgPool, Statement};
use tracing::debug;

use crate::db::row_codec::row_to_json;
use crate::error::Result;
use crate::models::{QueryIntent, QueryOutcome, RowSet};

#[derive(Clone)]
pub struct QueryExecutor {
    pool: PgPool,
}

impl QueryExecutor {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Run `sql`, materializing rows or committing it depending on `intent`
    pub async fn run(&self, sql: &str, intent: QueryIntent) -> Result<QueryOutcome> {
        match intent {
            QueryIntent::ReturnsRows => self.fetch_rows(sql).await.map(QueryOutcome::Rows),
            QueryIntent::NoReturn => self
                .execute(sql)
                .await
                .map(|rows_affected| QueryOutcome::Done { rows_affected }),
        }
    }

    /// Execute a data-returning statement and collect every row
    ///
    /// Columns come from the prepared statement, so an empty result still
    /// reports the projection.
    pub async fn fetch_rows(&self, sql: &str) -> Result<RowSet> {
        let mut conn = self.pool.acquire().await?;

        let statement = (&mut *conn).prepare(sql).await?;
        let columns: Vec<String> = statement
            .columns()
            .iter()
            .map(|column| column.name().to_string())
            .collect();

        let rows = statement.query().fetch_all(&mut *conn).await?;
        debug!(
            rows = rows.len(),
            columns = columns.len(),
            "Query returned result set"
        );

        Ok(RowSet::new(columns, rows.iter().map(row_to_json).collect()))
    }

    /// Execute a single statement in its own transaction
    pub async fn execute(&self, sql: &str) -> Result<u64> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(sql).execute(&mut *tx).await?;
        tx.commit().await?;

        debug!(rows_affected = result.rows_affected(), "Statement committed");
        Ok(result.rows_affected())
    }
}
