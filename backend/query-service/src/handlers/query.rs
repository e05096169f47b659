/// Query handler - runs arbitrary SQL and enriches invoice results
use actix_web::{web, HttpResponse};
use tracing::{debug, error};

use crate::error::Result;
use crate::models::{QueryRequest, QueryResponse};
use crate::AppState;

/// Execute the submitted query and return its rows and columns
pub async fn execute_query(
    state: web::Data<AppState>,
    req: web::Json<QueryRequest>,
) -> Result<HttpResponse> {
    let query = req.into_inner().query;
    debug!(query = %query, "Executing query");

    let row_set = state.executor.fetch_rows(&query).await.map_err(|e| {
        error!(error = %e, "Query execution failed");
        e
    })?;

    let is_target = state.enrichment.targets(&query);
    let row_set = state.enrichment.enrich(row_set, is_target).await;

    Ok(HttpResponse::Ok().json(QueryResponse::from(row_set)))
}
