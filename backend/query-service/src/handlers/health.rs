/// Root, liveness and readiness endpoints
use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::warn;

use crate::config::SERVICE_NAME;
use crate::models::RootResponse;
use crate::AppState;

pub async fn root() -> HttpResponse {
    HttpResponse::Ok().json(RootResponse {
        message: "Redshift Query API is running".to_string(),
    })
}

pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": SERVICE_NAME
    }))
}

/// Ready once the warehouse answers `SELECT 1`
pub async fn readiness_check(state: web::Data<AppState>) -> HttpResponse {
    match sqlx::query("SELECT 1")
        .execute(state.executor.pool())
        .await
    {
        Ok(_) => HttpResponse::Ok().json(json!({
            "status": "ready",
            "service": SERVICE_NAME
        })),
        Err(e) => {
            warn!(error = %e, "Readiness check failed");
            HttpResponse::ServiceUnavailable().json(json!({
                "status": "not_ready",
                "service": SERVICE_NAME,
                "detail": e.to_string()
            }))
        }
    }
}
