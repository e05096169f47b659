/// Feature handler - stores the feature document of an approvable
use actix_web::{web, HttpResponse};
use tracing::error;

use crate::error::{AppError, Result};
use crate::models::{FeatureUpdateRequest, FeatureUpdateResponse};
use crate::AppState;

pub async fn update_features(
    state: web::Data<AppState>,
    req: web::Json<FeatureUpdateRequest>,
) -> Result<HttpResponse> {
    let FeatureUpdateRequest {
        approvable_id,
        features,
    } = req.into_inner();

    match state
        .feature_store
        .upsert_features(approvable_id, features)
        .await
    {
        Ok(_) => Ok(HttpResponse::Ok().json(FeatureUpdateResponse {
            success: true,
            message: "Features updated successfully".to_string(),
        })),
        Err(e @ AppError::NotFound(_)) => Err(e),
        Err(e) => {
            error!(approvable_id, error = %e, "Feature update failed");
            Err(e)
        }
    }
}
