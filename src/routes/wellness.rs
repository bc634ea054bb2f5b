use actix_web::{web, HttpResponse, Responder};
use serde_json::Value;
use validator::Validate;

use crate::models::{ErrorResponse, LocationRequest, PredictRequest};
use crate::routes::matches::AppState;
use crate::services::AdvisorError;

/// Configure the collaborator-facing routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/advice", web::post().to(generate_advice))
        .route("/location", web::post().to(lookup_location))
        .route("/predict", web::post().to(predict_wellness));
}

/// Generate personalized health advice
///
/// POST /advice
///
/// The body is forwarded to the language-model collaborator; its reply
/// is validated against the fixed advice schema before being returned.
async fn generate_advice(
    state: web::Data<AppState>,
    body: web::Json<Value>,
) -> impl Responder {
    match state.advisor.generate_advice(&body).await {
        Ok(advice) => HttpResponse::Ok().json(advice),
        Err(e @ AdvisorError::InvalidResponse(_)) => {
            tracing::error!("Advice generation returned an invalid reply: {}", e);
            HttpResponse::BadGateway().json(ErrorResponse {
                error: "Invalid advice response".to_string(),
                message: e.to_string(),
                status_code: 502,
            })
        }
        Err(e) => {
            tracing::error!("Advice generation failed: {}", e);
            HttpResponse::BadGateway().json(ErrorResponse {
                error: "Advice generation failed".to_string(),
                message: e.to_string(),
                status_code: 502,
            })
        }
    }
}

/// Weather, season, city and nearby fitness places for a coordinate
///
/// POST /location
async fn lookup_location(
    state: web::Data<AppState>,
    req: web::Json<LocationRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let response = state.location.lookup(req.latitude, req.longitude).await;
    HttpResponse::Ok().json(response)
}

/// Predict wellness scores from a two-day measurement window
///
/// POST /predict
async fn predict_wellness(
    state: web::Data<AppState>,
    req: web::Json<PredictRequest>,
) -> impl Responder {
    match state
        .predictor
        .predict(&req.user_profile, &req.historical_data)
        .await
    {
        Ok(scores) => HttpResponse::Ok().json(scores),
        Err(e) => {
            tracing::error!("Wellness prediction failed: {}", e);
            HttpResponse::BadGateway().json(ErrorResponse {
                error: "Prediction failed".to_string(),
                message: e.to_string(),
                status_code: 502,
            })
        }
    }
}
