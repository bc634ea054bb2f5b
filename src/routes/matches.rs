use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;

use crate::config::MatchingSettings;
use crate::core::{normalize_candidates, normalize_preferences, normalize_target, MatchOptions, Matcher};
use crate::models::{ErrorResponse, HealthResponse, MatchRequest, MatchResponse};
use crate::services::{AdvisorClient, LocationClient, PredictorClient};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub matcher: Matcher,
    pub matching: MatchingSettings,
    pub advisor: Arc<AdvisorClient>,
    pub location: Arc<LocationClient>,
    pub predictor: Arc<PredictorClient>,
}

/// Configure matching routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/match", web::post().to(find_matches));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Find workout partners
///
/// POST /match
///
/// `user_profile` and `candidates` are required; `preferences`,
/// `current_activity_suggestion`, `apply_filters`,
/// `similarity_threshold` and `top_n` are optional. Missing optional
/// profile fields are defaulted by the normalizer, never rejected.
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<MatchRequest>,
) -> impl Responder {
    // Required blocks must at least be JSON objects
    if !req.user_profile.is_object() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: "user_profile must be an object".to_string(),
            status_code: 400,
        });
    }

    let target = normalize_target(&req.user_profile, req.current_activity_suggestion.as_ref());
    let preferences = normalize_preferences(req.preferences.as_ref());

    tracing::info!(
        "Finding matches for user: {}, candidates: {}, filtering: {}",
        target.user_id,
        req.candidates.len(),
        req.apply_filters
    );

    // Empty pool is a well-defined outcome, not an error. Loading a
    // fallback candidate set is a collaborator concern upstream of
    // this endpoint.
    if req.candidates.is_empty() {
        return HttpResponse::Ok().json(MatchResponse {
            matched_users: vec![],
            total_matches: 0,
            filters_applied: vec![],
            threshold: req.similarity_threshold,
            message: Some("No candidates available for matching".to_string()),
        });
    }

    let candidates = normalize_candidates(&req.candidates);

    let options = MatchOptions {
        apply_filters: req.apply_filters,
        threshold: req.similarity_threshold,
        top_n: req.top_n.min(state.matching.max_top_n) as usize,
    };

    let outcome = state
        .matcher
        .find_matches(&target, &preferences, candidates, &options);

    tracing::info!(
        "Returning {} matches for user {} (from {} candidates)",
        outcome.matches.len(),
        target.user_id,
        outcome.total_candidates
    );

    HttpResponse::Ok().json(MatchResponse {
        total_matches: outcome.matches.len(),
        matched_users: outcome.matches,
        filters_applied: outcome.filters_applied,
        threshold: options.threshold,
        message: None,
    })
}
