//! FitMatch Algo - Workout partner matching service for the FitMatch fitness app
//!
//! This library provides the core matching algorithm used by the FitMatch app.
//! It normalizes flexible profile input, runs a composable filter pipeline and
//! ranks candidates by a weighted multi-attribute compatibility score.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Matcher, MatchOptions, normalize::{normalize_candidates, normalize_preferences, normalize_target}};
pub use crate::models::{Profile, MatchPreferences, MatchedUser, ScoringWeights, MatchRequest, MatchResponse};
