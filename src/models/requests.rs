use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

/// Request to find workout partners.
///
/// Canonical schema: `preferences` and `current_activity_suggestion` are
/// top-level siblings of `user_profile`, matching what the app client
/// sends. Both profile objects and candidate entries are carried as raw
/// JSON and run through the normalizer, which supplies defaults for
/// every missing field, so only the two required top-level fields can
/// fail validation.
///
/// ```json
/// {
///   "user_profile": { "user_id": "...", "age": 24, "gender": "...", ... },
///   "preferences": { "gender_preference": "any", "age_range": [20, 35], "same_city": true },
///   "current_activity_suggestion": { "type": "yoga", "duration": 45, "intensity": "moderate" },
///   "candidates": [ { ... }, { ... } ],
///   "apply_filters": true,
///   "similarity_threshold": 0.3,
///   "top_n": 10
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRequest {
    pub user_profile: Value,
    pub candidates: Vec<Value>,
    #[serde(default)]
    pub preferences: Option<Value>,
    #[serde(default)]
    pub current_activity_suggestion: Option<Value>,
    #[serde(default = "default_apply_filters")]
    pub apply_filters: bool,
    #[serde(default = "default_threshold")]
    pub similarity_threshold: f64,
    #[serde(default = "default_top_n")]
    pub top_n: u16,
}

fn default_apply_filters() -> bool {
    true
}

fn default_threshold() -> f64 {
    0.3
}

fn default_top_n() -> u16 {
    10
}

/// Request for a location lookup
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LocationRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

/// Request for wellness score prediction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictRequest {
    pub user_profile: Value,
    /// Two-day window of sleep, heart-rate, nutrition and activity
    /// measurements, forwarded to the inference endpoint as-is
    pub historical_data: Value,
}
