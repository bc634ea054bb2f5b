use serde::{Deserialize, Serialize};
use crate::models::domain::{MatchedUser, NearbyPlace};

/// Response for the match endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    pub matched_users: Vec<MatchedUser>,
    pub total_matches: usize,
    /// Names of the filters that were active for this request
    pub filters_applied: Vec<String>,
    pub threshold: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Response for the location endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationResponse {
    pub weather: String,
    pub season: String,
    pub location: Coordinates,
    pub city: String,
    pub available_locations: Vec<NearbyPlace>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
