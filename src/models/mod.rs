// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Profile, MatchPreferences, AgeRange, MatchedUser, ScoringWeights, WellnessScores, NearbyPlace};
pub use requests::{MatchRequest, LocationRequest, PredictRequest};
pub use responses::{MatchResponse, LocationResponse, Coordinates, HealthResponse, ErrorResponse};
