use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Canonical user profile, shared by the target and every candidate.
///
/// Raw request JSON is turned into this record by the normalizer in
/// `core::normalize`; every field has a documented default, so a profile
/// can always be built from partial input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: String,
    pub age: u8,
    pub gender: String,
    pub fitness_level: String,
    pub energy_level: f64,
    pub recovery_index: f64,
    pub readiness_score: f64,
    // BTreeSet keeps serialization order deterministic across runs
    pub activity_interests: BTreeSet<String>,
    pub city: String,
    pub intensity_preference: String,
    pub suggestion_type: String,
    pub suggestion_intensity: String,
    pub duration_min: u32,
    pub availability: String,
}

/// Inclusive age range, min <= max
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AgeRange {
    pub min: u8,
    pub max: u8,
}

impl AgeRange {
    pub fn contains(&self, age: u8) -> bool {
        age >= self.min && age <= self.max
    }
}

impl Default for AgeRange {
    fn default() -> Self {
        Self { min: 18, max: 65 }
    }
}

/// Matching preferences attached to the target user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchPreferences {
    /// "any" disables the gender filter
    pub gender_preference: String,
    pub age_range: AgeRange,
    pub same_city: bool,
}

impl Default for MatchPreferences {
    fn default() -> Self {
        Self {
            gender_preference: "any".to_string(),
            age_range: AgeRange::default(),
            same_city: false,
        }
    }
}

impl MatchPreferences {
    /// True unless the wildcard "any" preference is set
    pub fn wants_gender_filter(&self) -> bool {
        !self.gender_preference.eq_ignore_ascii_case("any")
    }
}

/// One ranked match, with enough profile data echoed back for display
/// without a second lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedUser {
    pub user_id: String,
    pub compatibility_score: f64,
    pub shared_interests: Vec<String>,
    pub fitness_level: String,
    pub age: u8,
    pub gender: String,
    pub energy_level: f64,
    pub recovery_index: f64,
    pub readiness_score: f64,
    pub availability: String,
}

/// Per-attribute weights for the compatibility score.
///
/// The defaults sum to exactly 1.0, which keeps the weighted sum inside
/// [0,1] as long as each similarity is inside [0,1].
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    pub fitness_level: f64,
    pub energy_level: f64,
    pub recovery_index: f64,
    pub readiness_score: f64,
    pub interests: f64,
    pub intensity: f64,
    pub suggestion_type: f64,
    pub duration: f64,
}

impl ScoringWeights {
    pub fn sum(&self) -> f64 {
        self.fitness_level
            + self.energy_level
            + self.recovery_index
            + self.readiness_score
            + self.interests
            + self.intensity
            + self.suggestion_type
            + self.duration
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            fitness_level: 0.15,
            energy_level: 0.15,
            recovery_index: 0.15,
            readiness_score: 0.15,
            interests: 0.20,
            intensity: 0.10,
            suggestion_type: 0.05,
            duration: 0.05,
        }
    }
}

/// Wellness scores returned by the predictor collaborator.
///
/// Each score is null when the remote model artifact is unavailable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WellnessScores {
    #[serde(rename = "Energy Level")]
    pub energy_level: Option<f64>,
    #[serde(rename = "Recovery Index")]
    pub recovery_index: Option<f64>,
    #[serde(rename = "Readiness Score")]
    pub readiness_score: Option<f64>,
}

/// A nearby fitness point of interest from the location service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyPlace {
    pub name: String,
    #[serde(rename = "type")]
    pub place_type: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}
