use crate::models::{Profile, ScoringWeights};

/// Per-attribute similarity between a candidate and the target, each
/// normalized to [0,1]
pub type SimilarityFn = fn(&Profile, &Profile) -> f64;

/// The fixed, ordered attribute table. Adding an attribute is a single
/// insertion here plus a weight field.
pub fn similarity_table(weights: &ScoringWeights) -> [(&'static str, f64, SimilarityFn); 8] {
    [
        ("fitness_level", weights.fitness_level, fitness_similarity),
        ("energy_level", weights.energy_level, energy_similarity),
        ("recovery_index", weights.recovery_index, recovery_similarity),
        ("readiness_score", weights.readiness_score, readiness_similarity),
        ("interests", weights.interests, interests_similarity),
        ("intensity", weights.intensity, intensity_similarity),
        ("suggestion_type", weights.suggestion_type, suggestion_similarity),
        ("duration", weights.duration, duration_similarity),
    ]
}

/// Weighted compatibility score in [0,1], rounded to 3 decimal places,
/// plus the interests the two users share.
///
/// Each candidate's score depends only on itself and the target; there
/// is no cross-candidate state.
pub fn calculate_compatibility(
    target: &Profile,
    candidate: &Profile,
    weights: &ScoringWeights,
) -> (f64, Vec<String>) {
    let score: f64 = similarity_table(weights)
        .iter()
        .map(|(_, weight, similarity)| weight * similarity(target, candidate))
        .sum();

    let shared: Vec<String> = target
        .activity_interests
        .intersection(&candidate.activity_interests)
        .cloned()
        .collect();

    (round3(score), shared)
}

#[inline]
fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// 1.0 on a case-insensitive level match, else 0.0
#[inline]
fn fitness_similarity(target: &Profile, candidate: &Profile) -> f64 {
    if target
        .fitness_level
        .eq_ignore_ascii_case(&candidate.fitness_level)
    {
        1.0
    } else {
        0.0
    }
}

/// Linear falloff over the metric's nominal [0,100] span
#[inline]
fn metric_similarity(a: f64, b: f64) -> f64 {
    (1.0 - (a - b).abs() / 100.0).max(0.0)
}

#[inline]
fn energy_similarity(target: &Profile, candidate: &Profile) -> f64 {
    metric_similarity(target.energy_level, candidate.energy_level)
}

#[inline]
fn recovery_similarity(target: &Profile, candidate: &Profile) -> f64 {
    metric_similarity(target.recovery_index, candidate.recovery_index)
}

#[inline]
fn readiness_similarity(target: &Profile, candidate: &Profile) -> f64 {
    metric_similarity(target.readiness_score, candidate.readiness_score)
}

/// Jaccard index of the interest sets; 0.0 when the union is empty
#[inline]
fn interests_similarity(target: &Profile, candidate: &Profile) -> f64 {
    let intersection = target
        .activity_interests
        .intersection(&candidate.activity_interests)
        .count();
    let union = target
        .activity_interests
        .union(&candidate.activity_interests)
        .count();

    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

#[inline]
fn intensity_similarity(target: &Profile, candidate: &Profile) -> f64 {
    if target.intensity_preference == candidate.intensity_preference {
        1.0
    } else {
        0.0
    }
}

#[inline]
fn suggestion_similarity(target: &Profile, candidate: &Profile) -> f64 {
    if target.suggestion_type == candidate.suggestion_type {
        1.0
    } else {
        0.0
    }
}

/// Linear falloff over a one-hour span of planned duration
#[inline]
fn duration_similarity(target: &Profile, candidate: &Profile) -> f64 {
    let delta = (target.duration_min as f64 - candidate.duration_min as f64).abs();
    (1.0 - delta / 60.0).max(0.0)
}
