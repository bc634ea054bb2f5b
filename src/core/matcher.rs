use crate::core::{
    filters::{active_filters, apply_filters},
    scoring::calculate_compatibility,
};
use crate::models::{MatchPreferences, MatchedUser, Profile, ScoringWeights};

/// Per-request knobs for the pipeline
#[derive(Debug, Clone, Copy)]
pub struct MatchOptions {
    pub apply_filters: bool,
    pub threshold: f64,
    pub top_n: usize,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            apply_filters: true,
            threshold: 0.3,
            top_n: 10,
        }
    }
}

/// Result of the matching process
#[derive(Debug)]
pub struct MatchOutcome {
    pub matches: Vec<MatchedUser>,
    pub filters_applied: Vec<String>,
    pub total_candidates: usize,
}

/// Main matching orchestrator
///
/// # Pipeline stages
/// 1. Filter pipeline (city, age range, gender preference)
/// 2. Per-candidate compatibility scoring
/// 3. Threshold + ranked truncation
///
/// The weight table is fixed at construction; the struct is cheap to
/// clone into each worker and carries no mutable state.
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    /// Find workout partners for a target user.
    ///
    /// The target is held apart from the candidate pool; a candidate
    /// carrying the target's id is dropped before scoring, so the
    /// target can never match itself. When no candidate survives the
    /// filters, the scorer is never invoked.
    pub fn find_matches(
        &self,
        target: &Profile,
        preferences: &MatchPreferences,
        candidates: Vec<Profile>,
        options: &MatchOptions,
    ) -> MatchOutcome {
        let total_candidates = candidates.len();

        let (survivors, filters_applied) = if options.apply_filters {
            (
                apply_filters(target, candidates, preferences),
                active_filters(preferences),
            )
        } else {
            // Self-exclusion holds even with filtering disabled
            (
                candidates
                    .into_iter()
                    .filter(|c| c.user_id != target.user_id)
                    .collect(),
                Vec::new(),
            )
        };

        if survivors.is_empty() {
            return MatchOutcome {
                matches: Vec::new(),
                filters_applied,
                total_candidates,
            };
        }

        let scored: Vec<MatchedUser> = survivors
            .into_iter()
            .map(|candidate| {
                let (score, shared_interests) =
                    calculate_compatibility(target, &candidate, &self.weights);

                MatchedUser {
                    user_id: candidate.user_id,
                    compatibility_score: score,
                    shared_interests,
                    fitness_level: candidate.fitness_level,
                    age: candidate.age,
                    gender: candidate.gender,
                    energy_level: candidate.energy_level,
                    recovery_index: candidate.recovery_index,
                    readiness_score: candidate.readiness_score,
                    availability: candidate.availability,
                }
            })
            .collect();

        MatchOutcome {
            matches: rank(scored, options.threshold, options.top_n),
            filters_applied,
            total_candidates,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// Threshold, sort, truncate.
///
/// Scores strictly below the threshold are dropped; the sort is stable,
/// so equal-scoring candidates keep their input order.
pub fn rank(mut scored: Vec<MatchedUser>, threshold: f64, top_n: usize) -> Vec<MatchedUser> {
    scored.retain(|m| m.compatibility_score >= threshold);

    scored.sort_by(|a, b| {
        b.compatibility_score
            .partial_cmp(&a.compatibility_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    scored.truncate(top_n);
    scored
}
