use crate::models::{MatchPreferences, Profile};

/// Candidate filters. Each is a pure keep/drop predicate over the
/// target, one candidate and the target's preferences; they compose by
/// intersection in `apply_filters`. The target record itself never runs
/// through the pipeline.

/// Active only when the same-city preference is set; exact,
/// case-sensitive comparison.
#[inline]
pub fn passes_city_filter(
    target: &Profile,
    candidate: &Profile,
    preferences: &MatchPreferences,
) -> bool {
    !preferences.same_city || candidate.city == target.city
}

/// Candidate age within the target's preferred range, inclusive on both
/// ends.
#[inline]
pub fn passes_age_filter(candidate: &Profile, preferences: &MatchPreferences) -> bool {
    preferences.age_range.contains(candidate.age)
}

/// Active only when the preference is not the "any" wildcard;
/// case-insensitive comparison.
#[inline]
pub fn passes_gender_filter(candidate: &Profile, preferences: &MatchPreferences) -> bool {
    !preferences.wants_gender_filter()
        || candidate
            .gender
            .eq_ignore_ascii_case(&preferences.gender_preference)
}

/// Names of the filters that would be active for these preferences
pub fn active_filters(preferences: &MatchPreferences) -> Vec<String> {
    let mut names = Vec::new();
    if preferences.same_city {
        names.push("city".to_string());
    }
    names.push("age_range".to_string());
    if preferences.wants_gender_filter() {
        names.push("gender".to_string());
    }
    names
}

/// Run every candidate through the full pipeline, keeping input order.
/// A candidate carrying the target's own id is always dropped.
pub fn apply_filters(
    target: &Profile,
    candidates: Vec<Profile>,
    preferences: &MatchPreferences,
) -> Vec<Profile> {
    candidates
        .into_iter()
        .filter(|candidate| candidate.user_id != target.user_id)
        .filter(|candidate| passes_city_filter(target, candidate, preferences))
        .filter(|candidate| passes_age_filter(candidate, preferences))
        .filter(|candidate| passes_gender_filter(candidate, preferences))
        .collect()
}
