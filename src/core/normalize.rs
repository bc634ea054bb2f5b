use crate::models::{AgeRange, MatchPreferences, Profile};
use serde_json::Value;
use std::collections::BTreeSet;

/// Default for the three wellness metrics when absent or unparseable
const DEFAULT_METRIC: f64 = 75.0;
const DEFAULT_AGE: u8 = 30;
const DEFAULT_DURATION_MIN: u32 = 30;

// Pure transformation from raw request JSON to canonical records. No
// field absence is ever an error at this stage; everything falls back
// to a documented default so the scorer downstream always sees a
// fully-populated Profile.

/// Normalize the target profile, folding in the current-activity block.
///
/// The activity block's type/intensity/duration take precedence over
/// flat fields of the same meaning on the profile object.
pub fn normalize_target(profile: &Value, activity: Option<&Value>) -> Profile {
    let mut target = normalize_profile(profile, "target");

    if let Some(activity) = activity {
        if let Some(kind) = string_value(activity.get("type")) {
            target.suggestion_type = kind;
        }
        if let Some(intensity) = string_value(activity.get("intensity")) {
            target.suggestion_intensity = intensity;
        }
        if let Some(duration) = duration_value(activity.get("duration")) {
            target.duration_min = duration;
        }
    }

    target
}

/// Normalize the raw candidate list. Candidates missing a user_id get a
/// positional one, unique within the request.
pub fn normalize_candidates(raw: &[Value]) -> Vec<Profile> {
    raw.iter()
        .enumerate()
        .map(|(i, candidate)| normalize_profile(candidate, &format!("candidate_{}", i + 1)))
        .collect()
}

/// Normalize the preference block. An absent or non-object block yields
/// the defaults (no gender preference, [18, 65], no city constraint).
pub fn normalize_preferences(raw: Option<&Value>) -> MatchPreferences {
    let Some(raw) = raw else {
        return MatchPreferences::default();
    };

    MatchPreferences {
        gender_preference: string_value(raw.get("gender_preference"))
            .unwrap_or_else(|| "any".to_string()),
        age_range: age_range_value(raw.get("age_range")),
        same_city: raw
            .get("same_city")
            .and_then(Value::as_bool)
            .unwrap_or(false),
    }
}

/// Normalize a single profile object (target or candidate)
pub fn normalize_profile(raw: &Value, fallback_id: &str) -> Profile {
    Profile {
        user_id: string_value(raw.get("user_id")).unwrap_or_else(|| fallback_id.to_string()),
        age: age_value(raw.get("age")),
        gender: string_field(raw, "gender", "any"),
        fitness_level: string_field(raw, "fitness_level", "intermediate"),
        energy_level: metric_field(raw, "energy_level"),
        recovery_index: metric_field(raw, "recovery_index"),
        readiness_score: metric_field(raw, "readiness_score"),
        activity_interests: interests_value(raw.get("activity_interests")),
        city: string_field(raw, "city", "unknown"),
        intensity_preference: string_field(raw, "intensity_preference", "moderate"),
        suggestion_type: string_field(raw, "suggestion_type", "workout"),
        suggestion_intensity: string_field(raw, "suggestion_intensity", "moderate"),
        duration_min: duration_value(raw.get("duration")).unwrap_or(DEFAULT_DURATION_MIN),
        availability: string_field(raw, "availability", "unknown"),
    }
}

/// A wellness metric: nested `current_metrics.<key>` beats a flat
/// `<key>`, anything unparseable falls back to the default.
fn metric_field(raw: &Value, key: &str) -> f64 {
    raw.get("current_metrics")
        .and_then(|metrics| metrics.get(key))
        .and_then(number_value)
        .or_else(|| raw.get(key).and_then(number_value))
        .unwrap_or(DEFAULT_METRIC)
}

/// A JSON number, or a string that parses as one
fn number_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn string_value(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn string_field(raw: &Value, key: &str, default: &str) -> String {
    string_value(raw.get(key)).unwrap_or_else(|| default.to_string())
}

fn age_value(value: Option<&Value>) -> u8 {
    value
        .and_then(number_value)
        .filter(|age| *age >= 0.0 && *age <= u8::MAX as f64)
        .map(|age| age as u8)
        .unwrap_or(DEFAULT_AGE)
}

fn duration_value(value: Option<&Value>) -> Option<u32> {
    value
        .and_then(number_value)
        .filter(|d| *d >= 0.0 && *d <= u32::MAX as f64)
        .map(|d| d as u32)
}

/// Interests as a list of strings or one comma-separated string;
/// whitespace trimmed, empty entries and duplicates dropped.
fn interests_value(value: Option<&Value>) -> BTreeSet<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| string_value(Some(item)))
            .collect(),
        Some(Value::String(joined)) => joined
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => BTreeSet::new(),
    }
}

/// A two-element [min, max] array with min <= max; anything else is
/// malformed and falls back to the default range.
fn age_range_value(value: Option<&Value>) -> AgeRange {
    let Some(Value::Array(pair)) = value else {
        return AgeRange::default();
    };
    if pair.len() != 2 {
        return AgeRange::default();
    }

    let min = pair.first().and_then(number_value);
    let max = pair.get(1).and_then(number_value);
    match (min, max) {
        (Some(min), Some(max))
            if min >= 0.0 && max <= u8::MAX as f64 && min <= max =>
        {
            AgeRange {
                min: min as u8,
                max: max as u8,
            }
        }
        _ => AgeRange::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_metrics_beat_flat() {
        let raw = json!({
            "user_id": "u1",
            "energy_level": 50.0,
            "current_metrics": { "energy_level": 82.1 }
        });

        let profile = normalize_profile(&raw, "fallback");
        assert_eq!(profile.energy_level, 82.1);
    }

    #[test]
    fn test_flat_metric_fallback() {
        let raw = json!({ "recovery_index": 61.5 });
        let profile = normalize_profile(&raw, "fallback");
        assert_eq!(profile.recovery_index, 61.5);
    }

    #[test]
    fn test_metric_defaults_and_parse_failures() {
        let raw = json!({ "energy_level": "not a number", "readiness_score": "88.5" });
        let profile = normalize_profile(&raw, "fallback");

        assert_eq!(profile.energy_level, 75.0);
        assert_eq!(profile.recovery_index, 75.0);
        assert_eq!(profile.readiness_score, 88.5);
    }

    #[test]
    fn test_string_sentinels() {
        let profile = normalize_profile(&json!({}), "candidate_1");

        assert_eq!(profile.user_id, "candidate_1");
        assert_eq!(profile.fitness_level, "intermediate");
        assert_eq!(profile.gender, "any");
        assert_eq!(profile.city, "unknown");
        assert_eq!(profile.intensity_preference, "moderate");
        assert_eq!(profile.suggestion_type, "workout");
        assert_eq!(profile.suggestion_intensity, "moderate");
        assert_eq!(profile.duration_min, 30);
        assert!(profile.activity_interests.is_empty());
    }

    #[test]
    fn test_interests_from_list_and_comma_string() {
        let from_list = normalize_profile(
            &json!({ "activity_interests": ["yoga", "running", "yoga"] }),
            "c",
        );
        assert_eq!(from_list.activity_interests.len(), 2);
        assert!(from_list.activity_interests.contains("yoga"));

        let from_string = normalize_profile(
            &json!({ "activity_interests": "yoga, running , cycling" }),
            "c",
        );
        assert_eq!(from_string.activity_interests.len(), 3);
        assert!(from_string.activity_interests.contains("running"));
    }

    #[test]
    fn test_interests_case_sensitive() {
        let profile = normalize_profile(&json!({ "activity_interests": ["Yoga", "yoga"] }), "c");
        assert_eq!(profile.activity_interests.len(), 2);
    }

    #[test]
    fn test_candidate_ids_synthesized_by_position() {
        let raw = vec![json!({}), json!({ "user_id": "user_042" }), json!({})];
        let candidates = normalize_candidates(&raw);

        assert_eq!(candidates[0].user_id, "candidate_1");
        assert_eq!(candidates[1].user_id, "user_042");
        assert_eq!(candidates[2].user_id, "candidate_3");
    }

    #[test]
    fn test_preferences_defaults() {
        let prefs = normalize_preferences(None);
        assert_eq!(prefs.gender_preference, "any");
        assert_eq!(prefs.age_range.min, 18);
        assert_eq!(prefs.age_range.max, 65);
        assert!(!prefs.same_city);
    }

    #[test]
    fn test_age_range_malformed_falls_back() {
        for raw in [
            json!({ "age_range": [30] }),
            json!({ "age_range": [40, 20] }),
            json!({ "age_range": "20-40" }),
            json!({ "age_range": ["a", "b"] }),
        ] {
            let prefs = normalize_preferences(Some(&raw));
            assert_eq!(prefs.age_range.min, 18, "input: {}", raw);
            assert_eq!(prefs.age_range.max, 65, "input: {}", raw);
        }
    }

    #[test]
    fn test_age_range_valid_pair() {
        let prefs = normalize_preferences(Some(&json!({ "age_range": [22, 31] })));
        assert_eq!(prefs.age_range.min, 22);
        assert_eq!(prefs.age_range.max, 31);
    }

    #[test]
    fn test_activity_block_overrides_flat_fields() {
        let profile = json!({
            "user_id": "u1",
            "suggestion_type": "cardio",
            "duration": 20
        });
        let activity = json!({ "type": "yoga", "duration": 45, "intensity": "high" });

        let target = normalize_target(&profile, Some(&activity));
        assert_eq!(target.suggestion_type, "yoga");
        assert_eq!(target.suggestion_intensity, "high");
        assert_eq!(target.duration_min, 45);
    }

    #[test]
    fn test_target_without_activity_block() {
        let profile = json!({ "user_id": "u1", "suggestion_type": "cardio" });
        let target = normalize_target(&profile, None);
        assert_eq!(target.suggestion_type, "cardio");
        assert_eq!(target.duration_min, 30);
    }
}
