// Integration tests for FitMatch Algo

use fitmatch_algo::core::{MatchOptions, Matcher};
use fitmatch_algo::core::normalize::{normalize_candidates, normalize_preferences, normalize_target};
use fitmatch_algo::models::{AgeRange, MatchPreferences, Profile};
use serde_json::json;

fn create_test_profile(id: &str, age: u8, gender: &str, city: &str, interests: &[&str]) -> Profile {
    Profile {
        user_id: id.to_string(),
        age,
        gender: gender.to_string(),
        fitness_level: "intermediate".to_string(),
        energy_level: 75.0,
        recovery_index: 75.0,
        readiness_score: 75.0,
        activity_interests: interests.iter().map(|s| s.to_string()).collect(),
        city: city.to_string(),
        intensity_preference: "moderate".to_string(),
        suggestion_type: "workout".to_string(),
        suggestion_intensity: "moderate".to_string(),
        duration_min: 30,
        availability: "today_evening".to_string(),
    }
}

fn create_test_preferences() -> MatchPreferences {
    MatchPreferences {
        gender_preference: "female".to_string(),
        age_range: AgeRange { min: 21, max: 35 },
        same_city: true,
    }
}

#[test]
fn test_integration_end_to_end_matching() {
    let matcher = Matcher::with_default_weights();
    let target = create_test_profile("target", 27, "female", "Oslo", &["yoga", "running"]);
    let preferences = create_test_preferences();

    let candidates = vec![
        create_test_profile("1", 25, "female", "Oslo", &["yoga"]),          // Good match
        create_test_profile("2", 28, "female", "Oslo", &["running"]),       // Good match
        create_test_profile("3", 30, "female", "Oslo", &["yoga", "running"]), // Good match
        create_test_profile("4", 40, "female", "Oslo", &["yoga"]),          // Too old
        create_test_profile("5", 25, "male", "Oslo", &["yoga"]),            // Wrong gender
        create_test_profile("6", 25, "female", "Bergen", &["yoga"]),        // Wrong city
    ];

    let result = matcher.find_matches(&target, &preferences, candidates, &MatchOptions::default());

    assert_eq!(result.matches.len(), 3);
    assert_eq!(result.total_candidates, 6);

    // All matches pass the active filters
    for m in &result.matches {
        assert_eq!(m.gender, "female");
        assert!(m.age >= 21 && m.age <= 35);
    }

    // Sorted by score, descending
    for i in 1..result.matches.len() {
        assert!(
            result.matches[i - 1].compatibility_score >= result.matches[i].compatibility_score,
            "Matches not sorted by score"
        );
    }

    // The full-overlap candidate ranks first
    assert_eq!(result.matches[0].user_id, "3");
}

#[test]
fn test_integration_threshold_and_bound_properties() {
    let matcher = Matcher::with_default_weights();
    let target = create_test_profile("target", 27, "female", "Oslo", &["yoga"]);
    let preferences = create_test_preferences();

    let candidates: Vec<Profile> = (0..30)
        .map(|i| {
            let interests: &[&str] = if i % 3 == 0 { &["yoga"] } else { &["boxing"] };
            create_test_profile(&format!("c{}", i), 22 + (i % 12) as u8, "female", "Oslo", interests)
        })
        .collect();

    let options = MatchOptions {
        apply_filters: true,
        threshold: 0.5,
        top_n: 7,
    };
    let result = matcher.find_matches(&target, &preferences, candidates, &options);

    assert!(result.matches.len() <= 7);
    for m in &result.matches {
        assert!(m.compatibility_score >= 0.5);
        assert!((0.0..=1.0).contains(&m.compatibility_score));
    }
}

#[test]
fn test_integration_threshold_above_all_scores_yields_empty() {
    let matcher = Matcher::with_default_weights();
    let target = create_test_profile("target", 27, "female", "Oslo", &["yoga"]);
    let preferences = create_test_preferences();

    let candidates = vec![
        create_test_profile("1", 25, "female", "Oslo", &["yoga"]),
        create_test_profile("2", 26, "female", "Oslo", &["yoga"]),
    ];

    let options = MatchOptions {
        threshold: 1.0,
        ..Default::default()
    };
    let result = matcher.find_matches(&target, &preferences, candidates.clone(), &options);

    assert!(result.matches.is_empty());
    assert_eq!(result.total_candidates, candidates.len());
}

#[test]
fn test_integration_deterministic_output() {
    let matcher = Matcher::with_default_weights();

    let raw_target = json!({
        "user_id": "u1",
        "age": 24,
        "gender": "female",
        "city": "Oslo",
        "activity_interests": "yoga, running, climbing",
        "current_metrics": { "energy_level": 82.1, "recovery_index": 88.7 }
    });
    let raw_prefs = json!({ "gender_preference": "any", "age_range": [20, 40], "same_city": false });
    let raw_candidates: Vec<serde_json::Value> = (0..10)
        .map(|i| {
            json!({
                "age": 22 + i,
                "gender": if i % 2 == 0 { "female" } else { "male" },
                "activity_interests": ["yoga", "boxing"],
                "energy_level": 60.0 + i as f64
            })
        })
        .collect();

    let run = || {
        let target = normalize_target(&raw_target, None);
        let preferences = normalize_preferences(Some(&raw_prefs));
        let candidates = normalize_candidates(&raw_candidates);
        let outcome = matcher.find_matches(&target, &preferences, candidates, &MatchOptions::default());
        serde_json::to_string(&outcome.matches).unwrap()
    };

    assert_eq!(run(), run());
}

#[test]
fn test_integration_city_filter_property() {
    let matcher = Matcher::with_default_weights();
    let target = create_test_profile("target", 27, "female", "Oslo", &["yoga"]);
    let preferences = MatchPreferences {
        gender_preference: "any".to_string(),
        age_range: AgeRange { min: 18, max: 65 },
        same_city: true,
    };

    let candidates = vec![
        create_test_profile("1", 25, "female", "Oslo", &["yoga"]),
        create_test_profile("2", 25, "male", "Bergen", &["yoga"]),
        create_test_profile("3", 25, "male", "Oslo", &["yoga"]),
        create_test_profile("4", 25, "female", "oslo", &["yoga"]), // case differs
    ];

    let options = MatchOptions {
        threshold: 0.0,
        ..Default::default()
    };
    let result = matcher.find_matches(&target, &preferences, candidates, &options);

    assert_eq!(result.matches.len(), 2);
    // Shared-interest echo carries through for display
    for m in &result.matches {
        assert_eq!(m.shared_interests, vec!["yoga"]);
        assert_eq!(m.availability, "today_evening");
    }
}

#[test]
fn test_integration_normalized_request_end_to_end() {
    let matcher = Matcher::with_default_weights();

    // The flexible wire shapes: comma-joined interests, string metrics,
    // missing ids, nested activity block
    let target = normalize_target(
        &json!({
            "user_id": "u1",
            "age": 24,
            "gender": "female",
            "city": "Oslo",
            "activity_interests": "yoga, running",
            "readiness_score": "84.9"
        }),
        Some(&json!({ "type": "yoga", "duration": 45, "intensity": "moderate" })),
    );
    let preferences = normalize_preferences(Some(&json!({
        "gender_preference": "any",
        "age_range": [20, 35],
        "same_city": true
    })));
    let candidates = normalize_candidates(&[
        json!({
            "age": 26,
            "gender": "male",
            "city": "Oslo",
            "activity_interests": ["yoga"],
            "suggestion_type": "yoga",
            "duration": 45
        }),
        json!({ "age": 50, "city": "Oslo" }),
    ]);

    assert_eq!(target.suggestion_type, "yoga");
    assert_eq!(target.duration_min, 45);
    assert_eq!(target.readiness_score, 84.9);

    let result = matcher.find_matches(&target, &preferences, candidates, &MatchOptions::default());

    assert_eq!(result.matches.len(), 1);
    assert_eq!(result.matches[0].user_id, "candidate_1");
    assert_eq!(result.matches[0].shared_interests, vec!["yoga"]);
    assert_eq!(result.filters_applied, vec!["city", "age_range"]);
}
