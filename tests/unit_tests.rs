// Unit tests for Shiksha Match

use serde_json::json;
use shiksha_match::core::{calculate_score, Recommender};
use shiksha_match::models::{SchoolRecord, ScoreWeights, StudentProfile};

fn school(value: serde_json::Value) -> SchoolRecord {
    serde_json::from_value(value).unwrap()
}

fn profile(value: serde_json::Value) -> StudentProfile {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_no_matching_criteria_scores_zero() {
    let school = school(json!({
        "classes": ["1", "2"],
        "location": "Mumbai",
        "type": "Private",
        "distence": 80,
        "fee": 5000,
        "midday": false,
        "girlSupport": false,
    }));
    let profile = profile(json!({
        "class": 10,
        "location": "delhi",
        "type": "public",
        "maxDistance": 10,
        "fee": "free",
        "middayMeal": true,
        "girlChild": true,
    }));

    assert_eq!(calculate_score(&school, &profile, &ScoreWeights::default()), 0);
}

#[test]
fn test_every_criterion_scores_120() {
    // Example 1 from the parity fixtures
    let school = school(json!({
        "classes": "10",
        "location": "Delhi",
        "type": "Public",
        "distence": 5,
        "fee": 0,
        "midday": true,
        "girlSupport": true,
    }));
    let profile = profile(json!({
        "class": 10,
        "location": "delhi",
        "type": "public",
        "maxDistance": 10,
        "fee": "free",
        "middayMeal": true,
        "girlChild": true,
    }));

    assert_eq!(calculate_score(&school, &profile, &ScoreWeights::default()), 120);
}

#[test]
fn test_wrong_class_and_distance_scores_zero() {
    // Example 2 from the parity fixtures
    let school = school(json!({ "classes": ["8", "9"], "distence": 50 }));
    let profile = profile(json!({ "class": 10, "maxDistance": 5 }));

    assert_eq!(calculate_score(&school, &profile, &ScoreWeights::default()), 0);
}

#[test]
fn test_fee_only_scores_20() {
    // Example 3 from the parity fixtures
    let school = school(json!({ "fee": 500 }));
    let profile = profile(json!({ "fee": "low" }));

    assert_eq!(calculate_score(&school, &profile, &ScoreWeights::default()), 20);
}

#[test]
fn test_scalar_and_list_classes_match_numeric_class() {
    let weights = ScoreWeights::default();
    let profile = profile(json!({ "class": 10 }));

    assert_eq!(calculate_score(&school(json!({ "classes": "10" })), &profile, &weights), 30);
    assert_eq!(calculate_score(&school(json!({ "classes": ["10"] })), &profile, &weights), 30);
    assert_eq!(calculate_score(&school(json!({ "classes": [10] })), &profile, &weights), 30);
}

#[test]
fn test_score_is_deterministic() {
    let school = school(json!({
        "classes": ["9", "10"],
        "location": "Delhi",
        "distence": 4,
        "fee": 300,
    }));
    let profile = profile(json!({
        "class": "10",
        "location": "Delhi",
        "maxDistance": 5,
        "fee": "low",
    }));
    let weights = ScoreWeights::default();

    let first = calculate_score(&school, &profile, &weights);
    for _ in 0..10 {
        assert_eq!(calculate_score(&school, &profile, &weights), first);
    }
    assert_eq!(first, 90);
}

#[test]
fn test_absent_fields_never_panic() {
    let weights = ScoreWeights::default();
    let full_profile = profile(json!({
        "class": 10,
        "location": "delhi",
        "type": "public",
        "maxDistance": 10,
        "fee": "medium",
        "middayMeal": true,
        "girlChild": true,
    }));

    // Every single-field school is scoreable against a full profile
    for single in [
        json!({ "classes": "10" }),
        json!({ "location": "Delhi" }),
        json!({ "type": "Public" }),
        json!({ "distence": 5 }),
        json!({ "fee": 100 }),
        json!({ "midday": true }),
        json!({ "girlSupport": true }),
        json!({}),
    ] {
        let score = calculate_score(&school(single), &full_profile, &weights);
        assert!(score <= weights.max_total());
    }

    // And a full school against an empty profile scores zero
    let full_school = school(json!({
        "classes": "10",
        "location": "Delhi",
        "type": "Public",
        "distence": 5,
        "fee": 0,
        "midday": true,
        "girlSupport": true,
    }));
    assert_eq!(calculate_score(&full_school, &profile(json!({})), &weights), 0);
}

#[test]
fn test_monotonic_adding_criteria_never_decreases() {
    let weights = ScoreWeights::default();
    let profile = profile(json!({
        "class": 10,
        "location": "delhi",
        "type": "public",
        "maxDistance": 10,
        "fee": "free",
        "middayMeal": true,
        "girlChild": true,
    }));

    // Add one satisfied criterion at a time
    let stages = [
        json!({}),
        json!({ "classes": "10" }),
        json!({ "classes": "10", "location": "Delhi" }),
        json!({ "classes": "10", "location": "Delhi", "type": "Public" }),
        json!({ "classes": "10", "location": "Delhi", "type": "Public", "distence": 5 }),
        json!({ "classes": "10", "location": "Delhi", "type": "Public", "distence": 5, "fee": 0 }),
        json!({ "classes": "10", "location": "Delhi", "type": "Public", "distence": 5, "fee": 0, "midday": true }),
        json!({ "classes": "10", "location": "Delhi", "type": "Public", "distence": 5, "fee": 0, "midday": true, "girlSupport": true }),
    ];

    let mut last = 0;
    for stage in stages {
        let score = calculate_score(&school(stage), &profile, &weights);
        assert!(score >= last);
        last = score;
    }
    assert_eq!(last, 120);
}

#[test]
fn test_distance_boundary_inclusive() {
    let weights = ScoreWeights::default();
    let profile = profile(json!({ "maxDistance": 10 }));

    assert_eq!(calculate_score(&school(json!({ "distence": 10 })), &profile, &weights), 20);
    assert_eq!(calculate_score(&school(json!({ "distence": 10.1 })), &profile, &weights), 0);
}

#[test]
fn test_recommender_threshold_and_order() {
    // Example 4 from the parity fixtures: scores [90, 60, 30, 20, 10]
    // must come back as exactly [90, 60, 30].
    let recommender = Recommender::with_defaults();
    let profile = profile(json!({
        "class": 10,
        "location": "delhi",
        "type": "public",
        "maxDistance": 10,
        "fee": "free",
    }));

    let schools = vec![
        // 20: location only
        school(json!({ "name": "d", "location": "Delhi North" })),
        // 90: class + location + type + distance
        school(json!({ "name": "a", "classes": "10", "location": "Delhi", "type": "Public", "distence": 5 })),
        // 30: class only
        school(json!({ "name": "c", "classes": "10" })),
        // 60: location + type + distance
        school(json!({ "name": "b", "location": "Delhi", "type": "Public", "distence": 8 })),
        // 0: offers only class 9
        school(json!({ "name": "e", "classes": "9" })),
    ];

    let result = recommender.recommend(&profile, schools);

    let names: Vec<_> = result
        .schools
        .iter()
        .map(|s| s.school.name.clone().unwrap())
        .collect();
    assert_eq!(names, vec!["a", "b", "c"]);

    let scores: Vec<_> = result.schools.iter().map(|s| s.score).collect();
    assert_eq!(scores, vec![90, 60, 30]);
}
