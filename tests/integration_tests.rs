// Integration tests for Shiksha Match: the full recommendation pipeline
// from raw store payloads through scoring to the ranked result.

use serde_json::json;
use shiksha_match::core::Recommender;
use shiksha_match::models::{SchoolRecord, ScoreWeights, StudentProfile};

fn schools_from_store_payload(payload: serde_json::Value) -> Vec<SchoolRecord> {
    // Push-id-keyed object, as the realtime database returns it
    payload
        .as_object()
        .unwrap()
        .values()
        .map(|v| serde_json::from_value(v.clone()).unwrap())
        .collect()
}

fn delhi_profile() -> StudentProfile {
    serde_json::from_value(json!({
        "class": 10,
        "location": "delhi",
        "type": "public",
        "maxDistance": 10,
        "fee": "free",
        "middayMeal": true,
        "girlChild": true,
    }))
    .unwrap()
}

#[test]
fn test_end_to_end_recommendation() {
    let schools = schools_from_store_payload(json!({
        "-Na1": {
            "name": "Sarvodaya Vidyalaya",
            "classes": ["9", "10", "11"],
            "location": "South Delhi",
            "type": "Public",
            "distence": 3,
            "fee": 0,
            "midday": true,
            "girlSupport": true,
        },
        "-Na2": {
            "name": "Green Valley Private",
            "classes": ["10"],
            "location": "Delhi NCR",
            "type": "Private",
            "distence": 6,
            "fee": 4500,
        },
        "-Na3": {
            "name": "Far Public School",
            "classes": "10",
            "location": "Gurgaon",
            "type": "Public",
            "distence": 35,
            "fee": 0,
        },
        "-Na4": {
            "name": "Primary Only",
            "classes": ["1", "2", "3"],
            "location": "Delhi",
            "distence": 2,
            "fee": 200,
        },
    }));

    let result = Recommender::with_defaults().recommend(&delhi_profile(), schools);

    // Everything here clears the threshold except nothing -- check ranking
    let ranked: Vec<_> = result
        .schools
        .iter()
        .map(|s| (s.school.name.clone().unwrap(), s.score))
        .collect();

    // Sarvodaya: 30+20+20+20+20+5+5 = 120
    // Green Valley: 30+20+20 = 70
    // Far Public: 30+20+20 = 70 (class, type, free fee; too far)
    // Primary Only: 20+20 = 40 (location, distance)
    assert_eq!(result.total_considered, 4);
    assert_eq!(ranked.len(), 4);
    assert_eq!(ranked[0], ("Sarvodaya Vidyalaya".to_string(), 120));
    assert_eq!(ranked[3], ("Primary Only".to_string(), 40));

    // The two 70s tie; order between them is unspecified
    let middle: Vec<_> = ranked[1..3].iter().map(|(_, s)| *s).collect();
    assert_eq!(middle, vec![70, 70]);
}

#[test]
fn test_messy_store_data_scores_without_errors() {
    // Upstream data full of type mistakes must still flow through
    let schools = schools_from_store_payload(json!({
        "-Nb1": { "name": "Junk Distance", "classes": 10, "distence": "near", "fee": "free" },
        "-Nb2": { "name": "Flags As Strings", "classes": "10", "midday": "yes", "girlSupport": "yes" },
        "-Nb3": { "name": "All Nulls", "classes": null, "location": null, "fee": null },
    }));

    let result = Recommender::with_defaults().recommend(&delhi_profile(), schools);

    // Both class-10 schools score exactly the class points; nothing panics
    assert_eq!(result.total_considered, 3);
    assert_eq!(result.schools.len(), 2);
    for scored in &result.schools {
        assert_eq!(scored.score, 30);
    }
}

#[test]
fn test_custom_weights_change_ranking() {
    let mut weights = ScoreWeights::default();
    weights.fee = 50;

    let schools = schools_from_store_payload(json!({
        "-Nc1": { "name": "Free", "fee": 0, "location": "Delhi" },
        "-Nc2": { "name": "Right Class", "classes": "10" },
    }));

    let result = Recommender::new(weights, 30).recommend(&delhi_profile(), schools);

    // With the boosted fee weight, the free school (50+20) outranks the
    // class match (30)
    assert_eq!(result.schools[0].school.name.as_deref(), Some("Free"));
    assert_eq!(result.schools[0].score, 70);
    assert_eq!(result.schools[1].score, 30);
}

#[test]
fn test_scored_schools_serialize_flat() {
    let schools = schools_from_store_payload(json!({
        "-Nd1": { "name": "A", "classes": "10", "board": "CBSE" },
    }));

    let result = Recommender::with_defaults().recommend(&delhi_profile(), schools);
    let rendered = serde_json::to_value(&result.schools).unwrap();

    // Record fields and the score sit side by side, extras included
    assert_eq!(rendered[0]["name"], json!("A"));
    assert_eq!(rendered[0]["score"], json!(30));
    assert_eq!(rendered[0]["board"], json!("CBSE"));
}
