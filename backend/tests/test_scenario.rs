//! Tests for scenario loading and validation

use negotiation_sim_core::{ScenarioConfig, ScenarioError, ScenarioItem};

fn names(order: &negotiation_sim_core::PreferenceOrder) -> Vec<&str> {
    order.items().iter().map(String::as_str).collect()
}

#[test]
fn test_csv_scenario_builds_both_orders() {
    let csv = "50\nx,1,3\ny,2,2\nz,3,1\n";
    let scenario = ScenarioConfig::from_csv(csv).unwrap();

    assert_eq!(scenario.iteration_limit, 50);
    assert_eq!(scenario.item_count(), 3);
    assert_eq!(names(&scenario.preference_order_a().unwrap()), ["x", "y", "z"]);
    assert_eq!(names(&scenario.preference_order_b().unwrap()), ["z", "y", "x"]);
}

#[test]
fn test_csv_tolerates_whitespace_and_blank_lines() {
    let csv = "  10 \n\n apple , 2 , 1 \nbanana,1,2\n\n";
    let scenario = ScenarioConfig::from_csv(csv).unwrap();

    assert_eq!(scenario.iteration_limit, 10);
    assert_eq!(names(&scenario.preference_order_a().unwrap()), ["banana", "apple"]);
    assert_eq!(names(&scenario.preference_order_b().unwrap()), ["apple", "banana"]);
}

#[test]
fn test_csv_reports_bad_line() {
    let err = ScenarioConfig::from_csv("5\nx,1,1\ny,2\n").unwrap_err();
    assert!(matches!(err, ScenarioError::Parse { line: 3, .. }));

    let err = ScenarioConfig::from_csv("five\nx,1,1\n").unwrap_err();
    assert!(matches!(err, ScenarioError::Parse { line: 1, .. }));
}

#[test]
fn test_json_scenario() {
    let json = r#"{
        "iteration_limit": 20,
        "items": [
            {"name": "x", "rank_a": 2, "rank_b": 1},
            {"name": "y", "rank_a": 1, "rank_b": 2}
        ]
    }"#;
    let scenario = ScenarioConfig::from_json(json).unwrap();

    assert_eq!(scenario.iteration_limit, 20);
    assert_eq!(names(&scenario.preference_order_a().unwrap()), ["y", "x"]);
    assert_eq!(names(&scenario.preference_order_b().unwrap()), ["x", "y"]);
}

#[test]
fn test_malformed_json_rejected() {
    let err = ScenarioConfig::from_json("{\"iteration_limit\": 3").unwrap_err();
    assert!(matches!(err, ScenarioError::Json(_)));
}

#[test]
fn test_zero_iteration_limit_rejected() {
    let err = ScenarioConfig::from_csv("0\nx,1,1\n").unwrap_err();
    assert_eq!(err, ScenarioError::NonPositiveIterationLimit);
}

#[test]
fn test_empty_scenario_rejected() {
    assert_eq!(
        ScenarioConfig::new(5, vec![]).unwrap_err(),
        ScenarioError::NoItems
    );
    assert_eq!(
        ScenarioConfig::from_csv("").unwrap_err(),
        ScenarioError::NoItems
    );
}

#[test]
fn test_duplicate_item_rejected() {
    let err = ScenarioConfig::from_csv("5\nx,1,1\nx,2,2\n").unwrap_err();
    assert_eq!(err, ScenarioError::DuplicateItem("x".to_string()));
}

#[test]
fn test_tied_rank_rejected() {
    let items = vec![
        ScenarioItem {
            name: "x".to_string(),
            rank_a: 1,
            rank_b: 1,
        },
        ScenarioItem {
            name: "y".to_string(),
            rank_a: 2,
            rank_b: 1,
        },
    ];
    assert_eq!(
        ScenarioConfig::new(5, items).unwrap_err(),
        ScenarioError::TiedRank { side: 'B', rank: 1 }
    );
}
