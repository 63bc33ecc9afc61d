//! Tests for repeated matches and tournaments

use negotiation_sim_core::negotiator::StrategyKind;
use negotiation_sim_core::{
    run_tournament, MatchConfig, MatchRunner, NamedScenario, NegotiationError, ScenarioConfig,
};

fn three_items() -> ScenarioConfig {
    ScenarioConfig::from_csv("30\nx,1,3\ny,2,2\nz,3,1\n").unwrap()
}

fn five_items() -> ScenarioConfig {
    ScenarioConfig::from_csv("25\na,1,4\nb,2,5\nc,3,1\nd,4,3\ne,5,2\n").unwrap()
}

fn config(rounds: usize, seed: u64) -> MatchConfig {
    MatchConfig {
        rounds,
        rng_seed: seed,
    }
}

#[test]
fn test_match_plays_requested_rounds() {
    let mut runner = MatchRunner::new(config(6, 11)).unwrap();
    let mut a = StrategyKind::ThresholdAsymptotic.build();
    let mut b = StrategyKind::TrendFollowing.build();

    let outcome = runner.run(&three_items(), a.as_mut(), b.as_mut()).unwrap();

    assert_eq!(outcome.rounds.len(), 6);
    assert_eq!(a.state().past_results().len(), 6);
    assert_eq!(b.state().past_results().len(), 6);
    assert!(a.state().past_results().iter().all(|r| r.was_a));
    assert!(b.state().past_results().iter().all(|r| !r.was_a));

    let score_a: f64 = outcome.rounds.iter().map(|r| r.points_a).sum();
    let score_b: f64 = outcome.rounds.iter().map(|r| r.points_b).sum();
    assert!((outcome.summary.a.score - score_a).abs() < 1e-9);
    assert!((outcome.summary.b.score - score_b).abs() < 1e-9);
    assert!(outcome.summary.a.wins + outcome.summary.b.wins <= 6);
}

#[test]
fn test_same_seed_same_transcript() {
    let play = |seed: u64| {
        let mut runner = MatchRunner::new(config(5, seed)).unwrap();
        let mut a = StrategyKind::Opportunist.build();
        let mut b = StrategyKind::StaticRandom.build();
        runner.run(&five_items(), a.as_mut(), b.as_mut()).unwrap()
    };

    let first = play(31337);
    let second = play(31337);
    assert_eq!(first.transcript_hash, second.transcript_hash);
    assert_eq!(first, second);
}

#[test]
fn test_constant_pair_fails_every_round() {
    let mut runner = MatchRunner::new(config(3, 1)).unwrap();
    let mut a = StrategyKind::Constant.build();
    let mut b = StrategyKind::Constant.build();

    let outcome = runner.run(&three_items(), a.as_mut(), b.as_mut()).unwrap();

    assert_eq!(outcome.successful_rounds(), 0);
    assert_eq!(outcome.summary.a.score, -9.0);
    assert_eq!(outcome.summary.b.score, -9.0);
    assert_eq!(outcome.summary.a.wins, 0);
    assert_eq!(outcome.summary.b.wins, 0);
}

#[test]
fn test_invalid_scenario_rejected_before_play() {
    let mut runner = MatchRunner::new(config(3, 1)).unwrap();
    let mut a = StrategyKind::Constant.build();
    let mut b = StrategyKind::Constant.build();
    let mut scenario = three_items();
    scenario.iteration_limit = 0;

    let err = runner.run(&scenario, a.as_mut(), b.as_mut()).unwrap_err();
    assert!(matches!(err, NegotiationError::Scenario(_)));
    assert!(a.state().past_results().is_empty());
}

#[test]
fn test_tournament_covers_every_pairing_and_scenario() {
    let scenarios = vec![
        NamedScenario::new("three", three_items()),
        NamedScenario::new("five", five_items()),
    ];

    let report = run_tournament(
        config(2, 99),
        &scenarios,
        StrategyKind::Opportunist,
        &StrategyKind::ALL,
    )
    .unwrap();

    assert_eq!(report.pairings.len(), StrategyKind::ALL.len());
    for (key, per_scenario) in &report.pairings {
        assert!(key.starts_with("Opportunist vs. "), "{}", key);
        assert_eq!(per_scenario.len(), 2);
        assert!(per_scenario.contains_key("three"));
        assert!(per_scenario.contains_key("five"));
        for entry in per_scenario.values() {
            assert_eq!(entry.rounds.len(), 2);
            let score_a: f64 = entry.rounds.iter().map(|r| r.points_a).sum();
            assert!((entry.summary.a.score - score_a).abs() < 1e-9);
        }
    }
    assert!(report.pairing("Opportunist vs. LocalSwap").is_some());

    let total_a: f64 = report
        .pairings
        .values()
        .flat_map(|m| m.values())
        .map(|entry| entry.summary.a.score)
        .sum();
    assert!((report.total_points_a - total_a).abs() < 1e-6);
}

#[test]
fn test_tournament_is_reproducible() {
    let scenarios = vec![NamedScenario::new("five", five_items())];
    let run = || {
        run_tournament(
            config(3, 4242),
            &scenarios,
            StrategyKind::ThresholdAsymptotic,
            &[StrategyKind::LinearThenAsymptotic, StrategyKind::LocalSwap],
        )
        .unwrap()
    };

    assert_eq!(run(), run());
}

#[test]
fn test_same_named_scenarios_rejected() {
    let scenarios = vec![
        NamedScenario::new("s", three_items()),
        NamedScenario::new("s", five_items()),
    ];

    let err = run_tournament(
        config(2, 1),
        &scenarios,
        StrategyKind::Constant,
        &[StrategyKind::Constant],
    )
    .unwrap_err();
    assert!(matches!(err, NegotiationError::InvalidConfig(_)));
}
